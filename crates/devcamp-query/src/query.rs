use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::fields::FieldSet;
use crate::filter::FilterPredicate;
use crate::pagination::PaginationWindow;
use crate::params::QueryParams;
use crate::projection::Projection;
use crate::sort::Sort;

/// Execution plan for one list request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub filter: FilterPredicate,
    pub projection: Option<Projection>,
    pub sort: Vec<Sort>,
    pub window: PaginationWindow,
}

impl ListQuery {
    pub fn translate(params: &QueryParams, filterable: &FieldSet) -> Result<Self, QueryError> {
        let filter = FilterPredicate::from_params(params, filterable)?;
        let projection = params.get("select").and_then(Projection::parse);
        let sort = params
            .get("sort")
            .map(Sort::parse_list)
            .filter(|keys| !keys.is_empty())
            .unwrap_or_else(Sort::default_order);
        let window = PaginationWindow::from_params(params);

        Ok(Self {
            filter,
            projection,
            sort,
            window,
        })
    }

    pub fn skip(&self) -> usize {
        self.window.start_index
    }

    pub fn take(&self) -> usize {
        self.window.limit
    }
}
