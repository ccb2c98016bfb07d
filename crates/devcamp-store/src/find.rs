use devcamp_query::{FilterPredicate, ListQuery, Sort};
use serde::{Deserialize, Serialize};

/// A find request against one collection. Applied in order: filter, sort,
/// skip, take, projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Find {
    pub filter: FilterPredicate,
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub sort: Vec<Sort>,
    #[serde(default)]
    pub skip: usize,
    pub take: Option<usize>,
}

impl Find {
    pub fn filter(filter: FilterPredicate) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }
}

impl From<&ListQuery> for Find {
    fn from(query: &ListQuery) -> Self {
        Self {
            filter: query.filter.clone(),
            columns: query.projection.clone().map(|p| p.into_fields()),
            sort: query.sort.clone(),
            skip: query.skip(),
            take: Some(query.take()),
        }
    }
}
