use bson::{Bson, Document};
use devcamp_query::FilterPredicate;
use devcamp_store::{DocumentStore, Find, StoreError};
use tracing::{debug, info};

use crate::error::ListError;
use crate::resource::ParentLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Stored as-is.
    Exact,
    /// Rounded up to the next multiple of ten and stored as an integer.
    CeilToTen,
}

impl Rounding {
    fn apply(&self, mean: f64) -> Bson {
        match self {
            Rounding::Exact => Bson::Double(mean),
            Rounding::CeilToTen => Bson::Int64(((mean / 10.0).ceil() * 10.0) as i64),
        }
    }
}

/// Mean of a numeric child field, kept on the parent document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    pub source: &'static str,
    pub target: &'static str,
    pub rounding: Rounding,
}

impl Aggregate {
    /// Recompute the aggregate for one parent from its current children.
    /// The target field is removed when no child carries the source field.
    pub fn recompute<S: DocumentStore>(
        &self,
        store: &S,
        children: &str,
        parent: &ParentLink,
        parent_id: &str,
    ) -> Result<Option<Bson>, ListError> {
        let docs = store.find(
            children,
            &Find::filter(FilterPredicate::eq(parent.field, parent_id)),
        )?;

        let values: Vec<f64> = docs
            .iter()
            .filter_map(|d| match d.get(self.source)? {
                Bson::Int32(n) => Some(*n as f64),
                Bson::Int64(n) => Some(*n as f64),
                Bson::Double(n) => Some(*n),
                _ => None,
            })
            .collect();

        let value = if values.is_empty() {
            None
        } else {
            Some(self.rounding.apply(values.iter().sum::<f64>() / values.len() as f64))
        };

        let mut change = Document::new();
        change.insert(self.target, value.clone().unwrap_or(Bson::Null));
        match store.update(parent.collection, parent_id, change) {
            Ok(_) => {
                info!(
                    parent = parent_id,
                    field = self.target,
                    value = ?value,
                    "recomputed aggregate"
                );
                Ok(value)
            }
            // The parent may already be gone, e.g. during a cascading delete
            Err(StoreError::NotFound { .. }) => {
                debug!(parent = parent_id, field = self.target, "parent missing, aggregate skipped");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_to_ten_rounds_up() {
        assert_eq!(Rounding::CeilToTen.apply(9001.0), Bson::Int64(9010));
        assert_eq!(Rounding::CeilToTen.apply(9000.0), Bson::Int64(9000));
        assert_eq!(Rounding::Exact.apply(7.5), Bson::Double(7.5));
    }
}
