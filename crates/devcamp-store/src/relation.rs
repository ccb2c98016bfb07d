use serde::{Deserialize, Serialize};

/// A reference from one collection to another, joined on demand.
///
/// `field` holds the referenced `_id`; populating replaces it with the
/// referenced document, trimmed to `columns` when given, or with `null`
/// when the reference dangles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub field: String,
    pub collection: String,
    pub columns: Option<Vec<String>>,
}

impl Relation {
    pub fn new(field: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            collection: collection.into(),
            columns: None,
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}
