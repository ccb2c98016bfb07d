use serde::{Deserialize, Serialize};

/// Fields to return, from `select=name,description`. `_id` is always kept by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection(pub Vec<String>);

impl Projection {
    pub fn parse(raw: &str) -> Option<Projection> {
        let fields: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if fields.is_empty() {
            None
        } else {
            Some(Projection(fields))
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<String> {
        self.0
    }
}
