use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub const CREATED_AT: &'static str = "createdAt";

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Newest first.
    pub fn default_order() -> Vec<Sort> {
        vec![Sort::desc(Self::CREATED_AT)]
    }

    /// Parse `-createdAt,name` into sort keys in listed order. A leading `-`
    /// means descending; empty segments are skipped.
    pub fn parse_list(raw: &str) -> Vec<Sort> {
        raw.split(',')
            .map(str::trim)
            .filter_map(|part| match part.strip_prefix('-') {
                Some(field) if !field.is_empty() => Some(Sort::desc(field)),
                Some(_) => None,
                None if part.is_empty() => None,
                None => Some(Sort::asc(part)),
            })
            .collect()
    }
}
