use serde::{Deserialize, Serialize};

/// `{success, data}` body for single-document endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ItemResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success, count, data}` body for unpaginated child listings such as the
/// courses of one bootcamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ChildListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}
