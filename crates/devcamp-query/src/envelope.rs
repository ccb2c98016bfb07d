use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// `{success, count, pagination, data}` wrapper returned by list endpoints.
///
/// `count` is the size of the returned page, not the number of matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub success: bool,
    pub count: usize,
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T> ListEnvelope<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination,
            data,
        }
    }

    /// Convert each item, keeping `count` and `pagination`.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListEnvelope<U> {
        ListEnvelope {
            success: self.success,
            count: self.count,
            pagination: self.pagination,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
