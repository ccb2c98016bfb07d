use std::fmt;

use devcamp_query::QueryError;
use devcamp_store::StoreError;

#[derive(Debug)]
pub enum ListError {
    Query(QueryError),
    Store(StoreError),
    NotFound(String),
    Validation(String),
    Duplicate(String),
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Query(e) => write!(f, "{e}"),
            ListError::Store(e) => write!(f, "store error: {e}"),
            ListError::NotFound(msg) => write!(f, "{msg}"),
            ListError::Validation(msg) => write!(f, "{msg}"),
            ListError::Duplicate(field) => write!(f, "duplicate field value entered: {field}"),
        }
    }
}

impl std::error::Error for ListError {}

impl ListError {
    pub fn not_found(kind: &str, id: &str) -> Self {
        ListError::NotFound(format!("{kind} not found with id of {id}"))
    }

    pub fn status_code(&self) -> http::StatusCode {
        match self {
            ListError::Query(e) => e.status_code(),
            ListError::NotFound(_) | ListError::Store(StoreError::NotFound { .. }) => {
                http::StatusCode::NOT_FOUND
            }
            ListError::Validation(_)
            | ListError::Duplicate(_)
            | ListError::Store(StoreError::InvalidDocument(_))
            | ListError::Store(StoreError::DuplicateId { .. }) => http::StatusCode::BAD_REQUEST,
            ListError::Store(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryError> for ListError {
    fn from(e: QueryError) -> Self {
        ListError::Query(e)
    }
}

impl From<StoreError> for ListError {
    fn from(e: StoreError) -> Self {
        ListError::Store(e)
    }
}
