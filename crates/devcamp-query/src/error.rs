use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The filter parameters could not be turned into a filter document.
    MalformedFilter(String),
    /// A filter named a field outside the resource's allow-list.
    FieldNotAllowed(String),
    /// A bracketed operator that is not part of the operator vocabulary.
    UnknownOperator(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::MalformedFilter(msg) => write!(f, "malformed filter: {msg}"),
            QueryError::FieldNotAllowed(field) => {
                write!(f, "filtering on field `{field}` is not allowed")
            }
            QueryError::UnknownOperator(op) => write!(f, "unknown filter operator: {op}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    pub fn status_code(&self) -> http::StatusCode {
        http::StatusCode::BAD_REQUEST
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self {
        QueryError::MalformedFilter(e.to_string())
    }
}
