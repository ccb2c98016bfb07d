use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    CollectionNotFound(String),
    NotFound { collection: String, id: String },
    DuplicateId { collection: String, id: String },
    InvalidDocument(String),
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CollectionNotFound(name) => write!(f, "collection not found: {name}"),
            StoreError::NotFound { collection, id } => {
                write!(f, "no document with id {id} in {collection}")
            }
            StoreError::DuplicateId { collection, id } => {
                write!(f, "duplicate id {id} in {collection}")
            }
            StoreError::InvalidDocument(msg) => write!(f, "invalid document: {msg}"),
            StoreError::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
