mod error;
mod eval;
mod exec;
mod find;
mod memory;
mod relation;
mod store;

pub use error::StoreError;
pub use eval::matches;
pub use find::Find;
pub use memory::MemoryStore;
pub use relation::Relation;
pub use store::DocumentStore;

/// Identity field, kept by every projection.
pub const ID_FIELD: &str = "_id";
/// Creation timestamp stamped on insert.
pub const CREATED_AT_FIELD: &str = "createdAt";
