mod aggregate;
mod error;
mod resource;
mod response;
mod schema;
mod service;

pub use aggregate::{Aggregate, Rounding};
pub use error::ListError;
pub use resource::{ParentLink, Resource, Resources};
pub use response::{ChildListResponse, ItemResponse};
pub use schema::{FieldKind, FieldRule, Schema, WriteMode};
pub use service::ListService;
