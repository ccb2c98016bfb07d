mod envelope;
mod error;
mod fields;
mod filter;
mod operator;
mod pagination;
mod params;
mod projection;
mod query;
mod rewrite;
mod sort;

pub use envelope::ListEnvelope;
pub use error::QueryError;
pub use fields::FieldSet;
pub use filter::{Condition, FilterPredicate};
pub use operator::Operator;
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, PageLink, Pagination, PaginationWindow};
pub use params::{QueryParams, RESERVED_KEYS};
pub use projection::Projection;
pub use query::ListQuery;
pub use rewrite::rewrite_operators;
pub use sort::{Sort, SortDirection};
