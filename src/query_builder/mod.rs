//! Query builder
//!
//! Token accumulation and SQL clause generation for the DAO's chained
//! filter/order/paging interface.

pub mod builder;
pub mod filter;
pub mod ordering;
pub mod sql_generation;

#[cfg(test)]
mod tests;

pub use builder::QueryBuilder;
pub use filter::{CompareOp, Predicate, WhereToken};
pub use ordering::{OrderClause, SortOrder};
pub use sql_generation::SqlGenerator;
