//! Convenience re-exports for common usage

pub use crate::config::{AppConfig, DatabaseConfig};
pub use crate::dao::Dao;
pub use crate::entity::{
    current_timestamp, merge_bool, merge_f64, merge_i64, merge_str, Entity, EntityBase,
    FieldColumn, ALIVE, DELETED, UNASSIGNED_ID,
};
pub use crate::errors::RowStoreError;
pub use crate::gateway::{ExecuteResult, Gateway, PgGateway, Record};
pub use crate::join::{JoinDao, JoinFilter, JoinOptions, JoinRow};
pub use crate::query_builder::{CompareOp, QueryBuilder, SortOrder};
pub use async_trait::async_trait;
