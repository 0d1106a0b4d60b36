//! # rowstore
//!
//! A minimal PostgreSQL mapping layer: soft-delete entities with audit
//! timestamps, a generic data-access object with CRUD and a chained query
//! builder, and a join accessor that demultiplexes multi-table rows back
//! into per-entity records.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rowstore::prelude::*;
//! use serde_json::{Map, Value};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct User {
//!     pub base: EntityBase,
//!     pub name: String,
//!     pub email: String,
//! }
//!
//! impl Entity for User {
//!     fn table_name() -> &'static str {
//!         "users"
//!     }
//!
//!     fn columns() -> &'static [FieldColumn] {
//!         const COLUMNS: &[FieldColumn] = &[
//!             FieldColumn::new("id", "id"),
//!             FieldColumn::new("is_deleted", "isdeleted"),
//!             FieldColumn::new("create_date", "createdate"),
//!             FieldColumn::new("update_date", "updatedate"),
//!             FieldColumn::new("name", "name"),
//!             FieldColumn::new("email", "email"),
//!         ];
//!         COLUMNS
//!     }
//!
//!     fn base(&self) -> &EntityBase {
//!         &self.base
//!     }
//!
//!     fn base_mut(&mut self) -> &mut EntityBase {
//!         &mut self.base
//!     }
//!
//!     fn merge_extra_from_external(&mut self, payload: &Map<String, Value>) {
//!         merge_str(&mut self.name, payload.get("name"));
//!         merge_str(&mut self.email, payload.get("email"));
//!     }
//!
//!     fn merge_extra_from_storage(&mut self, row: &Map<String, Value>) {
//!         merge_str(&mut self.name, row.get("name"));
//!         merge_str(&mut self.email, row.get("email"));
//!     }
//!
//!     fn extra_values(&self) -> Vec<(&'static str, Value)> {
//!         vec![
//!             ("name", Value::from(self.name.clone())),
//!             ("email", Value::from(self.email.clone())),
//!         ]
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(),
//!         5432,
//!         "rowstore".to_string(),
//!         "postgres".to_string(),
//!         "password".to_string(),
//!     );
//!     let gateway: Arc<dyn Gateway> = Arc::new(PgGateway::new(config));
//!
//!     let mut users = Dao::<User>::new(gateway);
//!     let user = User {
//!         name: "John Doe".to_string(),
//!         email: "john@example.com".to_string(),
//!         ..User::default()
//!     };
//!
//!     if let Some(created) = users.create(user).await {
//!         println!("created user {}", created.base.id);
//!     }
//!
//!     let active = users
//!         .where_field("email", CompareOp::Like, "%@example.com")
//!         .order_by(&["name"], SortOrder::Asc)
//!         .limit(10)
//!         .execute()
//!         .await;
//!     println!("matched: {:?}", active.map(|v| v.len()));
//! }
//! ```

pub mod config;
pub mod dao;
pub mod entity;
pub mod errors;
pub mod gateway;
pub mod join;
pub mod prelude;
pub mod query_builder;
pub mod validation;

pub use config::{AppConfig, ConfigError, DatabaseConfig};
pub use dao::Dao;
pub use entity::{Entity, EntityBase, FieldColumn};
pub use errors::RowStoreError;
pub use gateway::{ExecuteResult, Gateway, PgGateway, Record};
pub use join::{JoinDao, JoinFilter, JoinOptions, JoinRow};
pub use query_builder::{CompareOp, QueryBuilder, SortOrder};
pub use validation::{ValidatedIdentifier, ValidationError};

// Re-export external dependencies used in the public API
pub use async_trait;
pub use serde_json;
pub use sqlx;
