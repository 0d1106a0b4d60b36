//! Error types for the rowstore crate
//!
//! The DAO surface reports failure through `Option`/`bool` sentinels; these
//! richer errors live underneath it, at the gateway and configuration layer,
//! and surface only in diagnostics.

use crate::config::ConfigError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid identifier: {0}")]
    Validation(#[from] ValidationError),
}
