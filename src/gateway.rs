//! Execution gateway
//!
//! The boundary between the mapping layer and the backing store. A gateway
//! runs one query with positionally bound parameters and reports either the
//! raw rows or failure; it never raises across the boundary. Failures are
//! logged as diagnostics and collapse to `None`, which is what every caller
//! above propagates as its own sentinel.

use crate::config::DatabaseConfig;
use crate::errors::RowStoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{Column, ConnectOptions, Connection, Row, TypeInfo};

/// One result row: column name to value, in result-set column order.
pub type Record = Map<String, Value>;

/// Rows and column metadata returned by a successful execution.
#[derive(Debug, Clone, Default)]
pub struct ExecuteResult {
    pub rows: Vec<Record>,
    pub columns: Vec<String>,
}

/// Boundary contract for running queries against the backing store.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Run a query with positionally bound parameters. Returns `None` on any
    /// connection or execution failure.
    async fn execute(&self, query: &str, params: &[Value]) -> Option<ExecuteResult>;
}

// Binds a JSON value using its runtime shape: RFC 3339 strings become
// timestamps, in-range integers bind as INT4 to match narrow columns.
macro_rules! bind_json_param {
    ($query:expr, $param:expr) => {
        match $param {
            Value::String(s) => {
                if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    $query.bind(dt.with_timezone(&chrono::Utc))
                } else {
                    $query.bind(s)
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            Value::Bool(b) => $query.bind(b),
            Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}

/// PostgreSQL gateway. Every call opens a fresh connection from the
/// configured settings and closes it before returning; there is no pooling
/// or reuse across calls.
#[derive(Debug, Clone)]
pub struct PgGateway {
    config: DatabaseConfig,
}

impl PgGateway {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .database(&self.config.database)
            .username(&self.config.username)
            .password(&self.config.password)
    }

    async fn run(&self, query: &str, params: &[Value]) -> Result<ExecuteResult, RowStoreError> {
        let mut conn = self.connect_options().connect().await?;

        let mut sqlx_query = sqlx::query(query);
        for param in params {
            sqlx_query = bind_json_param!(sqlx_query, param.clone());
        }

        let result = sqlx_query.fetch_all(&mut conn).await;
        // Release the connection regardless of outcome.
        let _ = conn.close().await;
        let pg_rows = result?;

        let columns = pg_rows
            .first()
            .map(|row| {
                row.columns()
                    .iter()
                    .map(|c| c.name().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let rows = pg_rows.iter().map(decode_row).collect();

        Ok(ExecuteResult { rows, columns })
    }

    /// Verify connectivity with a `SELECT 1` round trip.
    pub async fn health_check(&self) -> bool {
        self.execute("SELECT 1", &[]).await.is_some()
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn execute(&self, query: &str, params: &[Value]) -> Option<ExecuteResult> {
        match self.run(query, params).await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::error!(error = %e, query, "gateway execution failed");
                None
            }
        }
    }
}

fn decode_row(row: &PgRow) -> Record {
    let mut record = Record::new();
    for (index, column) in row.columns().iter().enumerate() {
        record.insert(column.name().to_string(), decode_column(row, index));
    }
    record
}

fn decode_column(row: &PgRow, index: usize) -> Value {
    let type_name = row.columns()[index].type_info().name();
    match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::from),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::from(v as i64)),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::from(v as i64)),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::from),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::from(v as f64)),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::from),
        "TIMESTAMPTZ" => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| {
                Value::from(v.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
            }),
        "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::from(v.to_string())),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, |v| Value::from(v.to_string())),
        "JSON" | "JSONB" => row
            .try_get::<Option<Value>, _>(index)
            .ok()
            .flatten()
            .unwrap_or(Value::Null),
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map_or(Value::Null, Value::from),
    }
}
