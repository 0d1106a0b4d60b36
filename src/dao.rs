//! Single-entity data access object
//!
//! `Dao<E>` provides CRUD over one entity type plus a chained
//! filter/order/paging builder with a terminal [`Dao::execute`]. Every read
//! excludes logically deleted rows. Failures collapse to `None`/`false`
//! sentinels; the gateway has already logged the cause.

use crate::entity::{current_timestamp, Entity, ALIVE, DELETED};
use crate::gateway::Gateway;
use crate::query_builder::{CompareOp, QueryBuilder, SortOrder, SqlGenerator};
use crate::validation::ValidatedIdentifier;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct Dao<E: Entity> {
    gateway: Arc<dyn Gateway>,
    query: QueryBuilder,
    _entity: PhantomData<E>,
}

impl<E: Entity> Dao<E> {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            query: QueryBuilder::new(),
            _entity: PhantomData,
        }
    }

    /// Fetch one live entity by id. `None` when the row is missing, soft
    /// deleted, or the gateway fails.
    pub async fn read(&self, id: i64) -> Option<E> {
        let sql = format!(
            "SELECT * FROM {} WHERE id = $1 AND isdeleted = $2",
            E::table_name()
        );
        let result = self
            .gateway
            .execute(&sql, &[Value::from(id), Value::from(ALIVE)])
            .await?;

        let row = result.rows.first()?;
        let mut entity = E::default();
        entity.populate_from_storage_row(row);
        Some(entity)
    }

    /// Batch fetch by id set. The result may be shorter than the request if
    /// some rows are deleted or missing; an empty vec is a valid result.
    /// `None` only on gateway failure.
    pub async fn read_many(&self, ids: &[i64]) -> Option<Vec<E>> {
        if ids.is_empty() {
            return Some(Vec::new());
        }

        let mut values = Vec::new();
        let mut counter = 1;
        let id_list = SqlGenerator::build_in_list(ids, &mut values, &mut counter);
        let alive = SqlGenerator::placeholder(&mut counter);
        values.push(Value::from(ALIVE));

        let sql = format!(
            "SELECT * FROM {} WHERE id IN ({}) AND isdeleted = {}",
            E::table_name(),
            id_list,
            alive
        );
        let result = self.gateway.execute(&sql, &values).await?;
        Some(Self::rows_to_entities(&result.rows))
    }

    /// Insert the entity, stamping `create_date` and clearing `update_date`.
    /// Every mapped column except the id and the soft-delete flag is written.
    /// The generated id is read back and assigned onto the returned entity;
    /// `None` if the gateway fails or yields no usable id.
    pub async fn create(&self, mut entity: E) -> Option<E> {
        entity.base_mut().create_date = current_timestamp();
        entity.base_mut().update_date = String::new();

        let row = entity.storage_row();
        let mut columns = Vec::new();
        let mut values = Vec::new();
        for fc in E::columns() {
            if fc.column == "id" || fc.column == "isdeleted" {
                continue;
            }
            columns.push(fc.column);
            values.push(row.get(fc.column).cloned().unwrap_or(Value::Null));
        }

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            E::table_name(),
            columns.join(", "),
            placeholders.join(", ")
        );

        let result = self.gateway.execute(&sql, &values).await?;
        let id = result.rows.first()?.get("id")?.as_i64()?;
        if id == 0 {
            return None;
        }

        entity.base_mut().id = id;
        Some(entity)
    }

    /// Sequential batch create, collecting only the successes.
    /// `None` for empty input.
    pub async fn create_many(&self, entities: Vec<E>) -> Option<Vec<E>> {
        if entities.is_empty() {
            return None;
        }
        let mut created = Vec::new();
        for entity in entities {
            if let Some(inserted) = self.create(entity).await {
                created.push(inserted);
            }
        }
        Some(created)
    }

    /// Update every mapped column except the id, the creation timestamp, and
    /// the soft-delete flag, keyed by id, stamping `update_date`.
    ///
    /// There is no existence check: updating an id that does not exist is a
    /// no-op at the storage layer and still reports success here.
    pub async fn update(&self, mut entity: E) -> Option<E> {
        entity.base_mut().update_date = current_timestamp();

        let row = entity.storage_row();
        let mut assignments = Vec::new();
        let mut values = Vec::new();
        let mut counter = 1;
        for fc in E::columns() {
            if fc.column == "id" || fc.column == "createdate" || fc.column == "isdeleted" {
                continue;
            }
            assignments.push(format!(
                "{} = {}",
                fc.column,
                SqlGenerator::placeholder(&mut counter)
            ));
            values.push(row.get(fc.column).cloned().unwrap_or(Value::Null));
        }

        let id_param = SqlGenerator::placeholder(&mut counter);
        values.push(Value::from(entity.base().id));

        let sql = format!(
            "UPDATE {} SET {} WHERE id = {}",
            E::table_name(),
            assignments.join(", "),
            id_param
        );

        self.gateway.execute(&sql, &values).await?;
        Some(entity)
    }

    /// Sequential batch update; mirrors [`Dao::create_many`].
    pub async fn update_many(&self, entities: Vec<E>) -> Option<Vec<E>> {
        if entities.is_empty() {
            return None;
        }
        let mut updated = Vec::new();
        for entity in entities {
            if let Some(result) = self.update(entity).await {
                updated.push(result);
            }
        }
        Some(updated)
    }

    /// Soft delete: verify via [`Dao::read`] that the entity exists and is
    /// alive, then set the soft-delete flag. `false` if the check fails,
    /// `true` otherwise.
    ///
    /// The check and the write are two independent round trips with no
    /// atomicity between them; a concurrent delete in the gap is a known
    /// race.
    pub async fn delete(&self, entity: &E) -> bool {
        if self.read(entity.base().id).await.is_none() {
            return false;
        }

        let sql = format!(
            "UPDATE {} SET isdeleted = $1 WHERE id = $2",
            E::table_name()
        );
        let _ = self
            .gateway
            .execute(&sql, &[Value::from(DELETED), Value::from(entity.base().id)])
            .await;
        true
    }

    /// Sequential batch delete. `None` for empty input, otherwise one
    /// boolean per entity in request order.
    pub async fn delete_many(&self, entities: &[E]) -> Option<Vec<bool>> {
        if entities.is_empty() {
            return None;
        }
        let mut outcomes = Vec::with_capacity(entities.len());
        for entity in entities {
            outcomes.push(self.delete(entity).await);
        }
        Some(outcomes)
    }

    /// Append a comparison predicate. The field name is translated through
    /// the entity's column mapping; an unmapped or invalid name drops the
    /// predicate with a diagnostic rather than splicing it into SQL.
    pub fn where_field(
        &mut self,
        field: &str,
        op: CompareOp,
        value: impl Into<Value>,
    ) -> &mut Self {
        match self.resolve_column(field) {
            Some(column) => self.query.push_predicate(column, op, value.into()),
            None => {
                tracing::warn!(field, table = E::table_name(), "dropping invalid filter field");
            }
        }
        self
    }

    /// Append an explicit AND between predicates.
    pub fn and(&mut self) -> &mut Self {
        self.query.push_and();
        self
    }

    /// Append an explicit OR between predicates.
    pub fn or(&mut self) -> &mut Self {
        self.query.push_or();
        self
    }

    /// Append an ORDER BY entry; fields translate and validate like
    /// [`Dao::where_field`], invalid ones are dropped with a diagnostic.
    pub fn order_by(&mut self, fields: &[&str], order: SortOrder) -> &mut Self {
        let columns: Vec<String> = fields
            .iter()
            .filter_map(|field| {
                let resolved = self.resolve_column(field);
                if resolved.is_none() {
                    tracing::warn!(
                        field,
                        table = E::table_name(),
                        "dropping invalid order-by field"
                    );
                }
                resolved
            })
            .collect();
        if !columns.is_empty() {
            self.query.push_order(columns, order);
        }
        self
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.query.set_limit(limit);
        self
    }

    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.query.set_offset(offset);
        self
    }

    /// Run the accumulated query:
    /// `SELECT * FROM <table> WHERE (<predicates>) AND isdeleted = <alive>
    /// [ORDER BY ...] [LIMIT ...] [OFFSET ...]`.
    ///
    /// All accumulated builder state is consumed and reset before the
    /// gateway round trip, so the reset holds even on failure.
    pub async fn execute(&mut self) -> Option<Vec<E>> {
        let query = self.query.take();

        let mut values = Vec::new();
        let mut counter = 1;
        let predicates =
            SqlGenerator::build_where_tokens(&query.where_tokens, &mut values, &mut counter);
        let alive = SqlGenerator::placeholder(&mut counter);
        values.push(Value::from(ALIVE));

        let mut sql = format!("SELECT * FROM {} WHERE ", E::table_name());
        if predicates.is_empty() {
            sql.push_str(&format!("isdeleted = {}", alive));
        } else {
            // Parenthesized so OR predicates can never leak deleted rows.
            sql.push_str(&format!("({}) AND isdeleted = {}", predicates, alive));
        }

        let order = SqlGenerator::build_order_clause(&query.order_by);
        if !order.is_empty() {
            sql.push(' ');
            sql.push_str(&order);
        }

        let paging =
            SqlGenerator::build_limit_clause(query.limit, query.offset, &mut values, &mut counter);
        if !paging.is_empty() {
            sql.push(' ');
            sql.push_str(&paging);
        }

        let result = self.gateway.execute(&sql, &values).await?;
        Some(Self::rows_to_entities(&result.rows))
    }

    fn resolve_column(&self, field: &str) -> Option<String> {
        let column = E::column_for_field(field).unwrap_or(field);
        ValidatedIdentifier::new(column)
            .ok()
            .map(ValidatedIdentifier::into_string)
    }

    fn rows_to_entities(rows: &[crate::gateway::Record]) -> Vec<E> {
        rows.iter()
            .map(|row| {
                let mut entity = E::default();
                entity.populate_from_storage_row(row);
                entity
            })
            .collect()
    }
}
