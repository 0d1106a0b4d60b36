//! Entity contract and field mapping
//!
//! An entity is one in-memory record mapped to one storage table. Every
//! entity carries the four common fields of [`EntityBase`] plus its own
//! fields, and declares a fixed field-to-column mapping used by the DAO and
//! join layers to translate between in-memory names and storage columns.

use serde_json::{Map, Value};
use std::fmt::Debug;

/// Id value of an entity that has never been persisted.
pub const UNASSIGNED_ID: i64 = -1;

/// Soft-delete flag value for live rows.
pub const ALIVE: i64 = 0;

/// Soft-delete flag value for logically deleted rows.
pub const DELETED: i64 = 1;

/// One (field name, column name) pair of an entity's mapping.
///
/// The mapping is injective in both directions: every field has exactly one
/// column and every column belongs to exactly one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldColumn {
    pub field: &'static str,
    pub column: &'static str,
}

impl FieldColumn {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self { field, column }
    }
}

/// The four base mapping entries shared by every entity. Concrete entities
/// declare these first in their `columns()` list, followed by their own.
pub const BASE_FIELD_COLUMNS: [FieldColumn; 4] = [
    FieldColumn::new("id", "id"),
    FieldColumn::new("is_deleted", "isdeleted"),
    FieldColumn::new("create_date", "createdate"),
    FieldColumn::new("update_date", "updatedate"),
];

/// Common fields carried by every entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBase {
    /// Storage identity; [`UNASSIGNED_ID`] until the entity is persisted.
    pub id: i64,
    /// Soft-delete flag; [`ALIVE`] rows are visible, [`DELETED`] rows are
    /// excluded from every standard read and query.
    pub is_deleted: i64,
    /// ISO-8601 creation timestamp, set once by `create`.
    pub create_date: String,
    /// ISO-8601 update timestamp, empty until the first `update`.
    pub update_date: String,
}

impl Default for EntityBase {
    fn default() -> Self {
        Self {
            id: UNASSIGNED_ID,
            is_deleted: ALIVE,
            create_date: String::new(),
            update_date: String::new(),
        }
    }
}

impl EntityBase {
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    pub fn is_alive(&self) -> bool {
        self.is_deleted == ALIVE
    }
}

/// Contract composed by every mapped record type.
///
/// Implementors supply the schema descriptor (table name, mapping) and the
/// per-entity merge hooks; the population and serialization logic on top of
/// them is provided here.
pub trait Entity: Clone + Default + Debug + Send + Sync {
    /// The storage table this entity maps to.
    fn table_name() -> &'static str;

    /// Declaration-ordered field/column pairs: the four base entries of
    /// [`BASE_FIELD_COLUMNS`] followed by the entity-specific ones.
    fn columns() -> &'static [FieldColumn];

    fn base(&self) -> &EntityBase;

    fn base_mut(&mut self) -> &mut EntityBase;

    /// Merge entity-specific fields from a payload keyed by field name.
    fn merge_extra_from_external(&mut self, payload: &Map<String, Value>);

    /// Merge entity-specific fields from a row keyed by column name.
    fn merge_extra_from_storage(&mut self, row: &Map<String, Value>);

    /// Current values of the entity-specific fields, in declaration order.
    fn extra_values(&self) -> Vec<(&'static str, Value)>;

    /// Merge a payload keyed by *field name* into this entity.
    ///
    /// Each field is copied only when the payload value's type matches the
    /// field's type; anything missing or mistyped leaves the field unchanged.
    /// This is a partial-update merge, never a validating deserializer.
    fn populate_from_external(&mut self, payload: &Map<String, Value>) {
        {
            let base = self.base_mut();
            merge_i64(&mut base.id, payload.get("id"));
            merge_i64(&mut base.is_deleted, payload.get("is_deleted"));
            merge_str(&mut base.create_date, payload.get("create_date"));
            merge_str(&mut base.update_date, payload.get("update_date"));
        }
        self.merge_extra_from_external(payload);
    }

    /// Merge a storage row keyed by *column name* (lowercase, the storage
    /// system's casing) with the same partial-update semantics.
    fn populate_from_storage_row(&mut self, row: &Map<String, Value>) {
        {
            let base = self.base_mut();
            merge_i64(&mut base.id, row.get("id"));
            merge_i64(&mut base.is_deleted, row.get("isdeleted"));
            merge_str(&mut base.create_date, row.get("createdate"));
            merge_str(&mut base.update_date, row.get("updatedate"));
        }
        self.merge_extra_from_storage(row);
    }

    /// Every field name mapped to its current value, in declaration order.
    /// Mapping and table metadata are not part of the record.
    fn plain_record(&self) -> Map<String, Value> {
        let base = self.base();
        let mut record = Map::new();
        record.insert("id".to_string(), Value::from(base.id));
        record.insert("is_deleted".to_string(), Value::from(base.is_deleted));
        record.insert(
            "create_date".to_string(),
            Value::from(base.create_date.clone()),
        );
        record.insert(
            "update_date".to_string(),
            Value::from(base.update_date.clone()),
        );
        for (field, value) in self.extra_values() {
            record.insert(field.to_string(), value);
        }
        record
    }

    /// Every column name mapped to its current value, in declaration order.
    fn storage_row(&self) -> Map<String, Value> {
        let record = self.plain_record();
        let mut row = Map::new();
        for fc in Self::columns() {
            if let Some(value) = record.get(fc.field) {
                row.insert(fc.column.to_string(), value.clone());
            }
        }
        row
    }

    /// Column name for a field name.
    fn column_for_field(field: &str) -> Option<&'static str> {
        Self::columns()
            .iter()
            .find(|fc| fc.field == field)
            .map(|fc| fc.column)
    }

    /// Reverse lookup: field name for a column name, first match.
    fn field_for_column(column: &str) -> Option<&'static str> {
        Self::columns()
            .iter()
            .find(|fc| fc.column == column)
            .map(|fc| fc.field)
    }
}

/// Assign `value` onto `target` only if it is a JSON integer.
pub fn merge_i64(target: &mut i64, value: Option<&Value>) {
    if let Some(v) = value.and_then(Value::as_i64) {
        *target = v;
    }
}

/// Assign `value` onto `target` only if it is a JSON string.
pub fn merge_str(target: &mut String, value: Option<&Value>) {
    if let Some(v) = value.and_then(Value::as_str) {
        *target = v.to_string();
    }
}

/// Assign `value` onto `target` only if it is a JSON number.
pub fn merge_f64(target: &mut f64, value: Option<&Value>) {
    if let Some(v) = value.and_then(Value::as_f64) {
        *target = v;
    }
}

/// Assign `value` onto `target` only if it is a JSON boolean.
pub fn merge_bool(target: &mut bool, value: Option<&Value>) {
    if let Some(v) = value.and_then(Value::as_bool) {
        *target = v;
    }
}

/// Current time as an ISO-8601 string with millisecond precision.
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
