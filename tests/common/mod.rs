//! Shared test fixtures: two mapped entities and a scripted gateway.

use async_trait::async_trait;
use rowstore::entity::{merge_i64, merge_str, UNASSIGNED_ID};
use rowstore::{Entity, EntityBase, ExecuteResult, FieldColumn, Gateway, Record};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct UserRecord {
    pub base: EntityBase,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Entity for UserRecord {
    fn table_name() -> &'static str {
        "users"
    }

    fn columns() -> &'static [FieldColumn] {
        const COLUMNS: &[FieldColumn] = &[
            FieldColumn::new("id", "id"),
            FieldColumn::new("is_deleted", "isdeleted"),
            FieldColumn::new("create_date", "createdate"),
            FieldColumn::new("update_date", "updatedate"),
            FieldColumn::new("name", "name"),
            FieldColumn::new("email", "email"),
            FieldColumn::new("password", "password"),
        ];
        COLUMNS
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn merge_extra_from_external(&mut self, payload: &Map<String, Value>) {
        merge_str(&mut self.name, payload.get("name"));
        merge_str(&mut self.email, payload.get("email"));
        merge_str(&mut self.password, payload.get("password"));
    }

    fn merge_extra_from_storage(&mut self, row: &Map<String, Value>) {
        merge_str(&mut self.name, row.get("name"));
        merge_str(&mut self.email, row.get("email"));
        merge_str(&mut self.password, row.get("password"));
    }

    fn extra_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", Value::from(self.name.clone())),
            ("email", Value::from(self.email.clone())),
            ("password", Value::from(self.password.clone())),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct TokenRecord {
    pub base: EntityBase,
    pub user_id: i64,
    pub jwt: String,
}

impl Default for TokenRecord {
    fn default() -> Self {
        Self {
            base: EntityBase::default(),
            user_id: UNASSIGNED_ID,
            jwt: String::new(),
        }
    }
}

impl Entity for TokenRecord {
    fn table_name() -> &'static str {
        "tokens"
    }

    fn columns() -> &'static [FieldColumn] {
        const COLUMNS: &[FieldColumn] = &[
            FieldColumn::new("id", "id"),
            FieldColumn::new("is_deleted", "isdeleted"),
            FieldColumn::new("create_date", "createdate"),
            FieldColumn::new("update_date", "updatedate"),
            FieldColumn::new("user_id", "userid"),
            FieldColumn::new("jwt", "jwt"),
        ];
        COLUMNS
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn merge_extra_from_external(&mut self, payload: &Map<String, Value>) {
        merge_i64(&mut self.user_id, payload.get("user_id"));
        merge_str(&mut self.jwt, payload.get("jwt"));
    }

    fn merge_extra_from_storage(&mut self, row: &Map<String, Value>) {
        merge_i64(&mut self.user_id, row.get("userid"));
        merge_str(&mut self.jwt, row.get("jwt"));
    }

    fn extra_values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("user_id", Value::from(self.user_id)),
            ("jwt", Value::from(self.jwt.clone())),
        ]
    }
}

/// Scripted gateway: hands out queued responses in order and records every
/// issued query with its bound parameters.
#[derive(Default)]
pub struct MockGateway {
    responses: Mutex<VecDeque<Option<ExecuteResult>>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response containing the given rows.
    pub fn push_rows(&self, rows: Vec<Value>) {
        let rows: Vec<Record> = rows
            .into_iter()
            .map(|v| v.as_object().cloned().expect("row must be a JSON object"))
            .collect();
        let columns = rows
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default();
        self.responses
            .lock()
            .unwrap()
            .push_back(Some(ExecuteResult { rows, columns }));
    }

    /// Queue a successful but empty result set.
    pub fn push_empty(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Some(ExecuteResult::default()));
    }

    /// Queue a gateway failure.
    pub fn push_failure(&self) {
        self.responses.lock().unwrap().push_back(None);
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call(&self, index: usize) -> (String, Vec<Value>) {
        self.calls.lock().unwrap()[index].clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn execute(&self, query: &str, params: &[Value]) -> Option<ExecuteResult> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), params.to_vec()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default()
    }
}
