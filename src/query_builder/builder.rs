//! Accumulated query-builder state
//!
//! A [`QueryBuilder`] collects filter tokens, ordering, limit, and offset
//! through chained calls. The owning DAO consumes the whole accumulated
//! state with [`QueryBuilder::take`] at each terminal execute, so the
//! builder is reusable afterwards but never carries state across executes.

use crate::query_builder::filter::{CompareOp, Predicate, WhereToken};
use crate::query_builder::ordering::{OrderClause, SortOrder};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) where_tokens: Vec<WhereToken>,
    pub(crate) order_by: Vec<OrderClause>,
    pub(crate) limit: Option<i64>,
    pub(crate) offset: Option<i64>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comparison predicate against a storage column.
    pub fn push_predicate(&mut self, column: impl Into<String>, op: CompareOp, value: Value) {
        self.where_tokens
            .push(WhereToken::Predicate(Predicate::new(column, op, value)));
    }

    /// Append an explicit AND connective.
    pub fn push_and(&mut self) {
        self.where_tokens.push(WhereToken::And);
    }

    /// Append an explicit OR connective.
    pub fn push_or(&mut self) {
        self.where_tokens.push(WhereToken::Or);
    }

    /// Append an ORDER BY entry for one or more columns.
    pub fn push_order(&mut self, columns: Vec<String>, order: SortOrder) {
        self.order_by.push(OrderClause::new(columns, order));
    }

    pub fn set_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    pub fn set_offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }

    /// True when nothing has been accumulated since the last reset.
    pub fn is_empty(&self) -> bool {
        self.where_tokens.is_empty()
            && self.order_by.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
    }

    /// Move the accumulated state out, leaving the builder empty.
    pub fn take(&mut self) -> QueryBuilder {
        std::mem::take(self)
    }
}
