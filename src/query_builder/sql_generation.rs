//! SQL clause assembly
//!
//! Every value is emitted as a `$n` placeholder and collected into a
//! parameter vector; values are never interpolated into the query text.
//! Identifiers (table and column names) are the caller's responsibility and
//! are validated before they reach this module.

use crate::query_builder::filter::WhereToken;
use crate::query_builder::ordering::OrderClause;
use serde_json::Value;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Next positional placeholder, advancing the counter.
    pub fn placeholder(counter: &mut usize) -> String {
        let param = format!("${}", counter);
        *counter += 1;
        param
    }

    /// Render the accumulated WHERE tokens in order, pushing predicate
    /// values into `values`. Returns an empty string for no tokens.
    pub fn build_where_tokens(
        tokens: &[WhereToken],
        values: &mut Vec<Value>,
        counter: &mut usize,
    ) -> String {
        tokens
            .iter()
            .map(|token| match token {
                WhereToken::Predicate(p) => {
                    let placeholder = Self::placeholder(counter);
                    values.push(p.value.clone());
                    format!("{} {} {}", p.column, p.op.to_sql(), placeholder)
                }
                WhereToken::And => "AND".to_string(),
                WhereToken::Or => "OR".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render ORDER BY, or an empty string without clauses.
    pub fn build_order_clause(order_by: &[OrderClause]) -> String {
        if order_by.is_empty() {
            return String::new();
        }

        let entries: Vec<String> = order_by
            .iter()
            .map(|clause| format!("{} {}", clause.columns.join(", "), clause.order.to_sql()))
            .collect();

        format!("ORDER BY {}", entries.join(", "))
    }

    /// Render LIMIT/OFFSET with bound values.
    pub fn build_limit_clause(
        limit: Option<i64>,
        offset: Option<i64>,
        values: &mut Vec<Value>,
        counter: &mut usize,
    ) -> String {
        let mut clauses = Vec::new();

        if let Some(limit) = limit {
            clauses.push(format!("LIMIT {}", Self::placeholder(counter)));
            values.push(Value::from(limit));
        }

        if let Some(offset) = offset {
            clauses.push(format!("OFFSET {}", Self::placeholder(counter)));
            values.push(Value::from(offset));
        }

        clauses.join(" ")
    }

    /// Placeholder list `($n, $n+1, ...)` for an IN clause, binding `ids`.
    pub fn build_in_list(ids: &[i64], values: &mut Vec<Value>, counter: &mut usize) -> String {
        let placeholders: Vec<String> = ids
            .iter()
            .map(|id| {
                values.push(Value::from(*id));
                Self::placeholder(counter)
            })
            .collect();
        placeholders.join(", ")
    }
}
