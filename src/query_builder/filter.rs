//! Filter tokens for the query builder

use serde_json::Value;

/// Comparison operators accepted by `where_field`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,   // =
    Ne,   // !=
    Lt,   // <
    Gt,   // >
    Lte,  // <=
    Gte,  // >=
    Like, // LIKE
}

impl CompareOp {
    pub fn to_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Gte => ">=",
            CompareOp::Like => "LIKE",
        }
    }
}

/// Single comparison against one column
#[derive(Debug, Clone)]
pub struct Predicate {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

impl Predicate {
    pub fn new(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

/// One token of an accumulated WHERE clause.
///
/// Consecutive predicates must be joined by an explicit connective token;
/// omitting one produces an invalid clause, which is the caller's
/// responsibility (the builder does not insert implicit connectives).
#[derive(Debug, Clone)]
pub enum WhereToken {
    Predicate(Predicate),
    And,
    Or,
}
