//! Ordering clauses for the query builder

/// Sort direction for an ORDER BY clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// One accumulated ORDER BY entry: a column list sharing one direction.
#[derive(Debug, Clone)]
pub struct OrderClause {
    pub columns: Vec<String>,
    pub order: SortOrder,
}

impl OrderClause {
    pub fn new(columns: Vec<String>, order: SortOrder) -> Self {
        Self { columns, order }
    }
}
