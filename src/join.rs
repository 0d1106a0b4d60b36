//! Multi-entity join accessor
//!
//! A [`JoinDao`] composes two or more mapped entities into one query. Each
//! participant contributes column-aliased select fragments
//! (`<column> AS table<N>_<column>`, 1-indexed by participation order) so
//! one flat result row can be demultiplexed unambiguously back into
//! per-entity records.

use crate::entity::{Entity, FieldColumn, ALIVE};
use crate::gateway::{Gateway, Record};
use crate::query_builder::{CompareOp, SqlGenerator};
use crate::validation::ValidatedIdentifier;
use serde_json::Value;
use std::sync::Arc;

/// Optional per-participant filter predicate, keyed by field name and
/// parameter-bound like every other value.
#[derive(Debug, Clone)]
pub struct JoinFilter {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl JoinFilter {
    pub fn new(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

/// Ordering and paging options for a join execution.
#[derive(Debug, Clone, Default)]
pub struct JoinOptions {
    /// Aliased result columns (`table<N>_<column>`) to order by.
    pub order_by: Vec<String>,
    /// Applies one DESC suffix to the whole ORDER BY list.
    pub descending: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

struct Participant {
    table: &'static str,
    columns: &'static [FieldColumn],
}

/// Builder and executor for a composed multi-entity query.
pub struct JoinDao {
    gateway: Arc<dyn Gateway>,
    participants: Vec<Participant>,
    query: String,
    values: Vec<Value>,
    counter: usize,
    broken: bool,
}

impl JoinDao {
    /// Seed the join with its first participating entity type; the base
    /// sub-select aliases every column as `table1_<column>` and filters to
    /// live rows.
    pub fn new<E: Entity>(gateway: Arc<dyn Gateway>, filter: Option<JoinFilter>) -> Self {
        let mut dao = Self {
            gateway,
            participants: Vec::new(),
            query: String::new(),
            values: Vec::new(),
            counter: 1,
            broken: false,
        };
        dao.participants.push(Participant {
            table: E::table_name(),
            columns: E::columns(),
        });
        dao.query = dao.subselect(0, filter);
        dao
    }

    /// Join another entity type onto the accumulated query. The accumulated
    /// query becomes the left sub-select, the new participant is aliased as
    /// `table<N>_`, and the two combine via `INNER JOIN ... ON left = right`
    /// where both refs are caller-supplied aliased-column names.
    pub fn inner_join<E: Entity>(
        mut self,
        left_ref: &str,
        right_ref: &str,
        filter: Option<JoinFilter>,
    ) -> Self {
        let (left, right) = match (
            ValidatedIdentifier::new(left_ref),
            ValidatedIdentifier::new(right_ref),
        ) {
            (Ok(left), Ok(right)) => (left, right),
            _ => {
                tracing::warn!(left_ref, right_ref, "invalid join key reference");
                self.broken = true;
                return self;
            }
        };

        self.participants.push(Participant {
            table: E::table_name(),
            columns: E::columns(),
        });
        let sub = self.subselect(self.participants.len() - 1, filter);
        self.query = format!(
            "SELECT * FROM ({}) AS t1 INNER JOIN ({}) AS t2 ON {} = {}",
            self.query, sub, left, right
        );
        self
    }

    /// Run the composed query and demultiplex each flat row into one
    /// [`JoinRow`]. `None` with fewer than two participants, for a join
    /// built from invalid key references, or on gateway failure.
    pub async fn execute(&self, options: JoinOptions) -> Option<Vec<JoinRow>> {
        if self.participants.len() < 2 {
            tracing::warn!("join requires at least two participating entities");
            return None;
        }
        if self.broken {
            return None;
        }

        let mut sql = self.query.clone();
        let mut values = self.values.clone();
        let mut counter = self.counter;

        if !options.order_by.is_empty() {
            let columns: Vec<String> = options
                .order_by
                .iter()
                .filter_map(|name| {
                    let validated = ValidatedIdentifier::new(name).ok();
                    if validated.is_none() {
                        tracing::warn!(name = %name, "dropping invalid join order-by column");
                    }
                    validated.map(ValidatedIdentifier::into_string)
                })
                .collect();
            if !columns.is_empty() {
                sql.push_str(&format!(" ORDER BY {}", columns.join(", ")));
                if options.descending {
                    sql.push_str(" DESC");
                }
            }
        }

        if let Some(limit) = options.limit {
            sql.push_str(&format!(" LIMIT {}", SqlGenerator::placeholder(&mut counter)));
            values.push(Value::from(limit));
        }
        if let Some(offset) = options.offset {
            sql.push_str(&format!(
                " OFFSET {}",
                SqlGenerator::placeholder(&mut counter)
            ));
            values.push(Value::from(offset));
        }

        let result = self.gateway.execute(&sql, &values).await?;
        Some(
            result
                .rows
                .iter()
                .map(|row| self.demultiplex(row))
                .collect(),
        )
    }

    fn subselect(&mut self, index: usize, filter: Option<JoinFilter>) -> String {
        let (table, columns) = {
            let participant = &self.participants[index];
            (participant.table, participant.columns)
        };
        let alias_index = index + 1;

        let select_list: Vec<String> = columns
            .iter()
            .map(|fc| format!("{} AS table{}_{}", fc.column, alias_index, fc.column))
            .collect();

        let mut sql = format!("SELECT {} FROM {} WHERE ", select_list.join(", "), table);

        if let Some(filter) = filter {
            let column = columns
                .iter()
                .find(|fc| fc.field == filter.field)
                .map(|fc| fc.column)
                .unwrap_or(filter.field.as_str());
            match ValidatedIdentifier::new(column) {
                Ok(column) => {
                    sql.push_str(&format!(
                        "{} {} {} AND ",
                        column,
                        filter.op.to_sql(),
                        SqlGenerator::placeholder(&mut self.counter)
                    ));
                    self.values.push(filter.value);
                }
                Err(_) => {
                    tracing::warn!(field = %filter.field, "invalid join filter field");
                    self.broken = true;
                }
            }
        }

        sql.push_str(&format!(
            "isdeleted = {}",
            SqlGenerator::placeholder(&mut self.counter)
        ));
        self.values.push(Value::from(ALIVE));
        sql
    }

    fn demultiplex(&self, row: &Record) -> JoinRow {
        let mut parts = vec![Record::new(); self.participants.len()];
        for (key, value) in row {
            let Some(rest) = key.strip_prefix("table") else {
                continue;
            };
            let Some(split) = rest.find('_') else {
                continue;
            };
            let Ok(index) = rest[..split].parse::<usize>() else {
                continue;
            };
            if index >= 1 && index <= parts.len() {
                parts[index - 1].insert(rest[split + 1..].to_string(), value.clone());
            }
        }
        JoinRow { parts }
    }
}

/// One demultiplexed result row: a column-keyed record per participant, in
/// participation order.
#[derive(Debug, Clone)]
pub struct JoinRow {
    parts: Vec<Record>,
}

impl JoinRow {
    /// The raw demultiplexed record for participant `index` (0-based).
    pub fn part(&self, index: usize) -> Option<&Record> {
        self.parts.get(index)
    }

    /// Reconstitute participant `index` as an entity through the field
    /// merge codec.
    pub fn decode<E: Entity>(&self, index: usize) -> Option<E> {
        let part = self.parts.get(index)?;
        let mut entity = E::default();
        entity.populate_from_storage_row(part);
        Some(entity)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
