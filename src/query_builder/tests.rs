use crate::query_builder::{CompareOp, QueryBuilder, SortOrder, SqlGenerator};
use serde_json::json;

// ========================================
// WHERE token rendering
// ========================================

#[test]
fn empty_tokens_render_empty() {
    let mut values = Vec::new();
    let mut counter = 1;
    let clause = SqlGenerator::build_where_tokens(&[], &mut values, &mut counter);
    assert_eq!(clause, "");
    assert!(values.is_empty());
    assert_eq!(counter, 1);
}

#[test]
fn predicates_bind_values_in_order() {
    let mut query = QueryBuilder::new();
    query.push_predicate("name", CompareOp::Eq, json!("alice"));
    query.push_and();
    query.push_predicate("age", CompareOp::Gte, json!(21));

    let mut values = Vec::new();
    let mut counter = 1;
    let clause = SqlGenerator::build_where_tokens(&query.where_tokens, &mut values, &mut counter);

    assert_eq!(clause, "name = $1 AND age >= $2");
    assert_eq!(values, vec![json!("alice"), json!(21)]);
    assert_eq!(counter, 3);
}

#[test]
fn or_connective_renders_between_predicates() {
    let mut query = QueryBuilder::new();
    query.push_predicate("status", CompareOp::Ne, json!("closed"));
    query.push_or();
    query.push_predicate("owner", CompareOp::Like, json!("%smith%"));

    let mut values = Vec::new();
    let mut counter = 1;
    let clause = SqlGenerator::build_where_tokens(&query.where_tokens, &mut values, &mut counter);

    assert_eq!(clause, "status != $1 OR owner LIKE $2");
}

#[test]
fn missing_connective_is_preserved_verbatim() {
    // Two adjacent predicates with no connective yield an invalid clause.
    // That is the caller's contract as well as the caller's bug to fix.
    let mut query = QueryBuilder::new();
    query.push_predicate("a", CompareOp::Eq, json!(1));
    query.push_predicate("b", CompareOp::Eq, json!(2));

    let mut values = Vec::new();
    let mut counter = 1;
    let clause = SqlGenerator::build_where_tokens(&query.where_tokens, &mut values, &mut counter);

    assert_eq!(clause, "a = $1 b = $2");
}

#[test]
fn values_are_never_interpolated() {
    let mut query = QueryBuilder::new();
    query.push_predicate("name", CompareOp::Eq, json!("'; DROP TABLE users; --"));

    let mut values = Vec::new();
    let mut counter = 1;
    let clause = SqlGenerator::build_where_tokens(&query.where_tokens, &mut values, &mut counter);

    assert_eq!(clause, "name = $1");
    assert!(!clause.contains("DROP"));
    assert_eq!(values[0], json!("'; DROP TABLE users; --"));
}

// ========================================
// ORDER BY / LIMIT / OFFSET
// ========================================

#[test]
fn order_clause_joins_columns_per_entry() {
    let mut query = QueryBuilder::new();
    query.push_order(
        vec!["name".to_string(), "email".to_string()],
        SortOrder::Asc,
    );
    query.push_order(vec!["createdate".to_string()], SortOrder::Desc);

    let clause = SqlGenerator::build_order_clause(&query.order_by);
    assert_eq!(clause, "ORDER BY name, email ASC, createdate DESC");
}

#[test]
fn limit_and_offset_are_bound() {
    let mut values = Vec::new();
    let mut counter = 3;
    let clause = SqlGenerator::build_limit_clause(Some(10), Some(20), &mut values, &mut counter);

    assert_eq!(clause, "LIMIT $3 OFFSET $4");
    assert_eq!(values, vec![json!(10), json!(20)]);
    assert_eq!(counter, 5);
}

#[test]
fn limit_clause_empty_without_paging() {
    let mut values = Vec::new();
    let mut counter = 1;
    let clause = SqlGenerator::build_limit_clause(None, None, &mut values, &mut counter);
    assert_eq!(clause, "");
    assert!(values.is_empty());
}

#[test]
fn in_list_binds_every_id() {
    let mut values = Vec::new();
    let mut counter = 1;
    let list = SqlGenerator::build_in_list(&[3, 7, 11], &mut values, &mut counter);

    assert_eq!(list, "$1, $2, $3");
    assert_eq!(values, vec![json!(3), json!(7), json!(11)]);
}

// ========================================
// Builder lifecycle
// ========================================

#[test]
fn take_resets_all_accumulated_state() {
    let mut query = QueryBuilder::new();
    query.push_predicate("a", CompareOp::Eq, json!(1));
    query.push_order(vec!["a".to_string()], SortOrder::Asc);
    query.set_limit(5);
    query.set_offset(10);
    assert!(!query.is_empty());

    let taken = query.take();
    assert!(query.is_empty());
    assert_eq!(taken.where_tokens.len(), 1);
    assert_eq!(taken.limit, Some(5));
    assert_eq!(taken.offset, Some(10));
}
