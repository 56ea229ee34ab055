use crate::error::TransformError;
use crate::rewrite::SortOrder;
use crate::transform::{
    count_query, count_query_with_projection, detect_alias, has_constructor_expression,
    projection, rewrite, rewrite_with_sort, Transformation,
};

// ---------------------------------------------------------------------
// rewrite
// ---------------------------------------------------------------------

#[test]
fn rewrite_is_the_identity_on_normalized_queries() {
    let q = "select u from User u where u.age > 18";
    assert_eq!(rewrite(q).unwrap(), q);
}

#[test]
fn rewrite_rejects_invalid_queries() {
    let error = rewrite("this is not jpql").unwrap_err();
    let TransformError::InvalidQuery(syntax_error) = error;
    assert_eq!(syntax_error.line, 1);
    assert_eq!(syntax_error.column, 1);
    assert!(syntax_error.message.contains("'select', 'update' or 'delete'"));
}

#[test]
fn syntax_errors_carry_line_and_column() {
    let error = rewrite("select u\nfrom User u\nwhere u.age >").unwrap_err();
    let TransformError::InvalidQuery(syntax_error) = error;
    assert_eq!(syntax_error.line, 3);
    assert_eq!(syntax_error.column, 14);
    assert!(syntax_error.message.contains("expected an expression"));
}

// ---------------------------------------------------------------------
// sort injection
// ---------------------------------------------------------------------

#[test]
fn sort_appends_an_order_by_clause() {
    assert_eq!(
        rewrite_with_sort("select u from User u", &[SortOrder::asc("name")]).unwrap(),
        "select u from User u order by u.name asc"
    );
}

#[test]
fn sort_extends_an_existing_order_by_clause() {
    assert_eq!(
        rewrite_with_sort(
            "select u from User u order by u.id",
            &[SortOrder::desc("name")]
        )
        .unwrap(),
        "select u from User u order by u.id, u.name desc"
    );
}

#[test]
fn sort_ignore_case_wraps_in_lower() {
    assert_eq!(
        rewrite_with_sort(
            "select u from User u",
            &[SortOrder::desc("name").ignoring_case()]
        )
        .unwrap(),
        "select u from User u order by lower(u.name) desc"
    );
}

#[test]
fn multiple_sort_orders() {
    assert_eq!(
        rewrite_with_sort(
            "select u from User u",
            &[
                SortOrder::asc("name").ignoring_case(),
                SortOrder::desc("age"),
            ]
        )
        .unwrap(),
        "select u from User u order by lower(u.name) asc, u.age desc"
    );
}

#[test]
fn empty_sort_changes_nothing() {
    assert_eq!(
        rewrite_with_sort("select u from User u", &[]).unwrap(),
        "select u from User u"
    );
}

#[test]
fn sort_qualifies_with_the_captured_alias() {
    assert_eq!(
        rewrite_with_sort("select p from Person p", &[SortOrder::asc("name")]).unwrap(),
        "select p from Person p order by p.name asc"
    );
}

// ---------------------------------------------------------------------
// count queries
// ---------------------------------------------------------------------

#[test]
fn count_query_replaces_the_projection_with_the_alias() {
    assert_eq!(
        count_query("select u from User u").unwrap(),
        "select count(u) from User u"
    );
    assert_eq!(
        count_query("select u.name, u.role from User u").unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn count_query_preserves_distinct_select_items() {
    assert_eq!(
        count_query("select distinct u.name, u.role from User u").unwrap(),
        "select count(distinct u.name, u.role) from User u"
    );
}

#[test]
fn count_query_over_a_constructor_falls_back_to_the_alias() {
    assert_eq!(
        count_query("select new com.example.Dto(u.a, u.b) from User u").unwrap(),
        "select count(u) from User u"
    );
    assert_eq!(
        count_query("select distinct new com.example.Dto(u.a) from User u").unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn count_query_drops_the_order_by_clause() {
    assert_eq!(
        count_query("select u from User u order by u.name asc").unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn count_query_keeps_where_group_and_having() {
    assert_eq!(
        count_query(
            "select u.role from User u where u.active = true group by u.role having count(u) > 1"
        )
        .unwrap(),
        "select count(u) from User u where u.active = true group by u.role having count(u) > 1"
    );
}

#[test]
fn explicit_count_projection_wins() {
    assert_eq!(
        count_query_with_projection("select u from User u", Some("u.id")).unwrap(),
        "select count(u.id) from User u"
    );
    // the override replaces the whole projection, distinct included
    assert_eq!(
        count_query_with_projection("select distinct u.name from User u", Some("u.id")).unwrap(),
        "select count(u.id) from User u"
    );
}

#[test]
fn blank_count_projection_is_ignored() {
    assert_eq!(
        count_query_with_projection("select u from User u", Some("  ")).unwrap(),
        "select count(u) from User u"
    );
    assert_eq!(
        count_query_with_projection("select u from User u", None).unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn count_query_rejects_invalid_queries() {
    assert!(count_query("select from").is_err());
}

// ---------------------------------------------------------------------
// alias, projection, constructor flag
// ---------------------------------------------------------------------

#[test]
fn detect_alias_finds_the_range_variable() {
    assert_eq!(detect_alias("select u from User u").as_deref(), Some("u"));
    assert_eq!(detect_alias("select u from User as u").as_deref(), Some("u"));
    assert_eq!(
        detect_alias("select c from User u, Company c").as_deref(),
        Some("u")
    );
}

#[test]
fn detect_alias_is_permissive() {
    assert_eq!(detect_alias("not a query"), None);
    assert_eq!(detect_alias(""), None);
}

#[test]
fn detect_alias_on_statements_without_a_range_variable() {
    assert_eq!(detect_alias("update User u set u.active = false"), None);
}

#[test]
fn projection_renders_the_select_items() {
    assert_eq!(projection("select u.name, u.role from User u"), "u.name, u.role");
    assert_eq!(
        projection("select new com.example.Dto(u.a, u.b) from User u"),
        "new com.example.Dto(u.a, u.b)"
    );
    assert_eq!(projection("select count(u) from User u"), "count(u)");
}

#[test]
fn projection_is_empty_on_parse_failure() {
    assert_eq!(projection("not a query"), "");
}

#[test]
fn projection_ignores_the_count_projection_override() {
    let transformation =
        Transformation::new("select u.name from User u").with_count_projection("u.id");
    assert_eq!(transformation.projection(), "u.name");
    assert_eq!(
        transformation.count_query().unwrap(),
        "select count(u.id) from User u"
    );
}

#[test]
fn constructor_expression_detection() {
    assert!(has_constructor_expression(
        "select new com.example.Dto(u.a) from User u"
    ));
    assert!(!has_constructor_expression("select u from User u"));
    assert!(!has_constructor_expression("select 'new' from User u"));
    assert!(!has_constructor_expression("definitely not jpql"));
}

// ---------------------------------------------------------------------
// builder and debug render
// ---------------------------------------------------------------------

#[test]
fn builder_combines_sort_and_count() {
    let transformation = Transformation::new("select u from User u order by u.id")
        .with_sort([SortOrder::asc("name")]);
    assert_eq!(
        transformation.query().unwrap(),
        "select u from User u order by u.id, u.name asc"
    );
    // the same configuration derives the count query with ordering dropped
    assert_eq!(
        transformation.count_query().unwrap(),
        "select count(u) from User u"
    );
}

#[test]
fn debug_render_tags_tokens_and_breaks_clauses() {
    let rendered = Transformation::new("select u from User u")
        .debug_render(true)
        .query()
        .unwrap();
    assert_eq!(
        rendered,
        "select[SelectClause]u[PathExpr]\nfrom[FromClause]User[EntityName]u[RangeDecl]"
    );
}

#[test]
fn debug_render_splits_every_clause() {
    let rendered = Transformation::new(
        "select u from User u where u.a = 1 group by u.b having u.c > 2 order by u.d",
    )
    .debug_render(true)
    .query()
    .unwrap();
    // from, where, group by, having, order by
    assert_eq!(rendered.matches('\n').count(), 5);
}
