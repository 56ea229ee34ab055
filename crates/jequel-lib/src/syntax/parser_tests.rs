use indoc::indoc;

use super::kind::SyntaxKind;
use super::parser::{parse, ParseError};

fn assert_parses(query: &str) {
    let parse = parse(query);
    assert!(
        parse.is_valid(),
        "expected {query:?} to parse, got {:?}",
        parse.errors()
    );
}

fn first_error(query: &str) -> ParseError {
    let parse = parse(query);
    assert!(!parse.is_valid(), "expected {query:?} to fail");
    parse.errors().first().cloned().unwrap()
}

fn contains_node(query: &str, kind: SyntaxKind) -> bool {
    let parse = parse(query);
    assert!(parse.is_valid(), "{:?}", parse.errors());
    parse.syntax().descendants().any(|node| node.kind() == kind)
}

// ---------------------------------------------------------------------
// Statements and clauses
// ---------------------------------------------------------------------

#[test]
fn minimal_select() {
    assert_parses("select u from User u");
    assert_parses("SELECT u FROM User AS u");
}

#[test]
fn select_with_all_clauses() {
    assert_parses(indoc! {"
        select u.role, count(u) from User u
        where u.active = true
        group by u.role
        having count(u) > 5
        order by u.role asc
    "});
}

#[test]
fn update_statement() {
    assert_parses("update User u set u.active = false");
    assert_parses("update User set active = false, role = 'none'");
    assert_parses("update User u set u.login = null where u.expired = true");
    assert!(contains_node(
        "update User u set u.active = false",
        SyntaxKind::UpdateItem
    ));
}

#[test]
fn delete_statement() {
    assert_parses("delete from User u where u.active = false");
    assert_parses("delete from User");
}

#[test]
fn multiple_range_declarations() {
    assert_parses("select u from User u, Company c where u.company = c");
}

#[test]
fn collection_member_declaration() {
    assert_parses("select a from User u, in (u.addresses) a");
    assert!(contains_node(
        "select a from User u, in (u.addresses) as a",
        SyntaxKind::CollectionMemberDecl
    ));
}

#[test]
fn joins() {
    assert_parses("select u from User u join u.company c");
    assert_parses("select u from User u inner join u.company c");
    assert_parses("select u from User u left join u.orders o");
    assert_parses("select u from User u left outer join u.orders o");
    assert_parses("select u from User u join u.orders o on o.total > 10");
    assert_parses("select u from User u left join fetch u.roles");
    assert_parses("select u from User u join u.address.country c");
}

#[test]
fn treat_in_join_and_path() {
    assert_parses("select b from Order o join treat(o.items as Book) b");
    assert_parses("select u from User u where treat(u.pet as Dog).barks = true");
    assert!(contains_node(
        "select b from Order o join treat(o.items as Book) b",
        SyntaxKind::TreatedPath
    ));
}

#[test]
fn qualified_map_paths() {
    assert_parses("select key(p), value(p) from User u join u.phones p");
    assert_parses("select entry(p) from User u join u.phones p");
    assert_parses("select key(p).area from User u join u.phones p");
}

#[test]
fn entity_names_may_be_unreserved_keywords() {
    assert_parses("select o from Order o order by o.id");
    assert_parses("select count from Count count");
}

// ---------------------------------------------------------------------
// Conditionals
// ---------------------------------------------------------------------

#[test]
fn comparison_forms() {
    assert_parses("select u from User u where u.age = 18");
    assert_parses("select u from User u where u.age <> 18");
    assert_parses("select u from User u where u.age != 18");
    assert_parses("select u from User u where u.age >= 18 and u.age <= 65");
    assert_parses("select u from User u where u.a < 1 or u.b > 2");
    assert_parses("select u from User u where not (u.a = 1 or u.b = 2)");
}

#[test]
fn grouped_condition_vs_grouped_arithmetic() {
    assert_parses("select u from User u where (u.a = 1 or u.b = 2) and u.c = 3");
    assert_parses("select u from User u where (u.a + 1) * 2 > u.b");
}

#[test]
fn nested_grouped_conditions() {
    assert_parses("select u from User u where ((u.a = 1))");
    assert_parses("select u from User u where ((u.a = 1) or u.b = 2) and u.c = 3");
    // the predicate inside the subquery must not make the outer parens a
    // conditional group
    assert_parses(
        "select u from User u where (u.total + (select count(o) from Order o where o.user = u)) > 5",
    );
    assert_parses("select u from User u where (case when u.a = 1 then 1 else 0 end) > 0");
}

#[test]
fn between_like_in_member() {
    assert_parses("select u from User u where u.age between 18 and 65");
    assert_parses("select u from User u where u.age not between 18 and 65");
    assert_parses("select u from User u where u.name like 'a%'");
    assert_parses("select u from User u where u.name not like 'a%' escape '/'");
    assert_parses("select u from User u where u.name like :pattern");
    assert_parses("select u from User u where u.status in ('new', 'open')");
    assert_parses("select u from User u where u.status not in (?1, ?2)");
    assert_parses("select u from User u where u.status in :statuses");
    assert_parses("select u from User u where :role member of u.roles");
    assert_parses("select u from User u where u.boss not member u.reports");
}

#[test]
fn null_and_empty_checks() {
    assert_parses("select u from User u where u.deletedAt is null");
    assert_parses("select u from User u where u.deletedAt is not null");
    assert_parses("select u from User u where u.roles is empty");
    assert_parses("select u from User u where u.roles is not empty");
    assert_parses("select u from User u where ?1 is null");
}

#[test]
fn exists_and_quantified_subqueries() {
    assert_parses("select u from User u where exists (select o from Order o where o.user = u)");
    assert_parses("select u from User u where not exists (select o from o.orders o)");
    assert_parses("select e from Employee e where e.salary > all (select m.salary from Manager m)");
    assert_parses("select e from Employee e where e.salary >= any (select m.salary from Manager m)");
    assert_parses("select e from Employee e where e.salary = some (select m.salary from Manager m)");
}

#[test]
fn subquery_in_expressions() {
    assert_parses("select u from User u where u.age > (select avg(v.age) from User v)");
    assert_parses("select u from User u where u.id in (select o.userId from Order o)");
    assert_parses("select u, (select count(o) from Order o where o.user = u) from User u");
}

#[test]
fn type_discriminator() {
    assert_parses("select u from User u where type(u) = Admin");
    assert_parses("select u from User u where type(u) in (Admin, Auditor)");
    assert_parses("select u from User u where type(u) <> type(?1)");
}

// ---------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------

#[test]
fn arithmetic_precedence_shape() {
    assert_parses("select u.price * u.qty + 1 from OrderLine u");
    assert_parses("select -u.balance from Account u");
    let parse = parse("select u.a + u.b * u.c from T u");
    assert!(parse.is_valid());
    // the multiplicative chain nests under the additive one
    let root = parse.syntax();
    let arith = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::ArithExpr)
        .unwrap();
    assert!(arith
        .descendants()
        .any(|n| n.kind() == SyntaxKind::ArithTerm));
}

#[test]
fn function_library() {
    assert_parses("select length(u.name) from User u");
    assert_parses("select locate('a', u.name) from User u");
    assert_parses("select locate('a', u.name, 2) from User u");
    assert_parses("select abs(u.balance), ceiling(u.a), floor(u.b) from Account u");
    assert_parses("select exp(u.a), ln(u.b), sign(u.c), sqrt(u.d) from T u");
    assert_parses("select mod(u.a, 3), power(u.a, 2), round(u.a, 2) from T u");
    assert_parses("select size(u.roles), index(r) from User u join u.roles r");
    assert_parses("select concat(u.first, ' ', u.last) from User u");
    assert_parses("select substring(u.name, 1, 3) from User u");
    assert_parses("select lower(u.name), upper(u.name) from User u");
    assert_parses("select coalesce(u.nickname, u.name, '?') from User u");
    assert_parses("select nullif(u.role, 'none') from User u");
}

#[test]
fn trim_variants() {
    assert_parses("select trim(u.name) from User u");
    assert_parses("select trim(leading from u.name) from User u");
    assert_parses("select trim(trailing '.' from u.name) from User u");
    assert_parses("select trim(both '.' from u.name) from User u");
    assert_parses("select trim('.' from u.name) from User u");
    assert_parses("select trim(:pad from u.name) from User u");
}

#[test]
fn datetime_functions_and_literals() {
    assert_parses("select u from User u where u.created < current_timestamp");
    assert_parses("select current_date, current_time from User u");
    assert_parses("select local date, local time, local datetime from User u");
    assert_parses("select extract(year from u.created) from User u");
    assert_parses("select u from User u where u.created = '2023-01-01 00:00:00'");
}

#[test]
fn user_defined_functions() {
    assert_parses("select function('soundex', u.name) from User u");
    assert_parses("select u from User u where function('is_vip', u.id) = true");
}

#[test]
fn case_expressions() {
    assert_parses("select case when u.age >= 18 then 'adult' else 'minor' end from User u");
    assert_parses(
        "select case when u.a = 1 then 1 when u.b = 2 then 2 else 0 end from User u",
    );
    assert_parses("select case u.status when 'new' then 1 else 0 end from User u");
    assert_parses("select case type(u) when Admin then 1 else 0 end from User u");
}

#[test]
fn aggregates() {
    assert_parses("select avg(u.age), max(u.age), min(u.age), sum(u.age) from User u");
    assert_parses("select count(u) from User u");
    assert_parses("select count(distinct u.name) from User u");
    // shape of derived count queries over multi-item distinct projections
    assert_parses("select count(distinct u.name, u.role) from User u");
}

#[test]
fn order_by_accepts_function_wrapped_keys() {
    // shape of sorted rewrites with case folding
    assert_parses("select u from User u order by lower(u.name) desc, u.id asc");
}

#[test]
fn constructor_expression() {
    assert_parses("select new com.example.Dto(u.a, u.b) from User u");
    assert_parses("select new Dto(count(u), u.role) from User u group by u.role");
    assert!(contains_node(
        "select new com.example.Dto(u.a) from User u",
        SyntaxKind::ConstructorExpr
    ));
}

#[test]
fn object_select() {
    assert_parses("select object(u) from User u");
}

#[test]
fn input_parameters() {
    assert_parses("select u from User u where u.id = ?1");
    assert_parses("select u from User u where u.name = :name and u.age > :age");
}

#[test]
fn enum_and_entity_literals() {
    assert_parses("select u from User u where u.status = com.example.Status.ACTIVE");
    assert_parses("select u from User u where u.role = true or u.flag = false");
}

#[test]
fn spel_escapes() {
    assert_parses("select u from #{#entityName} u");
    assert_parses("select u from User u where u.name = #{#[0]}");
    assert_parses("select u from User u where u.name like #{escape([0])}");
    assert_parses("select u from User u where u.name like #{escape('foo')}");
    assert!(contains_node("select u from #{#entityName} u", SyntaxKind::SpelExpr));
}

#[test]
fn result_variables() {
    assert_parses("select u.name as n from User u order by n");
    assert_parses("select u.name n from User u");
    assert_parses("select avg(u.age) as a from User u order by a desc");
}

// ---------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------

#[test]
fn empty_input_is_an_error() {
    let error = first_error("");
    assert!(error.message.contains("end of query"), "{}", error.message);
}

#[test]
fn statement_keyword_required() {
    let error = first_error("frm User u");
    assert!(
        error.message.contains("'select', 'update' or 'delete'"),
        "{}",
        error.message
    );
}

#[test]
fn missing_from_clause() {
    let error = first_error("select u");
    assert!(error.message.contains("'from'"), "{}", error.message);
}

#[test]
fn trailing_garbage_is_an_error() {
    let error = first_error("select u from User u banana split");
    assert!(error.message.contains("banana"), "{}", error.message);
}

#[test]
fn error_position_points_at_the_offending_token() {
    let error = first_error("select u from User u where u.age >");
    assert!(error.message.contains("expected an expression"), "{}", error.message);

    let error = first_error("select u frm User u");
    // `frm` is consumed as a result variable; the from clause then trips
    // over `User`
    assert_eq!(u32::from(error.range.start()), 13);
}

#[test]
fn only_the_first_error_is_recorded() {
    let parse = parse("select from where");
    assert_eq!(parse.errors().len(), 1);
}

#[test]
fn tree_always_covers_the_whole_input() {
    let parse = parse("select u from User u banana");
    assert_eq!(parse.syntax().text().to_string(), "selectufromUserubanana");
}

#[test]
fn nesting_depth_is_bounded() {
    let query = format!(
        "select u from User u where {}u.a = 1{}",
        "(".repeat(300),
        ")".repeat(300)
    );
    let error = first_error(&query);
    assert!(error.message.contains("nesting"), "{}", error.message);
}

#[test]
fn unrecognized_characters_are_reported() {
    let error = first_error("select u from User u where u.a = ^");
    assert!(error.message.contains("expected an expression"), "{}", error.message);
}
