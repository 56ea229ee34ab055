//! JPQL 3.1 grammar productions.
//!
//! Split in two: [`statements`] covers the statement and clause level
//! (select/update/delete, from and joins, grouping and ordering,
//! subqueries), [`expressions`] the conditional and scalar expression
//! grammar, paths, functions and literals.
//!
//! The productions follow the Jakarta Persistence 3.1 BNF with two
//! syntax-preserving collapses:
//!
//! - The BNF's typed expression split (string vs arithmetic vs datetime vs
//!   boolean vs enum expressions) exists to support semantic checking; the
//!   alternatives overlap syntactically. One scalar-expression grammar
//!   accepts the same surface language.
//! - The path productions (state-field, single-valued-object and
//!   collection-valued paths) are indistinguishable without a metamodel and
//!   render identically; they parse as one `PathExpr` node.

mod expressions;
mod statements;
