//! JPQL 3.1 parsing and query rewriting.
//!
//! Given a JPQL source string, the engine parses it into a syntax tree,
//! walks the tree with a syntax-directed token emitter, and renders derived
//! queries:
//!
//! - a faithful re-rendering, optionally with additional sort ordering
//!   injected after any existing `order by`;
//! - a count variant for pagination, replacing the projection with a
//!   cardinality expression;
//! - the primary range-variable alias, the textual projection, and whether
//!   the projection uses a `NEW …(…)` constructor expression.
//!
//! # Example
//!
//! ```
//! use jequel_lib::{count_query, detect_alias, rewrite_with_sort, SortOrder};
//!
//! let q = "select u from User u";
//!
//! assert_eq!(detect_alias(q).as_deref(), Some("u"));
//! assert_eq!(count_query(q).unwrap(), "select count(u) from User u");
//! assert_eq!(
//!     rewrite_with_sort(q, &[SortOrder::asc("name")]).unwrap(),
//!     "select u from User u order by u.name asc",
//! );
//! ```
//!
//! Output is whitespace-normalized: exactly one space between tokens except
//! where the grammar glues them (dotted paths, call parentheses, commas),
//! which makes rewriting idempotent - re-parsing and re-rendering an output
//! yields the same string.

pub mod error;
pub mod rewrite;
pub mod syntax;

mod transform;

#[cfg(test)]
mod transform_tests;

pub use error::{SyntaxError, TransformError};
pub use rewrite::{Direction, SortOrder};
pub use transform::{
    count_query, count_query_with_projection, detect_alias, has_constructor_expression,
    projection, rewrite, rewrite_with_sort, Transformation,
};
