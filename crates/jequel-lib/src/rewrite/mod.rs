//! Query rewriting: the token emitter and its supporting types.
//!
//! The pipeline continues from [`crate::syntax`]:
//!
//! ```text
//! SyntaxNode → Emitter → TokenBuffer (+ captured state) → render → String
//! ```
//!
//! - [`token`]: output tokens with per-token trailing-whitespace policy and
//!   render-time-deferred text.
//! - [`sort`]: caller-supplied sort orders for injection.
//! - [`emitter`]: the syntax-directed walker - whitespace control, alias and
//!   projection capture, sort injection, count-query synthesis.
//! - [`render`]: token sequence → string, plain and debug variants.

pub mod emitter;
pub mod render;
pub mod sort;
pub mod token;


pub use emitter::{Emitter, Walked};
pub use sort::{Direction, SortOrder};
pub use token::{Deferred, QueryToken, Spacing, TokenBuffer, TokenText};
