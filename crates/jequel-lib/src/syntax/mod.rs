//! JPQL 3.1 lexer, parser, and syntax tree.
//!
//! # Architecture
//!
//! ```text
//! Source text → Lexer → Tokens → Parser → GreenNode → SyntaxNode
//!                                   ↓
//!                            Vec<ParseError>
//! ```
//!
//! - [`kind`]: one `SyntaxKind` enum for tokens (logos-derived, keywords
//!   case-insensitive) and node kinds, plus the Rowan `Language` glue.
//! - [`lexer`]: zero-copy tokenizer producing `Token { kind, span }` pairs;
//!   text is sliced from the source only when the tree is built.
//! - [`parser`]: recursive-descent parser building the tree with Rowan's
//!   `GreenNodeBuilder`. No recovery: the first error bails the parse and
//!   the remaining input is wrapped in an `Error` node.
//!
//! Two entry points mirror the two ways callers consume parse results:
//! [`parse`] is permissive (errors ride alongside the tree, the caller
//! treats an invalid parse as "not a JPQL query"), [`parse_fail_fast`]
//! surfaces the first error as a [`SyntaxError`] with line and column.

pub mod kind;
pub mod lexer;
pub mod parser;

mod grammar;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod parser_tests;

pub use kind::{JpqlLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use parser::{parse, Parse, ParseError};

use crate::error::SyntaxError;

/// Parse, surfacing the first error as a positioned [`SyntaxError`].
pub fn parse_fail_fast(query: &str) -> Result<Parse, SyntaxError> {
    let result = parse(query);
    match result.errors().first() {
        None => Ok(result),
        Some(error) => Err(SyntaxError::from_parse_error(query, error)),
    }
}
