//! Error types for the public API.

use crate::syntax::ParseError;

/// A syntax error with its position in the query string.
///
/// `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    /// Converts a span-based parse error into a positioned one.
    pub(crate) fn from_parse_error(source: &str, error: &ParseError) -> Self {
        let offset = usize::from(error.range.start()).min(source.len());
        let before = &source[..offset];
        let line = before.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = (offset - line_start) as u32 + 1;
        Self::new(error.message.clone(), line, column)
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Failure of a fail-fast façade operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The input did not parse as JPQL.
    InvalidQuery(SyntaxError),
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::InvalidQuery(error) => {
                write!(f, "not a valid JPQL query: {error}")
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::InvalidQuery(error) => Some(error),
        }
    }
}
