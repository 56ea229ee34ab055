//! Parser infrastructure for JPQL 3.1.
//!
//! A hand-written recursive-descent parser producing a green tree via
//! Rowan's `GreenNodeBuilder`. The grammar productions live in
//! [`super::grammar`]; this module owns the token cursor, the builder
//! wrappers, and error bookkeeping.
//!
//! ## Error handling
//!
//! There is no recovery: the first unexpected token records a single error
//! and switches the parser into bailed mode, where every cursor operation is
//! a no-op. Open nodes close as the recursion unwinds, and whatever input
//! remains is wrapped in one `Error` node so the tree always accounts for
//! the full source. Callers decide what an invalid parse means:
//! fail-fast operations surface the recorded error, permissive ones treat
//! the query as not-JPQL.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, Language, TextRange, TextSize};

use super::kind::{JpqlLanguage, SyntaxKind, SyntaxNode};
use super::lexer::{lex, token_text, Token};

/// A parse error with the span it was detected at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub range: TextRange,
    pub message: String,
}

impl ParseError {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse result: the green tree plus any errors.
///
/// The tree always covers the entire input; on error the unconsumed rest is
/// held by an `Error` node.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Creates a typed view over the immutable green tree. Cheap - the view
    /// is a thin wrapper with parent pointers.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Nesting limit for expressions and subqueries. Generous for any real
/// query while keeping adversarial input from overflowing the stack.
const MAX_DEPTH: u32 = 256;

/// Main entry point. Always returns a tree; errors ride alongside.
pub fn parse(source: &str) -> Parse {
    let mut parser = Parser::new(source);
    parser.parse_root();
    parser.finish()
}

pub(crate) struct Parser<'src> {
    source: &'src str,
    /// Significant tokens only - whitespace is dropped up front since the
    /// renderer fully normalizes spacing.
    tokens: Vec<Token>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
    depth: u32,
    /// Set on the first error; turns every cursor operation into a no-op so
    /// the recursion unwinds without consuming input.
    bailed: bool,
    /// Number of `start_node` calls skipped after bailing. Their matching
    /// `finish_node` calls are skipped too, keeping the builder balanced:
    /// nodes opened before the error still close as the recursion unwinds.
    skipped_starts: u32,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        let tokens = lex(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            source,
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            depth: 0,
            bailed: false,
            skipped_starts: 0,
        }
    }

    pub(crate) fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    /// Anything left over (bailed input, trailing garbage) becomes one
    /// `Error` node so the tree spans the whole source. Must run while the
    /// enclosing node (`Root`) is still open, since the tree has a single
    /// root and this is its last child.
    pub(crate) fn wrap_trailing_input_in_error_node(&mut self) {
        if self.pos < self.tokens.len() {
            if !self.bailed {
                self.unexpected("end of query");
            }
            self.builder
                .start_node(JpqlLanguage::kind_to_raw(SyntaxKind::Error));
            while self.pos < self.tokens.len() {
                let token = self.tokens[self.pos];
                self.builder.token(
                    JpqlLanguage::kind_to_raw(token.kind),
                    token_text(self.source, &token),
                );
                self.pos += 1;
            }
            self.builder.finish_node();
        }
    }

    // =====================================================================
    // Cursor
    // =====================================================================

    /// Current token kind; `Eof` past the end or once bailed.
    pub(crate) fn current(&self) -> SyntaxKind {
        if self.bailed {
            return SyntaxKind::Eof;
        }
        self.nth(0)
    }

    /// Lookahead by `n` tokens (0 = current), ignoring bailed state.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map_or(SyntaxKind::Eof, |t| t.kind)
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// True when the current token may act as an identifier (`Ident` plus
    /// the unreserved keywords `count`, `order`, `key`).
    pub(crate) fn at_identifier(&self) -> bool {
        self.current().is_identifier_like()
    }

    pub(crate) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(crate) fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    // =====================================================================
    // Tree building
    // =====================================================================

    /// Consume the current token into the tree. No-op when bailed or at EOF.
    pub(crate) fn bump(&mut self) {
        if self.bailed || self.pos >= self.tokens.len() {
            return;
        }
        let token = self.tokens[self.pos];
        self.builder.token(
            JpqlLanguage::kind_to_raw(token.kind),
            token_text(self.source, &token),
        );
        self.pos += 1;
    }

    /// Consume the current token if it has the expected kind; otherwise
    /// record an error describing `what`.
    pub(crate) fn expect(&mut self, kind: SyntaxKind, what: &str) {
        if self.at(kind) {
            self.bump();
        } else {
            self.unexpected(what);
        }
    }

    /// Consume an identifier-like token or error.
    pub(crate) fn expect_identifier(&mut self, what: &str) {
        if self.at_identifier() {
            self.bump();
        } else {
            self.unexpected(what);
        }
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        if self.bailed {
            self.skipped_starts += 1;
            return;
        }
        self.builder.start_node(JpqlLanguage::kind_to_raw(kind));
    }

    pub(crate) fn finish_node(&mut self) {
        if self.skipped_starts > 0 {
            self.skipped_starts -= 1;
            return;
        }
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.builder.checkpoint()
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        if self.bailed {
            self.skipped_starts += 1;
            return;
        }
        self.builder
            .start_node_at(checkpoint, JpqlLanguage::kind_to_raw(kind));
    }

    // =====================================================================
    // Errors and limits
    // =====================================================================

    /// Record an error at the current position and bail.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        if self.bailed {
            return;
        }
        self.errors.push(ParseError::new(self.current_span(), message));
        self.bailed = true;
    }

    /// Record an "expected X" error at the current position.
    pub(crate) fn unexpected(&mut self, what: &str) {
        if self.bailed {
            return;
        }
        let message = if self.pos >= self.tokens.len() {
            format!("expected {what} but found end of query")
        } else {
            format!("expected {what} but found '{}'", self.current_text())
        };
        self.error(message);
    }

    /// Guard recursive productions. Pair with [`Self::exit_recursion`].
    pub(crate) fn enter_recursion(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            self.error("query nesting too deep");
            return false;
        }
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.depth -= 1;
    }
}
