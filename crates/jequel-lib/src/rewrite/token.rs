//! Output tokens and the buffer they accumulate in.
//!
//! The emitter produces [`QueryToken`]s, not text: each token carries its
//! trailing-whitespace policy, and its text may be deferred. Deferral exists
//! because injected sort keys reference the primary alias, which is captured
//! from the first range variable declaration - a point the walk may reach
//! *after* the tokens that need it. Deferred text resolves against the
//! finished walk state at render time.

use crate::syntax::SyntaxKind;

/// Whitespace policy *after* a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    Space,
    NoSpace,
}

/// Token text resolved at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// The captured primary alias.
    Alias,
    /// `alias.property` - an injected sort key.
    AliasPath(String),
}

impl Deferred {
    pub fn resolve(&self, alias: &str) -> String {
        match self {
            Deferred::Alias => alias.to_owned(),
            Deferred::AliasPath(property) => format!("{alias}.{property}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenText {
    Literal(String),
    Deferred(Deferred),
}

/// One output token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryToken {
    text: TokenText,
    /// The node kind this token was emitted for. Debug renders tag each
    /// token with it; plain renders ignore it.
    rule: SyntaxKind,
    spacing: Spacing,
    /// Render a line break before this token (debug renders only).
    line_break: bool,
    /// Token exists for debug renders only.
    debug_only: bool,
}

impl QueryToken {
    pub fn new(text: impl Into<String>, rule: SyntaxKind) -> Self {
        Self {
            text: TokenText::Literal(text.into()),
            rule,
            spacing: Spacing::Space,
            line_break: false,
            debug_only: false,
        }
    }

    pub fn spaced(text: impl Into<String>, rule: SyntaxKind, spacing: Spacing) -> Self {
        Self {
            spacing,
            ..Self::new(text, rule)
        }
    }

    pub fn deferred(deferred: Deferred, rule: SyntaxKind, spacing: Spacing) -> Self {
        Self {
            text: TokenText::Deferred(deferred),
            rule,
            spacing,
            line_break: false,
            debug_only: false,
        }
    }

    /// Resolution is idempotent and side-effect-free.
    pub fn resolve(&self, alias: &str) -> String {
        match &self.text {
            TokenText::Literal(text) => text.clone(),
            TokenText::Deferred(deferred) => deferred.resolve(alias),
        }
    }

    pub fn rule(&self) -> SyntaxKind {
        self.rule
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: Spacing) {
        self.spacing = spacing;
    }

    pub fn line_break(&self) -> bool {
        self.line_break
    }

    pub fn set_line_break(&mut self, line_break: bool) {
        self.line_break = line_break;
    }

    pub fn debug_only(&self) -> bool {
        self.debug_only
    }
}

/// Ordered token sequence.
///
/// Each emit method returns its own buffer which the caller appends; the
/// only permitted mutations are the ones below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    tokens: Vec<QueryToken>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: QueryToken) {
        self.tokens.push(token);
    }

    pub fn extend(&mut self, other: TokenBuffer) {
        self.tokens.extend(other.tokens);
    }

    /// Drop the last token, if any.
    pub fn clip(&mut self) {
        self.tokens.pop();
    }

    /// Switch the last token to [`Spacing::NoSpace`].
    pub fn nospace(&mut self) {
        if let Some(last) = self.tokens.last_mut() {
            last.set_spacing(Spacing::NoSpace);
        }
    }

    /// Switch the last token to [`Spacing::Space`].
    pub fn space(&mut self) {
        if let Some(last) = self.tokens.last_mut() {
            last.set_spacing(Spacing::Space);
        }
    }

    /// Flag the first token with a line break (debug renders split clauses).
    pub fn mark_clause_start(&mut self) {
        if let Some(first) = self.tokens.first_mut() {
            first.set_line_break(true);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn last(&self) -> Option<&QueryToken> {
        self.tokens.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryToken> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenBuffer {
    type Item = &'a QueryToken;
    type IntoIter = std::slice::Iter<'a, QueryToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxKind;

    fn token(text: &str) -> QueryToken {
        QueryToken::new(text, SyntaxKind::SelectClause)
    }

    #[test]
    fn buffer_ops_are_total_on_empty_buffers() {
        let mut buffer = TokenBuffer::new();
        buffer.clip();
        buffer.nospace();
        buffer.space();
        assert!(buffer.is_empty());
    }

    #[test]
    fn nospace_and_space_touch_only_the_last_token() {
        let mut buffer = TokenBuffer::new();
        buffer.push(token("a"));
        buffer.push(token("b"));
        buffer.nospace();
        let spacings: Vec<_> = buffer.iter().map(|t| t.spacing()).collect();
        assert_eq!(spacings, vec![Spacing::Space, Spacing::NoSpace]);
        buffer.space();
        assert_eq!(buffer.last().unwrap().spacing(), Spacing::Space);
    }

    #[test]
    fn clip_drops_the_last_token() {
        let mut buffer = TokenBuffer::new();
        buffer.push(token("a"));
        buffer.push(token(","));
        buffer.clip();
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.last().unwrap().resolve(""), "a");
    }

    #[test]
    fn deferred_text_resolves_against_the_alias() {
        let token = QueryToken::deferred(
            Deferred::AliasPath("name".into()),
            SyntaxKind::SelectStatement,
            Spacing::Space,
        );
        assert_eq!(token.resolve("u"), "u.name");
        // idempotent
        assert_eq!(token.resolve("u"), "u.name");
    }
}
