//! Syntax-directed token emitter.
//!
//! One dispatch over the node kind with a generic fallback: the parse tree
//! holds every significant token in grammar order, so a depth-first token
//! walk re-renders any subtree. Specialized arms exist only where the
//! whitespace policy or a rewrite demands them:
//!
//! - paths render tight (`a.b.c`), with a trailing space on the last token;
//! - call syntax glues the function name to its parentheses (`lower(x)`);
//! - group syntax keeps the word before the parenthesis spaced
//!   (`in (?1, ?2)`, `exists (select …)`);
//! - commas always consume the space before them;
//! - the top-level select clause is rewritten in count mode;
//! - sort orders are appended after the (possibly absent) order-by clause.
//!
//! Alias capture, projection capture, and constructor detection happen as
//! side effects of the walk and are returned in [`Walked`].

use rowan::NodeOrToken;

use crate::syntax::{SyntaxKind, SyntaxNode};

use super::render;
use super::sort::SortOrder;
use super::token::{Deferred, QueryToken, Spacing, TokenBuffer};

/// How a node's own tokens are spaced during a generic walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    /// Every token trails a space; commas consume the space before them.
    Plain,
    /// Like `Plain`, but the opening parenthesis also consumes the space
    /// before it, gluing the call name to its arguments.
    Call,
    /// Like `Plain`: the opening parenthesis keeps the preceding token
    /// spaced (`in (…)`) but is itself unspaced.
    Group,
}

/// Tree walker. One instance per walk; [`Emitter::walk`] consumes it.
#[derive(Debug, Default)]
pub struct Emitter {
    sort: Vec<SortOrder>,
    count: bool,
    count_projection: Option<String>,

    alias: String,
    projection: TokenBuffer,
    has_constructor_expression: bool,
}

/// The outcome of a walk: the token stream plus everything captured along
/// the way.
#[derive(Debug)]
pub struct Walked {
    tokens: TokenBuffer,
    alias: String,
    projection: TokenBuffer,
    has_constructor_expression: bool,
}

impl Walked {
    /// Renders the rewritten query.
    pub fn render(&self) -> String {
        render::render(&self.tokens, &self.alias)
    }

    /// Renders every token with diagnostic tags and clause line breaks.
    pub fn render_debug(&self) -> String {
        render::render_debug(&self.tokens, &self.alias)
    }

    /// Renders the captured projection (the select items, without any
    /// trailing comma). Empty for update and delete statements.
    pub fn render_projection(&self) -> String {
        render::render(&self.projection, &self.alias)
    }

    /// The primary alias: the identification variable of the first range
    /// variable declaration encountered. Empty if none was seen.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn has_constructor_expression(&self) -> bool {
        self.has_constructor_expression
    }
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Switch on count-query synthesis, optionally overriding the inner
    /// projection.
    pub fn counting(mut self, projection: Option<String>) -> Self {
        self.count = true;
        self.count_projection = projection.filter(|p| !p.trim().is_empty());
        self
    }

    /// Walks the tree rooted at `root`, consuming the emitter. A walker is
    /// never reused: deriving a count query builds a fresh one.
    pub fn walk(mut self, root: &SyntaxNode) -> Walked {
        let tokens = self.emit(root);
        Walked {
            tokens,
            alias: self.alias,
            projection: self.projection,
            has_constructor_expression: self.has_constructor_expression,
        }
    }

    fn emit(&mut self, node: &SyntaxNode) -> TokenBuffer {
        use SyntaxKind::*;
        match node.kind() {
            SelectStatement => self.select_statement(node),
            SelectClause => self.select_clause(node),
            RangeDecl => self.range_decl(node),
            ConstructorExpr => {
                self.has_constructor_expression = true;
                self.walk_node(node, Style::Call)
            }
            PathExpr | EntityName | SpelExpr | InputParam => self.tight_chain(node),
            ObjectExpr | KeyValueExpr | AggregateExpr | FunctionCall | TrimExpr | ExtractExpr
            | FunctionInvocation | TypeExpr | TreatedPath => self.walk_node(node, Style::Call),
            GroupedExpr | InExpr | ExistsExpr | AllAnyExpr | CollectionMemberDecl => {
                self.walk_node(node, Style::Group)
            }
            kind if kind.is_clause() => {
                let mut buffer = self.walk_node(node, Style::Plain);
                buffer.mark_clause_start();
                buffer
            }
            Error => {
                // Unreachable through the façade: fail-fast operations stop
                // on parse errors and permissive ones bail on invalid
                // parses. Re-emit the raw tokens so a direct caller still
                // gets text accounting for the whole input.
                tracing::error!("emitting an error node; the parse was not checked");
                self.walk_node(node, Style::Plain)
            }
            _ => self.walk_node(node, Style::Plain),
        }
    }

    /// Generic emission: child tokens in grammar order, spaced per `style`;
    /// child nodes recurse through [`Self::emit`].
    fn walk_node(&mut self, node: &SyntaxNode, style: Style) -> TokenBuffer {
        let rule = node.kind();
        let mut buffer = TokenBuffer::new();
        for element in node.children_with_tokens() {
            match element {
                NodeOrToken::Token(token) => match token.kind() {
                    SyntaxKind::Comma => {
                        buffer.nospace();
                        buffer.push(QueryToken::new(",", rule));
                    }
                    SyntaxKind::ParenOpen => {
                        if style == Style::Call {
                            buffer.nospace();
                        }
                        buffer.push(QueryToken::spaced("(", rule, Spacing::NoSpace));
                    }
                    SyntaxKind::ParenClose => {
                        buffer.nospace();
                        buffer.push(QueryToken::new(")", rule));
                    }
                    _ => buffer.push(QueryToken::new(token.text(), rule)),
                },
                NodeOrToken::Node(child) => buffer.extend(self.emit(&child)),
            }
        }
        buffer
    }

    /// Paths, SpEL escapes and input parameters render with no internal
    /// spacing; the final token restores the trailing space.
    fn tight_chain(&mut self, node: &SyntaxNode) -> TokenBuffer {
        let rule = node.kind();
        let mut buffer = TokenBuffer::new();
        for element in node.children_with_tokens() {
            match element {
                NodeOrToken::Token(token) => {
                    buffer.push(QueryToken::spaced(token.text(), rule, Spacing::NoSpace));
                }
                NodeOrToken::Node(child) => {
                    // TREAT(… AS …) and KEY(m) heads keep their internal
                    // spacing; only the seam to the next path segment is
                    // glued.
                    buffer.extend(self.emit(&child));
                    buffer.nospace();
                }
            }
        }
        buffer.space();
        buffer
    }

    /// Emits a range variable declaration and captures the primary alias
    /// from its last token. The first declaration wins; later ones (other
    /// roots, subqueries) never overwrite it.
    fn range_decl(&mut self, node: &SyntaxNode) -> TokenBuffer {
        let buffer = self.walk_node(node, Style::Plain);
        if self.alias.is_empty() {
            if let Some(last) = buffer.last() {
                self.alias = last.resolve("");
            }
        }
        buffer
    }

    /// The top-level select statement: clauses in order, with the order-by
    /// clause suppressed in count mode and caller-supplied sort orders
    /// appended otherwise.
    fn select_statement(&mut self, node: &SyntaxNode) -> TokenBuffer {
        let rule = node.kind();
        let mut buffer = TokenBuffer::new();
        let mut has_orderby = false;

        for child in node.children() {
            if child.kind() == SyntaxKind::OrderByClause {
                if self.count {
                    continue;
                }
                has_orderby = true;
            }
            let emitted = self.emit(&child);
            buffer.extend(emitted);
        }

        if !self.count && !self.sort.is_empty() {
            if has_orderby {
                buffer.nospace();
                buffer.push(QueryToken::new(",", rule));
            } else {
                buffer.push(QueryToken::new("order by", rule));
            }
            for order in &self.sort {
                if order.ignore_case() {
                    buffer.push(QueryToken::spaced("lower(", rule, Spacing::NoSpace));
                }
                // Deferred: the alias is resolved at render time, after the
                // whole tree (and with it the from clause) has been walked.
                buffer.push(QueryToken::deferred(
                    Deferred::AliasPath(order.property().to_owned()),
                    rule,
                    Spacing::Space,
                ));
                if order.ignore_case() {
                    buffer.nospace();
                    buffer.push(QueryToken::new(")", rule));
                }
                buffer.push(QueryToken::spaced(
                    order.direction().keyword(),
                    rule,
                    Spacing::NoSpace,
                ));
                buffer.push(QueryToken::new(",", rule));
            }
            buffer.clip();
        }

        buffer
    }

    /// The top-level select clause. Captures the projection and, in count
    /// mode, replaces it with a cardinality expression:
    ///
    /// - `select x, y`            → `select count(alias)`
    /// - `select distinct x, y`   → `select count(distinct x, y)`
    /// - `select distinct new …`  → `select count(alias)` (distinct over a
    ///   constructor is meaningless, the alias stands in)
    /// - explicit count projection → `select count(<projection>)`
    fn select_clause(&mut self, node: &SyntaxNode) -> TokenBuffer {
        let rule = node.kind();
        let mut buffer = TokenBuffer::new();
        let mut items = TokenBuffer::new();
        let mut distinct: Option<String> = None;

        for element in node.children_with_tokens() {
            match element {
                NodeOrToken::Token(token) => match token.kind() {
                    SyntaxKind::KwSelect => buffer.push(QueryToken::new(token.text(), rule)),
                    SyntaxKind::KwDistinct => distinct = Some(token.text().to_owned()),
                    SyntaxKind::Comma => {
                        items.nospace();
                        items.push(QueryToken::new(",", rule));
                    }
                    _ => {}
                },
                NodeOrToken::Node(item) => items.extend(self.emit(&item)),
            }
        }

        if self.count {
            buffer.push(QueryToken::spaced("count(", rule, Spacing::NoSpace));
            if let Some(projection) = self.count_projection.clone() {
                buffer.push(QueryToken::new(projection, rule));
            } else if let Some(distinct) = distinct {
                if self.has_constructor_expression {
                    buffer.push(QueryToken::deferred(Deferred::Alias, rule, Spacing::Space));
                } else {
                    // keep all the select items to distinct against
                    buffer.push(QueryToken::new(distinct, rule));
                    buffer.extend(items.clone());
                }
            } else {
                buffer.push(QueryToken::deferred(Deferred::Alias, rule, Spacing::Space));
            }
            buffer.nospace();
            buffer.push(QueryToken::new(")", rule));
        } else {
            if let Some(distinct) = distinct {
                buffer.push(QueryToken::new(distinct, rule));
            }
            buffer.extend(items.clone());
        }

        self.projection = items;
        buffer
    }
}
