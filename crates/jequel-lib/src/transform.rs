//! Façade operations bundling parse + walk + render.
//!
//! Every operation constructs a fresh [`Emitter`]; nothing is shared across
//! calls. Two failure disciplines exist, mirroring how callers use the
//! results:
//!
//! - fail-fast ([`rewrite`], [`count_query`]): an unparseable query is an
//!   error the caller must see;
//! - permissive ([`detect_alias`], [`projection`],
//!   [`has_constructor_expression`]): an unparseable query maps to a
//!   neutral value, because these run as probes over arbitrary strings.

use tracing::debug;

use crate::error::TransformError;
use crate::rewrite::{Emitter, SortOrder, Walked};
use crate::syntax::{self, Parse};

/// Builder carrying the configuration of a single rewriting operation.
///
/// ```
/// use jequel_lib::{SortOrder, Transformation};
///
/// let query = Transformation::new("select u from User u")
///     .with_sort([SortOrder::desc("name").ignoring_case()])
///     .query()
///     .unwrap();
/// assert_eq!(query, "select u from User u order by lower(u.name) desc");
/// ```
#[derive(Debug, Clone)]
pub struct Transformation<'a> {
    query: &'a str,
    sort: Vec<SortOrder>,
    count_projection: Option<String>,
    debug_render: bool,
}

impl<'a> Transformation<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            sort: Vec::new(),
            count_projection: None,
            debug_render: false,
        }
    }

    pub fn with_sort(mut self, sort: impl IntoIterator<Item = SortOrder>) -> Self {
        self.sort = sort.into_iter().collect();
        self
    }

    /// Use `projection` verbatim as the inner projection of the derived
    /// count query instead of the alias-or-select-items rule. Blank
    /// overrides are ignored.
    pub fn with_count_projection(mut self, projection: impl Into<String>) -> Self {
        self.count_projection = Some(projection.into());
        self
    }

    /// Render with diagnostic tags and clause line breaks.
    pub fn debug_render(mut self, debug_render: bool) -> Self {
        self.debug_render = debug_render;
        self
    }

    // =====================================================================
    // Terminal operations
    // =====================================================================

    /// Re-render the query, applying any configured sort.
    pub fn query(&self) -> Result<String, TransformError> {
        debug!(query = self.query, "rewriting query");
        let walked = self.walk_fail_fast(false)?;
        Ok(self.render(&walked))
    }

    /// Derive the count query.
    pub fn count_query(&self) -> Result<String, TransformError> {
        debug!(query = self.query, "deriving count query");
        let walked = self.walk_fail_fast(true)?;
        Ok(self.render(&walked))
    }

    /// The primary alias, or `None` when the query does not parse or binds
    /// no range variable.
    pub fn alias(&self) -> Option<String> {
        debug!(query = self.query, "detecting alias");
        let walked = self.walk_permissive()?;
        Some(walked.alias().to_owned()).filter(|alias| !alias.is_empty())
    }

    /// The rendered projection; empty when the query does not parse.
    pub fn projection(&self) -> String {
        debug!(query = self.query, "extracting projection");
        self.walk_permissive()
            .map(|walked| walked.render_projection())
            .unwrap_or_default()
    }

    /// Whether the projection uses a `NEW …(…)` constructor expression;
    /// `false` when the query does not parse.
    pub fn has_constructor_expression(&self) -> bool {
        let Ok(parse) = self.parse_fail_fast() else {
            return false;
        };
        let walked = self.emitter(false).walk(&parse.syntax());
        walked.has_constructor_expression()
    }

    // =====================================================================
    // Plumbing
    // =====================================================================

    fn walk_fail_fast(&self, count: bool) -> Result<Walked, TransformError> {
        let parse = self.parse_fail_fast()?;
        Ok(self.emitter(count).walk(&parse.syntax()))
    }

    fn walk_permissive(&self) -> Option<Walked> {
        let parse = syntax::parse(self.query);
        if !parse.is_valid() {
            debug!(query = self.query, "query did not parse");
            return None;
        }
        Some(self.emitter(false).walk(&parse.syntax()))
    }

    fn parse_fail_fast(&self) -> Result<Parse, TransformError> {
        syntax::parse_fail_fast(self.query).map_err(TransformError::InvalidQuery)
    }

    fn emitter(&self, count: bool) -> Emitter {
        let mut emitter = Emitter::new().with_sort(self.sort.clone());
        if count {
            emitter = emitter.counting(self.count_projection.clone());
        }
        emitter
    }

    fn render(&self, walked: &Walked) -> String {
        if self.debug_render {
            walked.render_debug()
        } else {
            walked.render()
        }
    }
}

/// Parse fail-fast and re-render the query unchanged.
pub fn rewrite(query: &str) -> Result<String, TransformError> {
    Transformation::new(query).query()
}

/// Parse fail-fast and re-render with `sort` appended to the ordering.
pub fn rewrite_with_sort(query: &str, sort: &[SortOrder]) -> Result<String, TransformError> {
    Transformation::new(query)
        .with_sort(sort.iter().cloned())
        .query()
}

/// Derive the count query for pagination totals.
pub fn count_query(query: &str) -> Result<String, TransformError> {
    Transformation::new(query).count_query()
}

/// Derive the count query with an explicit inner projection.
pub fn count_query_with_projection(
    query: &str,
    projection: Option<&str>,
) -> Result<String, TransformError> {
    let mut transformation = Transformation::new(query);
    if let Some(projection) = projection {
        transformation = transformation.with_count_projection(projection);
    }
    transformation.count_query()
}

/// Parse permissively and return the primary alias, if any.
pub fn detect_alias(query: &str) -> Option<String> {
    Transformation::new(query).alias()
}

/// Parse permissively and return the rendered projection (empty on failure).
pub fn projection(query: &str) -> String {
    Transformation::new(query).projection()
}

/// Whether the query selects through a constructor expression (`false` on
/// parse failure).
pub fn has_constructor_expression(query: &str) -> bool {
    Transformation::new(query).has_constructor_expression()
}
