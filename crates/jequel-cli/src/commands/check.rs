use std::path::PathBuf;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use jequel_lib::syntax;

use super::load_query;

pub struct CheckArgs {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
}

pub fn run(args: CheckArgs) {
    let query = load_query(args.query, args.file);

    let parse = syntax::parse(&query);
    if parse.is_valid() {
        // Silent on success (like cargo check)
        return;
    }

    let error = &parse.errors()[0];
    let range = clamp(error.range, query.len());

    let report: Vec<Group> = vec![Level::ERROR.primary_title(&error.message).element(
        Snippet::source(&query)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range)),
    )];

    let renderer = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        Renderer::styled()
    } else {
        Renderer::plain()
    };
    eprintln!("{}", renderer.render(&report));
    std::process::exit(1);
}

/// Errors reported at end of input carry an empty range at the source
/// length; the snippet annotation needs at least one in-bounds byte.
fn clamp(range: rowan::TextRange, len: usize) -> std::ops::Range<usize> {
    let start = usize::from(range.start()).min(len.saturating_sub(1));
    let end = usize::from(range.end()).clamp(start + 1, len.max(start + 1));
    start..end
}
