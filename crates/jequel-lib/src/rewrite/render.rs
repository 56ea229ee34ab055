//! Token-sequence rendering.

use super::token::{QueryToken, Spacing, TokenBuffer};

/// Concatenates the buffer into a query string.
///
/// Debug-only tokens are skipped; each remaining token contributes its
/// resolved text plus one space when its spacing policy says so. The result
/// is trimmed, so the output never carries leading or trailing whitespace.
pub fn render(tokens: &TokenBuffer, alias: &str) -> String {
    let mut out = String::new();
    for token in tokens.iter().filter(|t| !t.debug_only()) {
        out.push_str(&token.resolve(alias));
        if token.spacing() == Spacing::Space {
            out.push(' ');
        }
    }
    out.trim().to_owned()
}

/// Diagnostic rendering: every token (debug-only ones included), a line
/// break before clause-opening tokens, and a bracketed tag naming the
/// grammar rule each token was emitted for.
pub fn render_debug(tokens: &TokenBuffer, alias: &str) -> String {
    let mut out = String::new();
    for token in tokens.iter() {
        if token.line_break() {
            out.push('\n');
        }
        out.push_str(&token.resolve(alias));
        out.push_str(&tag(token));
    }
    out
}

fn tag(token: &QueryToken) -> String {
    format!("[{:?}]", token.rule())
}
