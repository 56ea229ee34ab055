pub mod alias;
pub mod check;
pub mod count;
pub mod projection;
pub mod rewrite;

use std::path::PathBuf;

/// Resolves the query text from the positional argument or `--file`.
pub(crate) fn load_query(query: Option<String>, file: Option<PathBuf>) -> String {
    let result = match (query, file) {
        (Some(query), None) => Ok(query),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map(|text| text.trim().to_owned())
            .map_err(|error| format!("cannot read {}: {error}", path.display())),
        (Some(_), Some(_)) => Err("pass either a query or --file, not both".to_owned()),
        (None, None) => Err("no query given; pass it as an argument or via --file".to_owned()),
    };
    match result {
        Ok(query) if query.is_empty() => {
            eprintln!("error: query cannot be empty");
            std::process::exit(2);
        }
        Ok(query) => query,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(2);
        }
    }
}
