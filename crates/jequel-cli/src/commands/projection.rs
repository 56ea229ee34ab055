use std::path::PathBuf;

use jequel_lib::projection;

use super::load_query;

pub struct ProjectionArgs {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
}

pub fn run(args: ProjectionArgs) {
    let query = load_query(args.query, args.file);

    let rendered = projection(&query);
    if rendered.is_empty() {
        eprintln!("error: no projection (query did not parse or selects nothing)");
        std::process::exit(1);
    }
    println!("{rendered}");
}
