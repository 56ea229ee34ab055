use std::path::PathBuf;

use jequel_lib::detect_alias;

use super::load_query;

pub struct AliasArgs {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
}

pub fn run(args: AliasArgs) {
    let query = load_query(args.query, args.file);

    match detect_alias(&query) {
        Some(alias) => println!("{alias}"),
        None => {
            eprintln!("error: no alias found");
            std::process::exit(1);
        }
    }
}
