use std::path::PathBuf;

use jequel_lib::Transformation;

use super::load_query;

pub struct CountArgs {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
    pub projection: Option<String>,
}

pub fn run(args: CountArgs) {
    let query = load_query(args.query, args.file);

    let mut transformation = Transformation::new(&query);
    if let Some(projection) = args.projection {
        transformation = transformation.with_count_projection(projection);
    }

    match transformation.count_query() {
        Ok(rendered) => println!("{rendered}"),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}
