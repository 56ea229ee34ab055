use std::path::PathBuf;

use jequel_lib::{SortOrder, Transformation};

use super::load_query;

pub struct RewriteArgs {
    pub query: Option<String>,
    pub file: Option<PathBuf>,
    pub sort: Vec<String>,
    pub debug: bool,
}

pub fn run(args: RewriteArgs) {
    let query = load_query(args.query, args.file);

    let mut sort = Vec::new();
    for spec in &args.sort {
        match parse_sort_spec(spec) {
            Ok(order) => sort.push(order),
            Err(message) => {
                eprintln!("error: {message}");
                std::process::exit(2);
            }
        }
    }

    let transformation = Transformation::new(&query)
        .with_sort(sort)
        .debug_render(args.debug);

    match transformation.query() {
        Ok(rendered) => println!("{rendered}"),
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    }
}

/// `property[:asc|:desc][:ci]`, e.g. `name:desc:ci` or `age`.
fn parse_sort_spec(spec: &str) -> Result<SortOrder, String> {
    let mut parts = spec.split(':');
    let property = parts.next().filter(|p| !p.is_empty()).ok_or_else(|| {
        format!("invalid sort spec '{spec}': expected property[:asc|:desc][:ci]")
    })?;

    let mut direction = jequel_lib::Direction::Asc;
    let mut ignore_case = false;
    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "asc" => direction = jequel_lib::Direction::Asc,
            "desc" => direction = jequel_lib::Direction::Desc,
            "ci" => ignore_case = true,
            other => {
                return Err(format!(
                    "invalid sort spec '{spec}': unknown modifier '{other}'"
                ))
            }
        }
    }

    let mut order = SortOrder::new(property, direction);
    if ignore_case {
        order = order.ignoring_case();
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::parse_sort_spec;
    use jequel_lib::Direction;

    #[test]
    fn property_only_defaults_to_ascending() {
        let order = parse_sort_spec("name").unwrap();
        assert_eq!(order.property(), "name");
        assert_eq!(order.direction(), Direction::Asc);
        assert!(!order.ignore_case());
    }

    #[test]
    fn direction_and_case_modifiers() {
        let order = parse_sort_spec("name:desc:ci").unwrap();
        assert_eq!(order.direction(), Direction::Desc);
        assert!(order.ignore_case());
    }

    #[test]
    fn unknown_modifier_is_rejected() {
        assert!(parse_sort_spec("name:sideways").is_err());
        assert!(parse_sort_spec("").is_err());
    }
}
