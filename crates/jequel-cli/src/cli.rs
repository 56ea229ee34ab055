//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "jequel",
    version,
    about = "JPQL 3.1 query rewriting: sorted rewrites, count queries, alias and projection extraction"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Re-render a query, optionally appending sort orders
    Rewrite {
        /// Query text (or use --file)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Sort order as `property[:asc|:desc][:ci]`; repeatable
        #[arg(short, long, value_name = "ORDER")]
        sort: Vec<String>,

        /// Tag every output token with its grammar rule
        #[arg(long)]
        debug: bool,
    },

    /// Derive the count query used for pagination totals
    Count {
        /// Query text (or use --file)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Explicit inner projection for `count(…)`
        #[arg(short, long, value_name = "EXPR")]
        projection: Option<String>,
    },

    /// Print the primary range-variable alias
    Alias {
        /// Query text (or use --file)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Print the select projection
    Projection {
        /// Query text (or use --file)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Parse the query and report syntax errors
    Check {
        /// Query text (or use --file)
        query: Option<String>,

        /// Read the query from a file
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}
