mod cli;
mod commands;

use cli::{Cli, Command};
use commands::alias::AliasArgs;
use commands::check::CheckArgs;
use commands::count::CountArgs;
use commands::projection::ProjectionArgs;
use commands::rewrite::RewriteArgs;

fn main() {
    let cli = <Cli as clap::Parser>::parse();

    match cli.command {
        Command::Rewrite {
            query,
            file,
            sort,
            debug,
        } => {
            commands::rewrite::run(RewriteArgs {
                query,
                file,
                sort,
                debug,
            });
        }
        Command::Count {
            query,
            file,
            projection,
        } => {
            commands::count::run(CountArgs {
                query,
                file,
                projection,
            });
        }
        Command::Alias { query, file } => {
            commands::alias::run(AliasArgs { query, file });
        }
        Command::Projection { query, file } => {
            commands::projection::run(ProjectionArgs { query, file });
        }
        Command::Check { query, file } => {
            commands::check::run(CheckArgs { query, file });
        }
    }
}
