//! Sieve CLI - tabular data engine.

mod cli;
mod commands;
mod logger;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let result = match cli.command {
        Commands::Inspect { file, json } => commands::inspect::run(file, cli.delimiter, json),

        Commands::Clean {
            file,
            ops,
            rename,
            hide,
            retype,
            output,
            all_columns,
        } => {
            let edits = commands::clean::SchemaEdits {
                rename,
                hide,
                retype,
            };
            commands::clean::run(file, cli.delimiter, ops, edits, output, all_columns).await
        }

        Commands::Search { file, query, limit } => {
            commands::search::run(file, cli.delimiter, query, limit)
        }

        Commands::Status { file, json } => commands::status::run(file, json).await,

        Commands::Publish {
            file,
            table,
            url,
            timeout,
        } => commands::publish::run(file, table, url, timeout).await,

        Commands::Operations => commands::operations::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
