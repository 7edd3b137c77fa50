#[macro_use]
mod diagnostics;
mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Compile { expr, strings, strings_file, emit_table } => {
            commands::compile::run(cli.quiet, expr, strings, strings_file, *emit_table)
        }
        Command::Table { path, kind, strings, strings_file } => {
            commands::table::run(cli.quiet, path, *kind, strings, strings_file)
        }
        Command::Batch { expressions, expressions_file, strings, strings_file } => {
            commands::batch::run(cli.quiet, expressions, expressions_file, strings, strings_file)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
