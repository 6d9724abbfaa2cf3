//! jsonfill command-line driver.

use anyhow::Result;
use clap::Parser;

mod args;
mod commands;
mod tracing_config;

use args::{CliArgs, Command};
use commands::Cursor;

fn main() -> Result<()> {
    // Initialise tracing if JSONFILL_LOG or RUST_LOG is set (zero cost
    // otherwise). Supports JSONFILL_LOG_FORMAT=tree|json|text.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = match args.command {
        Command::Complete {
            file,
            offset,
            line,
            character,
            values,
            json,
        } => {
            let cursor = Cursor::from_args(offset, line, character)?;
            commands::complete(&file, cursor, &values, json)?
        }
        Command::Locate {
            file,
            offset,
            line,
            character,
            json,
        } => {
            let cursor = Cursor::from_args(offset, line, character)?;
            commands::locate(&file, cursor, json)?
        }
        Command::Tokens { file, trivia } => commands::tokens(&file, trivia)?,
    };
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}
