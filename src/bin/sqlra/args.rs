use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translates SQL queries into relational algebra.
    ///
    /// Multiple queries can be separated by ";", each one is printed on its own line.
    Translate {
        input: String,
        #[arg(value_enum, short, long, default_value_t = Format::Text)]
        format: Format,
    },
    /// Translates every query in a file.
    File {
        path: PathBuf,
        #[arg(value_enum, short, long, default_value_t = Format::Text)]
        format: Format,
    },
    /// Shows how the queries were tokenized and grouped. Useful when a translation looks wrong.
    Tokens { input: String },
}

#[derive(Debug, ValueEnum, Clone, Copy)]
pub enum Format {
    /// Relational algebra expressions, one per line
    Text,
    /// The expression trees, as JSON
    Json,
}

impl From<Format> for sql_ra::Format {
    fn from(value: Format) -> Self {
        match value {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}
