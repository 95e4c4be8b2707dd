mod args;
mod commands;

use args::{Args, Command};
use clap::Parser;

fn main() {
    env_logger::init();

    let args = Args::parse();

    let result = match args.command {
        Command::Translate { input, format } => commands::translate(&input, format.into()),
        Command::File { path, format } => commands::translate_file(&path, format.into()),
        Command::Tokens { input } => commands::tokens::print_tokens(&input),
    };

    if let Err(error) = result {
        commands::exit_with(error);
    }
}
