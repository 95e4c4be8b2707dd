use colored::Colorize;
use log::debug;
use sql_ra::{render, Format};
use std::fs;
use std::path::Path;
use std::process::exit;

pub mod tokens;

pub fn translate(input: &str, format: Format) -> Result<(), sql_ra::Error> {
    let output = render(input, format)?;
    println!("{output}");

    Ok(())
}

pub fn translate_file(path: &Path, format: Format) -> Result<(), sql_ra::Error> {
    debug!("Reading queries from {}", path.display());

    let input = fs::read_to_string(path)?;

    translate(&input, format)
}

pub fn exit_with(error: sql_ra::Error) -> ! {
    eprintln!("{intro}: {error}", intro = "error".bold().red());
    exit(1);
}
