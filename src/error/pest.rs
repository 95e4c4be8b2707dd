use crate::engine::Rule;
use crate::error::ErrorKind;
use colored::Colorize;
use pest::error::LineColLocation;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type PestError = pest::error::Error<Rule>;

/// Pest errors, with rule names a person can read and a red underline.
#[derive(Debug, Error)]
pub struct WrappedPestError(PestError);

impl WrappedPestError {
    pub fn new(error: PestError) -> Self {
        WrappedPestError(error.renamed_rules(describe_rule))
    }

    fn underline(&self) -> String {
        let line = self.0.line();

        match self.0.line_col {
            LineColLocation::Pos((_, column)) => {
                format!("{blank_indent}^", blank_indent = blank(line, column))
            }
            LineColLocation::Span((start_line, start), (end_line, end)) => {
                let width = if start_line == end_line && end > start {
                    end - start
                } else {
                    1
                };

                format!(
                    "{blank_indent}{underline}",
                    blank_indent = blank(line, start),
                    underline = "^".repeat(width),
                )
            }
        }
    }
}

impl Display for WrappedPestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let error = &self.0;

        write!(
            f,
            "{line}\n\
             {underline} {message}\n\
             ",
            line = error.line(),
            underline = self.underline().red().bold(),
            message = error.variant.message().bold().red(),
        )
    }
}

/// Blanks out the line up to the (1 based) column, keeping tabs so the underline lines up.
fn blank(line: &str, column: usize) -> String {
    line.chars()
        .take(column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

fn describe_rule(rule: &Rule) -> String {
    let description = match rule {
        Rule::EOI => "end of input",
        Rule::root => "a statement",
        Rule::whitespace => "whitespace",
        Rule::comment => "a comment",
        Rule::dml => "SELECT",
        Rule::keyword => "a keyword",
        Rule::string => "a string literal",
        Rule::float => "a number",
        Rule::integer => "an integer",
        Rule::name => "a name",
        Rule::comparison_operator => "a comparison operator",
        Rule::operator => "an operator",
        Rule::wildcard => "*",
        Rule::dot => ".",
        Rule::comma => ",",
        Rule::open_parenthesis => "(",
        Rule::close_parenthesis => ")",
        Rule::semicolon => ";",
        #[allow(unreachable_patterns)]
        _ => return format!("{rule:?}"),
    };

    description.to_string()
}

impl From<PestError> for ErrorKind {
    fn from(value: PestError) -> Self {
        WrappedPestError::new(value).into()
    }
}
