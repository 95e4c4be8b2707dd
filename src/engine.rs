pub mod ra;
mod ra_builder;
mod rendering;
mod syntax;

#[cfg(test)]
mod tests;

pub use ra_builder::{Clause, TranslationError};
pub use rendering::Format;
pub use syntax::{Group, Node, Punctuation, Rule, Statement, Token, TokenClass};

use crate::engine::ra::Expression;
use crate::engine::ra_builder::build_expression;
use crate::engine::rendering::render_expressions;
use log::info;
use pest::Span;
use std::ops::Range;
use thiserror::Error;

/// Splits the input into statements and groups their tokens.
///
/// Always returns at least one statement, even for empty input.
pub fn parse(input: &str) -> Result<Vec<Statement>, crate::error::Error> {
    syntax::parse_statements(input)
}

/// Translates an already tokenized statement.
///
/// This is the pure part of the translator: no I/O, no state, the same statement always gives the
/// same expression.
pub fn translate_statement(statement: &Statement) -> Result<Expression, TranslationError> {
    let expression = build_expression(statement)?;

    info!("Translated statement into {expression}");

    Ok(expression)
}

/// Translates the first statement of the input.
pub fn translate(input: &str) -> Result<Expression, crate::error::Error> {
    let statement = parse(input)?.into_iter().next().unwrap_or_default();

    Ok(map_err(input, translate_statement(&statement))?)
}

/// Translates every statement of the input, in order.
pub fn translate_all(input: &str) -> Result<Vec<Expression>, crate::error::Error> {
    let expressions = parse(input)?
        .iter()
        .map(|statement| map_err(input, translate_statement(statement)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(expressions)
}

pub fn render(input: &str, format: Format) -> Result<String, crate::error::Error> {
    let expressions = translate_all(input)?;

    render_expressions(&expressions, format)
}

/// A translation error, together with the input it happened on.
///
/// Keeping the input around lets us underline the tokens that caused the error.
#[derive(Debug, Error)]
pub struct RenderingError {
    pub input: String,
    pub error: TranslationError,
}

fn map_err<T>(input: &str, result: Result<T, TranslationError>) -> Result<T, RenderingError> {
    result.map_err(|error| RenderingError {
        input: input.to_string(),
        error,
    })
}

/// Byte range of something in the input.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

impl Position {
    /// The smallest position containing both positions.
    pub fn covering(self, other: Position) -> Position {
        Position {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Position {
    fn from(range: Range<usize>) -> Self {
        Position {
            start: range.start,
            end: range.end,
        }
    }
}

impl From<Span<'_>> for Position {
    fn from(span: Span) -> Self {
        Position {
            start: span.start(),
            end: span.end(),
        }
    }
}

#[cfg(test)]
impl PartialEq<Position> for Range<usize> {
    fn eq(&self, other: &Position) -> bool {
        self.start == other.start && self.end == other.end
    }
}
