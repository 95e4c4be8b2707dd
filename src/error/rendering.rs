use crate::engine::{Clause, Position, RenderingError, TranslationError};
use colored::Colorize;
use std::fmt::{Display, Formatter};

impl Display for RenderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (line, underline) = self.highlight();

        write!(
            f,
            "{line}\n\
             {underline} {message}",
            underline = underline.red().bold(),
            message = self.error.message().red().bold(),
        )?;

        write!(f, "\n\n{details}", details = self.error)?;

        Ok(())
    }
}

impl RenderingError {
    /// The input line the error points to, and the underline that goes under it.
    ///
    /// Errors without a position underline the whole first line.
    fn highlight(&self) -> (&str, String) {
        let input = self.input.as_str();

        let Some(Position { start, end }) = self.error.input_position() else {
            let line = input.lines().next().unwrap_or_default();

            return (line, "^".repeat(line.chars().count().max(1)));
        };

        let start = start.min(input.len());
        let line_start = input
            .get(..start)
            .and_then(|before| before.rfind('\n'))
            .map_or(0, |newline| newline + 1);
        let line_end = input
            .get(start..)
            .and_then(|after| after.find('\n'))
            .map_or(input.len(), |newline| start + newline);

        let line = input.get(line_start..line_end).unwrap_or_default();
        let before = input.get(line_start..start).unwrap_or_default();
        let underlined = input.get(start..end.min(line_end)).unwrap_or_default();

        let underline = format!(
            "{blank}{carets}",
            blank = " ".repeat(before.chars().count()),
            carets = "^".repeat(underlined.chars().count().max(1)),
        );

        (line.trim_end_matches('\r'), underline)
    }
}

impl TranslationError {
    /// Where in the input the error was found, if it points at something in particular.
    pub fn input_position(&self) -> Option<Position> {
        match self {
            // A missing clause has no tokens to point to.
            TranslationError::MalformedClause { .. } => None,
            TranslationError::EmptyRelationSet { position } => Some(*position),
            TranslationError::InvalidComparisonShape { position, .. } => Some(*position),
            TranslationError::UnsupportedKeyword { position, .. } => Some(*position),
        }
    }

    fn message(&self) -> &str {
        match self {
            TranslationError::MalformedClause { .. } => "Missing clause",
            TranslationError::EmptyRelationSet { .. } => "No relations found",
            TranslationError::InvalidComparisonShape { .. } => "Unsupported comparison",
            TranslationError::UnsupportedKeyword { .. } => "Unsupported keyword",
        }
    }
}

impl Display for TranslationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationError::MalformedClause { clause } => {
                write!(f, "The {clause} clause is missing or empty")
            }
            TranslationError::EmptyRelationSet { .. } => write!(
                f,
                "The FROM clause did not produce any relations, only comma separated \
                 relation names with optional aliases are supported"
            ),
            TranslationError::InvalidComparisonShape { parts, .. } => write!(
                f,
                "Invalid comparison, expected 3 parts after reassembly but found {count}: [{parts}]",
                count = parts.len(),
                parts = parts.join(", "),
            ),
            TranslationError::UnsupportedKeyword { keyword, .. } => write!(
                f,
                "{keyword} is not supported in the WHERE clause, comparisons can only be \
                 combined with AND"
            ),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Clause::From => write!(f, "FROM"),
        }
    }
}
