//! Turns relational algebra expressions into text.
//!
//! The text format is the one RA interpreters read, like `\project_{a} \select_{a = 1} R`. The
//! [Display] impls live in [expression_rendering].
use crate::engine::ra::Expression;
use log::debug;
use std::fmt::{Display, Formatter};

mod expression_rendering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One relational algebra expression per line.
    #[default]
    Text,
    /// A JSON array with the expression trees.
    Json,
}

pub fn render_expressions(
    expressions: &[Expression],
    format: Format,
) -> Result<String, crate::error::Error> {
    debug!("Rendering {} expression(s) as {format}", expressions.len());

    let rendered = match format {
        Format::Text => expressions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Json => serde_json::to_string_pretty(expressions)?,
    };

    Ok(rendered)
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expressions() -> Vec<Expression> {
        vec![
            Expression::relation("a"),
            Expression::cross(Expression::relation("b"), Expression::relation("c")),
        ]
    }

    #[test]
    fn test_text_is_one_line_per_expression() {
        assert_eq!(
            "a\nb \\cross c",
            render_expressions(&expressions(), Format::Text).unwrap()
        );
    }

    #[test]
    fn test_json_is_an_array() {
        let json = render_expressions(&expressions(), Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(2, value.as_array().map(Vec::len).unwrap_or_default());
        assert_eq!("relation", value[0]["kind"]);
        assert_eq!("cross", value[1]["kind"]);
    }

    #[test]
    fn test_nothing_to_render() {
        assert_eq!("", render_expressions(&[], Format::Text).unwrap());
    }
}
