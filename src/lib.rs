//! Translates a small SQL subset into relational algebra.
//!
//! The supported queries look like this:
//! ```sql
//! SELECT [DISTINCT] projection-list FROM relation-list [WHERE a = b AND c = 'd' ...]
//! ```
//! and turn into expressions like `\project_{...} \select_{...} (R \cross S)`.
//!
//! ```
//! let expression = sql_ra::translate("select a.x from a, b where a.x = b.y").unwrap();
//!
//! assert_eq!(
//!     "\\project_{a.x} \\select_{a.x = b.y} (a \\cross b)",
//!     expression.to_string()
//! );
//! ```
mod engine;
mod error;

pub use engine::ra;
pub use engine::{
    parse, render, translate, translate_all, translate_statement, Clause, Format, Position,
    RenderingError, TranslationError,
};

/// The token model produced by the tokenizer and consumed by the translator.
pub mod syntax {
    pub use crate::engine::{Group, Node, Punctuation, Rule, Statement, Token, TokenClass};
}

pub use error::{Error, ErrorKind};
