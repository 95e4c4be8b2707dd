//! SQL input tokenizing and grouping
//!
//! The translator does not look at raw text, it looks at a statement made of classified tokens
//! and groups of tokens. Getting there takes a few stages:
//! ```text
//!     select a.x, b from a, b where a.x = 1
//!     └────┘ └──────┘      └──┘ └──────────┘
//!      DML   identifier   ident.  where clause
//!              list       list    └───────┘
//!                                 comparison
//! ```
//!
//! Each stage is slightly different, and keeping them apart keeps each one simple.

/// Uses Pest to lex input strings.
mod stage1;

/// Takes Pest's output and turns it into classified tokens.
mod stage2;

/// Groups tokens into identifiers, lists, comparisons and clauses.
mod stage3;

/// The token model itself.
mod tokens;

pub use stage1::Rule;
pub use tokens::{significant_leaves, Group, Node, Punctuation, Statement, Token, TokenClass};

#[cfg(test)]
pub use tokens::build;

use crate::engine::syntax::stage1::parse_stage1;
use crate::engine::syntax::stage2::Stage2Rep;
use crate::engine::syntax::stage3::Stage3Rep;
use log::debug;

pub fn parse_statements(input: &str) -> Result<Vec<Statement>, crate::error::Error> {
    let stage1 = parse_stage1(input)?;
    let stage2: Stage2Rep = stage1.into();
    let stage3: Stage3Rep = stage2.into();

    debug!(
        "Split {:?} into {} statement(s)",
        stage3.input,
        stage3.statements.len()
    );

    Ok(stage3.statements)
}
