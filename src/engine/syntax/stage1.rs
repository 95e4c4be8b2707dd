//! The stage 1 representation is just the raw output from Pest
use pest::iterators::Pairs;
use pest::Parser;
use pest_derive::Parser;

/// Pest parser
///
/// Pest will autogenerate all of the code needed, and will also give an enum called "Rule" that
/// will have all the rule names from the sql.pest file.
#[derive(Parser)]
#[grammar = "engine/syntax/sql.pest"]
struct Stage1Parser;

pub fn parse_stage1(input: &str) -> Result<Stage1Rep<'_>, crate::error::Error> {
    let pest = Stage1Parser::parse(
        // the grammar always starts with a Rule::root node.
        Rule::root,
        input,
    )?; // "?" turns Pest errors into WrappedPestErrors into crate::error::Errors

    Ok(Stage1Rep { input, pest })
}

/// Pest pair holder
///
/// The grammar is a flat lexer, so the pairs under the root are the tokens themselves.
#[derive(Debug)]
pub struct Stage1Rep<'a> {
    pub input: &'a str,
    pub pest: Pairs<'a, Rule>,
}
