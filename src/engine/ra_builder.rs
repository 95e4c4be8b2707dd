//! Builds relational algebra expressions out of grouped SQL statements.
//!
//! Each clause has its own builder:
//!   - [relations] turns the FROM clause into relations, possibly renamed;
//!   - [predicate] turns the WHERE clause into a condition;
//!   - [projection] turns the SELECT clause into attributes.
//!
//! The assembler then stacks them up: `Project(Select(Cross(Cross(R1, R2), R3)))`.
use crate::engine::ra::{AttributeRef, Expression, ValueExpression};
use crate::engine::syntax::Statement;
use crate::engine::Position;
use log::debug;
use thiserror::Error;

mod clauses;
mod predicate;
mod projection;
mod relations;

use relations::RelationList;

pub fn build_expression(statement: &Statement) -> Result<Expression, TranslationError> {
    let relations = relations::build_relations(statement)?;
    let condition = predicate::build_condition(statement)?;
    let attributes = projection::build_projection(statement);

    Ok(assemble(relations, condition, attributes))
}

/// Stacks the pieces of a query on top of each other.
///
/// No WHERE clause means no Select node, and no attributes mean no Project node: we never build
/// empty wrappers.
pub fn assemble(
    relations: RelationList,
    condition: Option<ValueExpression>,
    attributes: Vec<AttributeRef>,
) -> Expression {
    let expression = relations.into_cross_chain();

    let expression = match condition {
        Some(condition) => Expression::select(condition, expression),
        None => {
            debug!("No condition, skipping the selection");
            expression
        }
    };

    if attributes.is_empty() {
        debug!("No attributes, skipping the projection");
        expression
    } else {
        Expression::project(attributes, expression)
    }
}

/// Clauses a query can't do without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    From,
}

/// Everything that can make a statement untranslatable, once it's tokenized.
///
/// None of these are worth retrying: the same input will always fail the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// A required clause is missing, or there's nothing in it.
    MalformedClause { clause: Clause },
    /// There is a FROM clause, but none of it looks like a relation.
    EmptyRelationSet { position: Position },
    /// A comparison did not boil down to `operand operator operand`.
    InvalidComparisonShape {
        parts: Vec<String>,
        position: Position,
    },
    /// The WHERE clause uses something other than AND to combine comparisons.
    UnsupportedKeyword { keyword: String, position: Position },
}
