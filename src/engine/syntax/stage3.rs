//! Stage 3 groups the flat tokens into the syntactic units the translator works with.
//!
//! The groups are built in passes, each pass working on the output of the previous one:
//!   1. parentheses
//!   2. identifiers: `name`, `relation.name`, `name alias`, `name AS alias`
//!   3. comparisons: `operand = operand`, operands may be signed or arithmetic like `b + 1`
//!   4. identifier lists: `a, b.c, d e`
//!   5. the WHERE clause (top level only)
//!
//! Passes 2 to 4 also run inside every pair of parentheses.
//!
//! Nothing here can fail. Tokens that don't fit a group are left as they are, and it's up to the
//! translator to decide if it can make sense of them.
use crate::engine::syntax::stage2::Stage2Rep;
use crate::engine::syntax::{Group, Node, Punctuation, Statement, Token, TokenClass};
use std::collections::VecDeque;

/// Keywords that end a WHERE clause.
const WHERE_TERMINATORS: [&str; 5] = ["GROUP", "ORDER", "HAVING", "LIMIT", "UNION"];

pub struct Stage3Rep<'a> {
    pub input: &'a str,
    pub statements: Vec<Statement>,
}

impl<'a> From<Stage2Rep<'a>> for Stage3Rep<'a> {
    fn from(stage2: Stage2Rep<'a>) -> Self {
        let statements = split_statements(stage2.tokens)
            .into_iter()
            .map(group_statement)
            .collect();

        Stage3Rep {
            input: stage2.input,
            statements,
        }
    }
}

/// Splits tokens on top level semicolons, each statement keeps its semicolon.
///
/// Statements with nothing but whitespace and comments are dropped, unless there is nothing else:
/// we always produce at least one statement.
fn split_statements(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut statements = vec![Vec::new()];
    let mut depth = 0usize;

    for token in tokens {
        let ends_statement = match token.class {
            TokenClass::Punctuation(Punctuation::OpenParenthesis) => {
                depth += 1;
                false
            }
            TokenClass::Punctuation(Punctuation::CloseParenthesis) => {
                depth = depth.saturating_sub(1);
                false
            }
            TokenClass::Punctuation(Punctuation::Semicolon) => depth == 0,
            _ => false,
        };

        if let Some(statement) = statements.last_mut() {
            statement.push(token);
        }

        if ends_statement {
            statements.push(Vec::new());
        }
    }

    let significant: Vec<_> = statements
        .into_iter()
        .filter(|statement| {
            statement.iter().any(|token| {
                !token.is_trivia() && !token.is_punctuation(Punctuation::Semicolon)
            })
        })
        .collect();

    if significant.is_empty() {
        vec![Vec::new()]
    } else {
        significant
    }
}

fn group_statement(tokens: Vec<Token>) -> Statement {
    let nodes = tokens.into_iter().map(Node::Leaf).collect();
    let nodes = group_where(group_within(group_parentheses(nodes)));

    Statement::new(nodes)
}

/// Runs every pass that applies both at the top level and inside parentheses.
fn group_within(nodes: Vec<Node>) -> Vec<Node> {
    group_identifier_lists(group_comparisons(group_identifiers(nodes)))
}

/// Builds parenthesis groups, innermost first. Unbalanced parentheses stay plain tokens.
fn group_parentheses(nodes: Vec<Node>) -> Vec<Node> {
    // The bottom frame is the statement itself, every other frame starts with a "(".
    let mut frames: Vec<Vec<Node>> = vec![Vec::new()];

    for node in nodes {
        if node.is_punctuation(Punctuation::OpenParenthesis) {
            frames.push(vec![node]);
        } else if node.is_punctuation(Punctuation::CloseParenthesis) && frames.len() > 1 {
            if let Some(mut frame) = frames.pop() {
                let inner = frame.split_off(1);
                frame.extend(group_within(inner));
                frame.push(node);

                if let Some(parent) = frames.last_mut() {
                    parent.push(Node::Parenthesis(Group::new(frame)));
                }
            }
        } else if let Some(current) = frames.last_mut() {
            current.push(node);
        }
    }

    // Parentheses that were never closed: give their tokens back to the enclosing frame.
    while frames.len() > 1 {
        if let Some(frame) = frames.pop() {
            if let Some(parent) = frames.last_mut() {
                parent.extend(frame);
            }
        }
    }

    frames.pop().unwrap_or_default()
}

fn group_identifiers(nodes: Vec<Node>) -> Vec<Node> {
    let mut rest: VecDeque<Node> = nodes.into();
    let mut grouped = Vec::new();

    while let Some(first) = rest.front() {
        if !first.is_name() {
            grouped.extend(rest.pop_front());
            continue;
        }

        let name_end = qualified_name_end(&rest);
        let alias_end = alias_end(&rest, name_end);

        match alias_end.or((name_end > 1).then_some(name_end)) {
            Some(end) => {
                let children = rest.drain(..end).collect();
                grouped.push(Node::Identifier(Group::new(children)));
            }
            None => grouped.extend(rest.pop_front()),
        }
    }

    grouped
}

/// End (exclusive) of a `name(.name)*` chain starting at the front.
fn qualified_name_end(nodes: &VecDeque<Node>) -> usize {
    let mut end = 1;

    while nodes
        .get(end)
        .is_some_and(|node| node.is_punctuation(Punctuation::Dot))
        && nodes.get(end + 1).is_some_and(Node::is_name)
    {
        end += 2;
    }

    end
}

/// End (exclusive) of the alias following a name that ends at `name_end`, if there is one.
fn alias_end(nodes: &VecDeque<Node>, name_end: usize) -> Option<usize> {
    let after_space = skip_trivia(nodes, name_end);

    if nodes.get(after_space).is_some_and(|node| node.is_keyword("AS")) {
        let alias = skip_trivia(nodes, after_space + 1);

        return nodes.get(alias).is_some_and(Node::is_name).then_some(alias + 1);
    }

    // Without AS, there must be some whitespace between the name and its alias.
    let is_alias = after_space > name_end && nodes.get(after_space).is_some_and(Node::is_name);

    is_alias.then_some(after_space + 1)
}

fn group_comparisons(nodes: Vec<Node>) -> Vec<Node> {
    let mut rest: VecDeque<Node> = nodes.into();
    let mut grouped = Vec::new();

    while !rest.is_empty() {
        if let Some(end) = comparison_end(&rest) {
            let children = rest.drain(..end).collect();
            grouped.push(Node::Comparison(Group::new(children)));
            continue;
        }

        grouped.extend(rest.pop_front());
    }

    grouped
}

/// End (exclusive) of `operand <comparison operator> operand` starting at the front.
fn comparison_end(nodes: &VecDeque<Node>) -> Option<usize> {
    let left_end = operand_end(nodes, 0)?;
    let operator = skip_trivia(nodes, left_end);

    if nodes.get(operator)?.class() != Some(TokenClass::ComparisonOperator) {
        return None;
    }

    operand_end(nodes, skip_trivia(nodes, operator + 1))
}

/// End (exclusive) of the operand starting at `start`.
///
/// Arithmetic is swallowed whole, sign included: `-b`, `b + 1`, `b * 2` and `b -1` are all one
/// operand.
fn operand_end(nodes: &VecDeque<Node>, start: usize) -> Option<usize> {
    let mut first = start;
    if nodes.get(first).is_some_and(is_sign) {
        first = skip_trivia(nodes, first + 1);
    }

    if !nodes.get(first).is_some_and(is_operand) {
        return None;
    }

    let mut end = first + 1;
    loop {
        let next = skip_trivia(nodes, end);

        match nodes.get(next) {
            Some(node) if is_signed_number(node) => end = next + 1,
            Some(node) if is_arithmetic(node) => {
                let operand = skip_trivia(nodes, next + 1);
                if !nodes.get(operand).is_some_and(is_operand) {
                    break;
                }

                end = operand + 1;
            }
            _ => break,
        }
    }

    Some(end)
}

fn is_operand(node: &Node) -> bool {
    match node {
        Node::Identifier(_) | Node::Parenthesis(_) => true,
        Node::Leaf(token) => matches!(
            token.class,
            TokenClass::Name
                | TokenClass::StringLiteral
                | TokenClass::IntegerLiteral
                | TokenClass::FloatLiteral
        ),
        _ => false,
    }
}

fn is_sign(node: &Node) -> bool {
    node.leaf().is_some_and(|token| {
        token.class == TokenClass::Operator && matches!(token.text.as_str(), "+" | "-")
    })
}

/// `*` is lexed as a wildcard, between two operands it's a multiplication.
fn is_arithmetic(node: &Node) -> bool {
    matches!(
        node.class(),
        Some(TokenClass::Operator | TokenClass::Wildcard)
    )
}

/// `b -1` is lexed as `b` followed by the number `-1`.
fn is_signed_number(node: &Node) -> bool {
    node.leaf().is_some_and(|token| {
        matches!(
            token.class,
            TokenClass::IntegerLiteral | TokenClass::FloatLiteral
        ) && token.text.starts_with('-')
    })
}

fn group_identifier_lists(nodes: Vec<Node>) -> Vec<Node> {
    let mut rest: VecDeque<Node> = nodes.into();
    let mut grouped = Vec::new();

    while let Some(first) = rest.front() {
        if is_list_item(first) {
            if let Some(end) = list_end(&rest) {
                let children = rest.drain(..end).collect();
                grouped.push(Node::IdentifierList(Group::new(children)));
                continue;
            }
        }

        grouped.extend(rest.pop_front());
    }

    grouped
}

/// End (exclusive) of the list starting at the front, if there are at least two items.
fn list_end(nodes: &VecDeque<Node>) -> Option<usize> {
    let mut end = None;
    let mut after_item = 1;

    loop {
        let comma = skip_trivia(nodes, after_item);
        if !nodes
            .get(comma)
            .is_some_and(|node| node.is_punctuation(Punctuation::Comma))
        {
            break;
        }

        let item = skip_trivia(nodes, comma + 1);
        if !nodes.get(item).is_some_and(is_list_item) {
            break;
        }

        after_item = item + 1;
        end = Some(after_item);
    }

    end
}

fn is_list_item(node: &Node) -> bool {
    match node {
        Node::Identifier(_) => true,
        Node::Leaf(token) => matches!(
            token.class,
            TokenClass::Name
                | TokenClass::Wildcard
                | TokenClass::StringLiteral
                | TokenClass::IntegerLiteral
                | TokenClass::FloatLiteral
        ),
        _ => false,
    }
}

/// Wraps everything from the WHERE keyword to the end of the clause.
fn group_where(mut nodes: Vec<Node>) -> Vec<Node> {
    let Some(start) = nodes.iter().position(|node| node.is_keyword("WHERE")) else {
        return nodes;
    };

    let end = nodes[start + 1..]
        .iter()
        .position(|node| {
            node.is_punctuation(Punctuation::Semicolon)
                || WHERE_TERMINATORS
                    .iter()
                    .any(|keyword| node.is_keyword(keyword))
        })
        .map_or(nodes.len(), |offset| start + 1 + offset);

    let clause: Vec<_> = nodes.drain(start..end).collect();
    nodes.insert(start, Node::Where(Group::new(clause)));

    nodes
}

/// Index of the first node at or after `from` that is not whitespace or a comment.
fn skip_trivia(nodes: &VecDeque<Node>, from: usize) -> usize {
    let mut index = from;

    while nodes.get(index).is_some_and(Node::is_trivia) {
        index += 1;
    }

    index
}
