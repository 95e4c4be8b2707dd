//! The FROM clause: `FROM Person p, Eats, Serves AS s`.
//!
//! Depending on how the tokens were grouped, the relations can show up as an identifier list, a
//! single identifier, a bare name or just some text with commas in it. Each of these shapes has
//! its own extraction strategy, and the strategies are tried in order until one recognizes the
//! token.
use crate::engine::ra::Expression;
use crate::engine::ra_builder::clauses::{extract, FROM_STOP_KEYWORDS};
use crate::engine::ra_builder::{Clause, TranslationError};
use crate::engine::syntax::{Node, Statement};
use log::{debug, trace};
use std::collections::HashSet;

/// Returns `Some` when the strategy recognizes the token, even if the token turns out not to
/// hold any relation.
type Strategy = fn(&Node) -> Option<Vec<Expression>>;

const STRATEGIES: [(&str, Strategy); 4] = [
    ("identifier list", from_identifier_list),
    ("identifier", from_identifier),
    ("bare name", from_bare_name),
    ("raw text", from_raw_text),
];

/// The relations of a query, in FROM clause order, without duplicates.
///
/// There is always at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationList {
    first: Expression,
    rest: Vec<Expression>,
}

impl RelationList {
    fn new(relations: Vec<Expression>) -> Option<Self> {
        let mut relations = relations.into_iter();
        let first = relations.next()?;

        Some(RelationList {
            first,
            rest: relations.collect(),
        })
    }

    /// `R1 x R2 x R3` as `Cross(Cross(R1, R2), R3)`. A single relation stays as it is.
    pub fn into_cross_chain(self) -> Expression {
        self.rest.into_iter().fold(self.first, Expression::cross)
    }

    #[cfg(test)]
    fn into_vec(self) -> Vec<Expression> {
        std::iter::once(self.first).chain(self.rest).collect()
    }
}

pub fn build_relations(statement: &Statement) -> Result<RelationList, TranslationError> {
    let clause = extract(statement.tokens(), "FROM", &FROM_STOP_KEYWORDS);

    let Some(position) = clause
        .iter()
        .map(|token| token.position())
        .reduce(|left, right| left.covering(right))
    else {
        return Err(TranslationError::MalformedClause {
            clause: Clause::From,
        });
    };

    let relations = deduplicate(clause.into_iter().flat_map(relations_in).collect());

    debug!("Found {} relation(s)", relations.len());

    RelationList::new(relations).ok_or(TranslationError::EmptyRelationSet { position })
}

fn relations_in(token: &Node) -> Vec<Expression> {
    let found = STRATEGIES.iter().find_map(|(strategy_name, strategy)| {
        let relations = strategy(token)?;
        trace!("{:?} read as {strategy_name}", token.text());

        Some(relations)
    });

    found.unwrap_or_else(|| {
        debug!("Ignoring {:?} in the FROM clause", token.text());
        Vec::new()
    })
}

/// Relations are the same if they render the same, the first one wins.
fn deduplicate(relations: Vec<Expression>) -> Vec<Expression> {
    let mut seen = HashSet::new();

    relations
        .into_iter()
        .filter(|relation| seen.insert(relation.to_string()))
        .collect()
}

fn from_identifier_list(token: &Node) -> Option<Vec<Expression>> {
    match token {
        Node::IdentifierList(_) => Some(
            token
                .identifiers()
                .into_iter()
                .filter_map(relation_from_identifier)
                .collect(),
        ),
        _ => None,
    }
}

fn from_identifier(token: &Node) -> Option<Vec<Expression>> {
    match token {
        Node::Identifier(_) => Some(relation_from_identifier(token).into_iter().collect()),
        _ => None,
    }
}

/// A name on its own. Dotted names are attribute references that ended up here, so we skip them.
fn from_bare_name(token: &Node) -> Option<Vec<Expression>> {
    let leaf = token.leaf().filter(|leaf| leaf.is_name())?;
    let name = leaf.text.trim();

    if name.contains('.') {
        debug!("Skipping qualified name {name:?} in the FROM clause");
        return Some(Vec::new());
    }

    Some(vec![Expression::relation(name)])
}

/// Last resort: `a x, b y` as plain text, for whatever did not get grouped as an identifier list.
fn from_raw_text(token: &Node) -> Option<Vec<Expression>> {
    let text = token.text();
    if !text.contains(',') {
        return None;
    }

    let relations = text
        .replace(['(', ')'], " ")
        .split(',')
        .filter(|piece| !piece.contains('.'))
        .filter_map(|piece| {
            let mut words = piece.split_whitespace();
            let real_name = words.next()?;
            let alias = match words.next() {
                Some(word) if word.eq_ignore_ascii_case("AS") => words.next(),
                word => word,
            };

            Some(named_relation(real_name, alias))
        })
        .collect();

    Some(relations)
}

fn relation_from_identifier(identifier: &Node) -> Option<Expression> {
    let real_name = identifier.real_name().or_else(|| {
        identifier
            .flatten()
            .into_iter()
            .find(|token| token.is_name())
            .map(|token| token.text.trim().to_string())
    })?;
    let alias = identifier.alias();

    Some(named_relation(&real_name, alias.as_deref()))
}

fn named_relation(real_name: &str, alias: Option<&str>) -> Expression {
    let relation = Expression::relation(real_name);

    match alias {
        Some(alias) if alias != real_name => Expression::rename(relation, alias),
        _ => relation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::syntax::build::*;
    use crate::engine::syntax::{parse_statements, Punctuation, TokenClass};

    fn relations(input: &str) -> Result<Vec<Expression>, TranslationError> {
        build_relations(&parse_statements(input).unwrap()[0]).map(RelationList::into_vec)
    }

    fn from(tokens: Vec<Node>) -> Statement {
        let mut nodes = vec![keyword("FROM"), space()];
        nodes.extend(tokens);

        Statement::new(nodes)
    }

    #[test]
    fn test_duplicates_are_removed() {
        assert_eq!(
            Ok(vec![Expression::relation("A")]),
            relations("select x from A, A")
        );
    }

    #[test]
    fn test_alias() {
        assert_eq!(
            Ok(vec![Expression::rename(Expression::relation("Person"), "p")]),
            relations("select x from Person p")
        );
        assert_eq!(
            Ok(vec![Expression::relation("Person")]),
            relations("select x from Person")
        );
    }

    #[test]
    fn test_alias_same_as_name() {
        assert_eq!(
            Ok(vec![Expression::relation("Person")]),
            relations("select x from Person AS Person")
        );
    }

    #[test]
    fn test_renamed_relations_are_not_duplicates() {
        assert_eq!(
            Ok(vec![
                Expression::rename(Expression::relation("Person"), "a"),
                Expression::rename(Expression::relation("Person"), "b"),
                Expression::relation("Eats"),
            ]),
            relations("select x from Person a, Person AS b, Eats, Person a")
        );
    }

    #[test]
    fn test_cross_chain_is_left_associative() {
        let list = build_relations(&parse_statements("select x from a, b, c").unwrap()[0]);

        assert_eq!(
            Expression::cross(
                Expression::cross(Expression::relation("a"), Expression::relation("b")),
                Expression::relation("c")
            ),
            list.unwrap().into_cross_chain()
        );
    }

    #[test]
    fn test_missing_from() {
        assert_eq!(
            Err(TranslationError::MalformedClause {
                clause: Clause::From
            }),
            relations("select x")
        );
        assert_eq!(
            Err(TranslationError::MalformedClause {
                clause: Clause::From
            }),
            relations("select x from where x = 1")
        );
    }

    #[test]
    fn test_nothing_recognizable() {
        assert!(matches!(
            relations("select x from 42"),
            Err(TranslationError::EmptyRelationSet { .. })
        ));
    }

    #[test]
    fn test_dotted_bare_name_is_skipped() {
        let statement = from(vec![name("a.b"), space(), name("c")]);

        assert_eq!(
            vec![Expression::relation("c")],
            build_relations(&statement).unwrap().into_vec()
        );
    }

    #[test]
    fn test_identifier_without_real_name_falls_back_to_first_name() {
        let statement = from(vec![identifier(vec![
            leaf("*", TokenClass::Wildcard),
            space(),
            name("Person"),
        ])]);

        assert_eq!(
            vec![Expression::relation("Person")],
            build_relations(&statement).unwrap().into_vec()
        );
    }

    #[test]
    fn test_raw_text() {
        let statement = from(vec![parenthesis(vec![
            leaf("(", TokenClass::Punctuation(Punctuation::OpenParenthesis)),
            name("Person"),
            space(),
            name("p"),
            comma(),
            space(),
            name("Eats"),
            space(),
            keyword("AS"),
            space(),
            name("e"),
            comma(),
            name("a.b"),
            leaf(")", TokenClass::Punctuation(Punctuation::CloseParenthesis)),
        ])]);

        assert_eq!(
            vec![
                Expression::rename(Expression::relation("Person"), "p"),
                Expression::rename(Expression::relation("Eats"), "e"),
            ],
            build_relations(&statement).unwrap().into_vec()
        );
    }

    #[test]
    fn test_parenthesized_list_from_sql() {
        assert_eq!(
            Ok(vec![Expression::relation("a"), Expression::relation("b")]),
            relations("select x from (a, b)")
        );
    }
}
