//! The token model shared by the tokenizer and the translator.
//!
//! A statement is a list of [Node]s. A node is either a classified leaf [Token], or a group
//! bundling related nodes: an identifier with its alias, a comma separated list, a comparison, a
//! WHERE clause or something in parentheses.
//!
//! Groups keep everything they were built from, whitespace included, so the text of any node is
//! just the text of its leaves glued together.
use crate::engine::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Keyword,
    /// SELECT, INSERT, UPDATE, DELETE
    Dml,
    Name,
    Punctuation(Punctuation),
    ComparisonOperator,
    /// Arithmetic and concatenation operators.
    Operator,
    Wildcard,
    StringLiteral,
    IntegerLiteral,
    FloatLiteral,
    Comment,
    Whitespace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuation {
    Dot,
    Comma,
    OpenParenthesis,
    CloseParenthesis,
    Semicolon,
}

/// The syntactic shape of a piece of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Token),
    /// `name`, `relation.name`, `name alias` or `name AS alias`
    Identifier(Group),
    /// Comma separated identifiers or literals.
    IdentifierList(Group),
    /// `operand <comparison operator> operand`
    Comparison(Group),
    /// The WHERE keyword and everything up to the end of the clause.
    Where(Group),
    /// Anything between parentheses, parentheses included.
    Parenthesis(Group),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    children: Vec<Node>,
}

/// A single SQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statement {
    nodes: Vec<Node>,
}

impl Token {
    pub fn new(text: impl Into<String>, class: TokenClass, position: Position) -> Self {
        Token {
            text: text.into(),
            class,
            position,
        }
    }

    /// Whitespace and comments: things that never mean anything to us.
    pub fn is_trivia(&self) -> bool {
        matches!(self.class, TokenClass::Whitespace | TokenClass::Comment)
    }

    pub fn is_name(&self) -> bool {
        self.class == TokenClass::Name
    }

    pub fn is_punctuation(&self, punctuation: Punctuation) -> bool {
        self.class == TokenClass::Punctuation(punctuation)
    }

    pub fn is_keyword_or_dml(&self) -> bool {
        matches!(self.class, TokenClass::Keyword | TokenClass::Dml)
    }

    /// Case insensitive keyword check. Names, strings and such never count as keywords, even if
    /// they spell one.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is_keyword_or_dml() && self.text.trim().eq_ignore_ascii_case(keyword)
    }
}

impl Group {
    pub fn new(children: Vec<Node>) -> Self {
        Group { children }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

impl Statement {
    pub fn new(nodes: Vec<Node>) -> Self {
        Statement { nodes }
    }

    /// The top level nodes of the statement.
    pub fn tokens(&self) -> &[Node] {
        &self.nodes
    }
}

impl Node {
    pub fn is_group(&self) -> bool {
        !matches!(self, Node::Leaf(_))
    }

    pub fn leaf(&self) -> Option<&Token> {
        match self {
            Node::Leaf(token) => Some(token),
            _ => None,
        }
    }

    pub fn class(&self) -> Option<TokenClass> {
        self.leaf().map(|token| token.class)
    }

    fn group(&self) -> Option<&Group> {
        match self {
            Node::Leaf(_) => None,
            Node::Identifier(group)
            | Node::IdentifierList(group)
            | Node::Comparison(group)
            | Node::Where(group)
            | Node::Parenthesis(group) => Some(group),
        }
    }

    /// Direct children of a group; leaves have none.
    pub fn children(&self) -> &[Node] {
        self.group().map(Group::children).unwrap_or_default()
    }

    /// All the leaves under this node, in source order, whitespace included.
    pub fn flatten(&self) -> Vec<&Token> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);

        leaves
    }

    /// The first leaf that is not whitespace or a comment.
    pub fn first_leaf(&self) -> Option<&Token> {
        match self {
            Node::Leaf(token) => Some(token).filter(|token| !token.is_trivia()),
            _ => self.children().iter().find_map(Node::first_leaf),
        }
    }

    /// The source text of the node.
    pub fn text(&self) -> String {
        match self {
            Node::Leaf(token) => token.text.clone(),
            _ => self.flatten().iter().map(|token| token.text.as_str()).collect(),
        }
    }

    pub fn position(&self) -> Position {
        let leaves = self.flatten();

        match (leaves.first(), leaves.last()) {
            (Some(first), Some(last)) => first.position.covering(last.position),
            _ => Position::default(),
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.leaf().is_some_and(Token::is_trivia)
    }

    pub fn is_name(&self) -> bool {
        self.leaf().is_some_and(Token::is_name)
    }

    pub fn is_punctuation(&self, punctuation: Punctuation) -> bool {
        self.leaf()
            .is_some_and(|token| token.is_punctuation(punctuation))
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.leaf().is_some_and(|token| token.is_keyword(keyword))
    }

    /// The name an identifier refers to, without its alias.
    ///
    /// For qualified identifiers, like `db.relation`, this is the last part. Anything that is not
    /// a name or an identifier has no real name.
    pub fn real_name(&self) -> Option<String> {
        match self {
            Node::Leaf(token) if token.is_name() => Some(token.text.clone()),
            Node::Identifier(group) => group
                .children()
                .iter()
                .take_while(|child| !child.is_trivia() && !child.is_keyword("AS"))
                .filter_map(Node::leaf)
                .filter(|token| token.is_name())
                .last()
                .map(|token| token.text.clone()),
            _ => None,
        }
    }

    /// The alias of an identifier: the name after `AS`, or the name after the whitespace.
    pub fn alias(&self) -> Option<String> {
        let Node::Identifier(group) = self else {
            return None;
        };

        let children = group.children();
        let after_name = children
            .iter()
            .position(|child| child.is_trivia() || child.is_keyword("AS"))?;

        children[after_name..]
            .iter()
            .filter(|child| !child.is_trivia() && !child.is_keyword("AS"))
            .find_map(|child| child.leaf().filter(|token| token.is_name()))
            .map(|token| token.text.clone())
    }

    /// The members of an identifier list, without commas and whitespace.
    pub fn identifiers(&self) -> Vec<&Node> {
        match self {
            Node::IdentifierList(group) => group
                .children()
                .iter()
                .filter(|child| !child.is_trivia() && !child.is_punctuation(Punctuation::Comma))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn collect_leaves<'a>(node: &'a Node, leaves: &mut Vec<&'a Token>) {
    match node {
        Node::Leaf(token) => leaves.push(token),
        _ => {
            for child in node.children() {
                collect_leaves(child, leaves);
            }
        }
    }
}

/// Flattens nodes into their leaves, skipping whitespace and comments.
///
/// This is the view of a clause that the translator scans left to right.
pub fn significant_leaves<'a, I>(nodes: I) -> Vec<&'a Token>
where
    I: IntoIterator<Item = &'a Node>,
{
    nodes
        .into_iter()
        .flat_map(Node::flatten)
        .filter(|token| !token.is_trivia())
        .collect()
}

#[cfg(test)]
pub mod build {
    //! Shorthands for writing token trees by hand in tests.
    use super::*;

    pub fn leaf(text: &str, class: TokenClass) -> Node {
        Node::Leaf(Token::new(text, class, Position::default()))
    }

    pub fn name(text: &str) -> Node {
        leaf(text, TokenClass::Name)
    }

    pub fn keyword(text: &str) -> Node {
        leaf(text, TokenClass::Keyword)
    }

    pub fn space() -> Node {
        leaf(" ", TokenClass::Whitespace)
    }

    pub fn comma() -> Node {
        leaf(",", TokenClass::Punctuation(Punctuation::Comma))
    }

    pub fn dot() -> Node {
        leaf(".", TokenClass::Punctuation(Punctuation::Dot))
    }

    pub fn equals() -> Node {
        leaf("=", TokenClass::ComparisonOperator)
    }

    pub fn identifier(children: Vec<Node>) -> Node {
        Node::Identifier(Group::new(children))
    }

    pub fn identifier_list(children: Vec<Node>) -> Node {
        Node::IdentifierList(Group::new(children))
    }

    pub fn comparison(children: Vec<Node>) -> Node {
        Node::Comparison(Group::new(children))
    }

    pub fn where_clause(children: Vec<Node>) -> Node {
        Node::Where(Group::new(children))
    }

    pub fn parenthesis(children: Vec<Node>) -> Node {
        Node::Parenthesis(Group::new(children))
    }
}
