//! Relational algebra expression trees.
//!
//! Every node owns its children, so a tree can't share subtrees or contain cycles. Nodes are only
//! built through the constructor functions below, the translator never mutates them afterwards.
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Expression {
    Relation(RelationRef),
    Rename(Rename),
    Cross {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Select {
        condition: ValueExpression,
        input: Box<Expression>,
    },
    Project {
        attributes: Vec<AttributeRef>,
        input: Box<Expression>,
    },
}

/// A base relation, referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationRef {
    pub name: String,
}

/// Gives an expression another name: `FROM Person p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub alias: String,
    pub input: Box<Expression>,
}

/// `relation.name`, or just `name` when the relation is left to be figured out later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeRef {
    pub relation: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValueExpression {
    Attribute(AttributeRef),
    Literal(Literal),
    Binary(Box<BinaryOp>),
}

/// A literal value like 1 or 'kitten'.
///
/// Numbers are kept as text, their range is none of our business. Strings hold their content,
/// without the quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Integer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryOp {
    pub left: ValueExpression,
    pub operator: Operator,
    pub right: ValueExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    And,
}

impl Expression {
    pub fn relation(name: impl Into<String>) -> Self {
        Expression::Relation(RelationRef { name: name.into() })
    }

    pub fn rename(input: Expression, alias: impl Into<String>) -> Self {
        Expression::Rename(Rename {
            alias: alias.into(),
            input: Box::new(input),
        })
    }

    pub fn cross(left: Expression, right: Expression) -> Self {
        Expression::Cross {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn select(condition: ValueExpression, input: Expression) -> Self {
        Expression::Select {
            condition,
            input: Box::new(input),
        }
    }

    pub fn project(attributes: Vec<AttributeRef>, input: Expression) -> Self {
        Expression::Project {
            attributes,
            input: Box::new(input),
        }
    }
}

impl AttributeRef {
    pub fn new(relation: Option<String>, name: impl Into<String>) -> Self {
        AttributeRef {
            relation,
            name: name.into(),
        }
    }

    pub fn qualified(relation: impl Into<String>, name: impl Into<String>) -> Self {
        AttributeRef::new(Some(relation.into()), name)
    }

    pub fn unqualified(name: impl Into<String>) -> Self {
        AttributeRef::new(None, name)
    }
}

impl ValueExpression {
    pub fn string(value: impl Into<String>) -> Self {
        ValueExpression::Literal(Literal::String(value.into()))
    }

    pub fn integer(value: impl Into<String>) -> Self {
        ValueExpression::Literal(Literal::Integer(value.into()))
    }

    pub fn binary(left: ValueExpression, operator: Operator, right: ValueExpression) -> Self {
        ValueExpression::Binary(Box::new(BinaryOp {
            left,
            operator,
            right,
        }))
    }
}

impl From<AttributeRef> for ValueExpression {
    fn from(attribute: AttributeRef) -> Self {
        ValueExpression::Attribute(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let expression = Expression::select(
            ValueExpression::binary(
                AttributeRef::qualified("a", "x").into(),
                Operator::Eq,
                ValueExpression::integer("1"),
            ),
            Expression::rename(Expression::relation("A"), "a"),
        );

        let json = serde_json::to_value(&expression).unwrap();

        assert_eq!("select", json["kind"]);
        assert_eq!("rename", json["value"]["input"]["kind"]);
        assert_eq!("A", json["value"]["input"]["value"]["input"]["value"]["name"]);
        assert_eq!("eq", json["value"]["condition"]["value"]["operator"]);
        assert_eq!("integer", json["value"]["condition"]["value"]["right"]["value"]["kind"]);
    }
}
