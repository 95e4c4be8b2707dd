use crate::engine::ra::{
    AttributeRef, BinaryOp, Expression, Literal, Operator, RelationRef, Rename, ValueExpression,
};
use std::fmt::{Display, Formatter};

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Relation(relation) => write!(f, "{relation}"),
            Expression::Rename(rename) => write!(f, "{rename}"),
            Expression::Cross { left, right } => {
                // Crosses chain to the left, so a cross on the left needs no parentheses.
                let left = match left.as_ref() {
                    Expression::Cross { .. } => left.to_string(),
                    _ => Operand(left).to_string(),
                };

                write!(f, "{left} \\cross {}", Operand(right))
            }
            Expression::Select { condition, input } => {
                write!(f, "\\select_{{{condition}}} {}", UnaryInput(input))
            }
            Expression::Project { attributes, input } => {
                write!(f, "\\project_{{{}}} {}", AttributeList(attributes), UnaryInput(input))
            }
        }
    }
}

impl Display for RelationRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Rename {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\\rename_{{{}: *}} {}", self.alias, UnaryInput(&self.input))
    }
}

/// A cross operand: anything but a base relation gets parentheses.
struct Operand<'a>(&'a Expression);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Expression::Relation(relation) => write!(f, "{relation}"),
            expression => write!(f, "({expression})"),
        }
    }
}

/// The input of a unary operator. Unary operators bind tighter than crosses, so only crosses need
/// parentheses.
struct UnaryInput<'a>(&'a Expression);

impl Display for UnaryInput<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            expression @ Expression::Cross { .. } => write!(f, "({expression})"),
            expression => write!(f, "{expression}"),
        }
    }
}

struct AttributeList<'a>(&'a [AttributeRef]);

impl Display for AttributeList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some((first, rest)) = self.0.split_first() {
            write!(f, "{first}")?;

            for attribute in rest {
                write!(f, ", {attribute}")?;
            }
        }

        Ok(())
    }
}

impl Display for AttributeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.relation {
            Some(relation) => write!(f, "{relation}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Display for ValueExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueExpression::Attribute(attribute) => write!(f, "{attribute}"),
            ValueExpression::Literal(literal) => write!(f, "{literal}"),
            ValueExpression::Binary(operation) => write!(f, "{operation}"),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Literal::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            ConditionOperand(&self.left),
            self.operator,
            ConditionOperand(&self.right)
        )
    }
}

/// Nested conditions are always parenthesized, we don't rely on precedence.
struct ConditionOperand<'a>(&'a ValueExpression);

impl Display for ConditionOperand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            operation @ ValueExpression::Binary(_) => write!(f, "({operation})"),
            value => write!(f, "{value}"),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Eq => write!(f, "="),
            Operator::And => write!(f, "and"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(name: &str) -> Expression {
        Expression::relation(name)
    }

    fn equals(left: ValueExpression, right: ValueExpression) -> ValueExpression {
        ValueExpression::binary(left, Operator::Eq, right)
    }

    #[test]
    fn test_end_to_end() {
        let expression = Expression::project(
            vec![
                AttributeRef::qualified("Person", "name"),
                AttributeRef::unqualified("pizzeria"),
            ],
            Expression::select(
                ValueExpression::binary(
                    equals(
                        AttributeRef::qualified("Person", "name").into(),
                        AttributeRef::qualified("Eats", "name").into(),
                    ),
                    Operator::And,
                    equals(
                        AttributeRef::qualified("Eats", "pizza").into(),
                        AttributeRef::qualified("Serves", "pizza").into(),
                    ),
                ),
                Expression::cross(
                    Expression::cross(relation("Person"), relation("Eats")),
                    relation("Serves"),
                ),
            ),
        );

        assert_eq!(
            "\\project_{Person.name, pizzeria} \
             \\select_{(Person.name = Eats.name) and (Eats.pizza = Serves.pizza)} \
             (Person \\cross Eats \\cross Serves)",
            expression.to_string()
        );
    }

    #[test]
    fn test_rename() {
        let expression = Expression::cross(
            Expression::rename(relation("Person"), "p"),
            relation("Eats"),
        );

        assert_eq!(
            "(\\rename_{p: *} Person) \\cross Eats",
            expression.to_string()
        );
    }

    #[test]
    fn test_cross_on_the_right_is_parenthesized() {
        let expression = Expression::cross(
            relation("a"),
            Expression::cross(relation("b"), relation("c")),
        );

        assert_eq!("a \\cross (b \\cross c)", expression.to_string());
    }

    #[test]
    fn test_unary_operators_stack_without_parentheses() {
        let expression = Expression::project(
            vec![AttributeRef::unqualified("x")],
            Expression::select(
                equals(AttributeRef::unqualified("x").into(), ValueExpression::integer("1")),
                Expression::rename(relation("R"), "r"),
            ),
        );

        assert_eq!(
            "\\project_{x} \\select_{x = 1} \\rename_{r: *} R",
            expression.to_string()
        );
    }

    #[test]
    fn test_string_quotes_are_doubled() {
        assert_eq!("'it''s'", ValueExpression::string("it's").to_string());
    }
}
