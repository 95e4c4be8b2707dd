//! The WHERE clause: a conjunction of equality comparisons.
use crate::engine::ra::{AttributeRef, Operator, ValueExpression};
use crate::engine::ra_builder::TranslationError;
use crate::engine::syntax::{Node, Punctuation, Statement, Token, TokenClass};
use log::{debug, trace};

/// Connectives we can't turn into a conjunction.
const UNSUPPORTED_KEYWORDS: [&str; 2] = ["OR", "NOT"];

/// The selection condition of a statement, if it has any comparisons.
///
/// Comparisons are looked for directly in the WHERE clause and one level down, inside
/// parentheses. Anything nested deeper is not picked up.
pub fn build_condition(statement: &Statement) -> Result<Option<ValueExpression>, TranslationError> {
    let Some(clause) = statement
        .tokens()
        .iter()
        .find(|token| matches!(token, Node::Where(_)))
    else {
        debug!("No WHERE clause");
        return Ok(None);
    };

    check_connectives(clause)?;

    let comparisons = find_comparisons(clause);
    debug!("Found {} comparison(s)", comparisons.len());

    let conditions = comparisons
        .into_iter()
        .map(translate_comparison)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(conditions
        .into_iter()
        .reduce(|left, right| ValueExpression::binary(left, Operator::And, right)))
}

/// The same two levels [find_comparisons] looks at.
fn searched_nodes(clause: &Node) -> impl Iterator<Item = &Node> {
    clause
        .children()
        .iter()
        .flat_map(|child| std::iter::once(child).chain(child.children()))
}

fn find_comparisons(clause: &Node) -> Vec<&Node> {
    clause
        .children()
        .iter()
        .flat_map(|child| match child {
            Node::Comparison(_) => vec![child],
            _ => child
                .children()
                .iter()
                .filter(|grandchild| matches!(grandchild, Node::Comparison(_)))
                .collect(),
        })
        .collect()
}

/// Folding `a = 1 OR b = 2` into an AND would select something else entirely.
fn check_connectives(clause: &Node) -> Result<(), TranslationError> {
    let unsupported = searched_nodes(clause).find_map(|node| {
        let token = node.leaf()?;

        UNSUPPORTED_KEYWORDS
            .iter()
            .any(|keyword| token.is_keyword(keyword))
            .then_some(token)
    });

    match unsupported {
        Some(token) => Err(TranslationError::UnsupportedKeyword {
            keyword: token.text.trim().to_uppercase(),
            position: token.position,
        }),
        None => Ok(()),
    }
}

fn translate_comparison(comparison: &Node) -> Result<ValueExpression, TranslationError> {
    let parts = comparison_parts(&comparison.flatten());

    // The operator is always taken to be an equality, whatever it says.
    let operands = match parts.as_slice() {
        [left, _operator, right] => operand(left).zip(operand(right)),
        _ => None,
    };

    let Some((left, right)) = operands else {
        return Err(TranslationError::InvalidComparisonShape {
            parts,
            position: comparison.position(),
        });
    };

    trace!("Comparison {:?} translated", comparison.text());

    Ok(ValueExpression::binary(left, Operator::Eq, right))
}

/// Glues `relation . name` back together and drops punctuation and anything else that can't be a
/// part.
///
/// Arithmetic operators are kept, so `a = b + 1` or `a = -b` never pass for a plain comparison.
fn comparison_parts(leaves: &[&Token]) -> Vec<String> {
    let leaves: Vec<&Token> = leaves
        .iter()
        .copied()
        .filter(|leaf| !leaf.is_trivia())
        .collect();
    let mut parts = Vec::new();
    let mut rest = leaves.as_slice();

    while let Some((token, tail)) = rest.split_first() {
        if let [relation, dot, name, after @ ..] = rest {
            if relation.is_name() && dot.is_punctuation(Punctuation::Dot) && name.is_name() {
                parts.push(format!("{}.{}", relation.text.trim(), name.text.trim()));
                rest = after;
                continue;
            }
        }

        rest = tail;

        match token.class {
            TokenClass::ComparisonOperator
            | TokenClass::StringLiteral
            | TokenClass::IntegerLiteral
            | TokenClass::Name
            | TokenClass::Operator
            | TokenClass::Wildcard => parts.push(token.text.trim().to_string()),
            _ => trace!("Dropping {:?} from a comparison", token.text),
        }
    }

    parts
}

/// Classifies an operand by its text. `None` if it has too many dots to be an attribute.
///
/// The dot check comes first, so even a quoted `'x.y'` is read as `'x` `.` `y'`.
fn operand(text: &str) -> Option<ValueExpression> {
    if text.contains('.') {
        return match text.split('.').collect::<Vec<_>>().as_slice() {
            [relation, name] => Some(AttributeRef::qualified(*relation, *name).into()),
            _ => None,
        };
    }

    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        return Some(ValueExpression::string(unquote(text)));
    }

    if is_integer(text) {
        return Some(ValueExpression::integer(text));
    }

    Some(AttributeRef::unqualified(text).into())
}

/// `'it''s'` becomes `it's`.
fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('\'')
        .and_then(|text| text.strip_suffix('\''))
        .unwrap_or(text);

    inner.replace("''", "'")
}

fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
