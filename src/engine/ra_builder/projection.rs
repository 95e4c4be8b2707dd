use crate::engine::ra::AttributeRef;
use crate::engine::ra_builder::clauses::{extract, SELECT_STOP_KEYWORDS};
use crate::engine::syntax::{significant_leaves, Punctuation, Statement, Token};
use log::{debug, trace};

/// The attributes of the SELECT clause, in the order they were written, duplicates included.
///
/// `*`, `DISTINCT`, commas and anything else that is not an attribute is skipped, so `SELECT *`
/// gives no attributes at all.
pub fn build_projection(statement: &Statement) -> Vec<AttributeRef> {
    let clause = extract(statement.tokens(), "SELECT", &SELECT_STOP_KEYWORDS);
    let attributes = attributes_from_leaves(&significant_leaves(clause));

    debug!("Projecting {} attribute(s)", attributes.len());

    attributes
}

fn attributes_from_leaves(leaves: &[&Token]) -> Vec<AttributeRef> {
    let mut attributes = Vec::new();
    let mut rest = leaves;

    while let Some((token, tail)) = rest.split_first() {
        if let [relation, dot, name, after @ ..] = rest {
            if relation.is_name() && dot.is_punctuation(Punctuation::Dot) && name.is_name() {
                attributes.push(AttributeRef::qualified(relation.text.trim(), name.text.trim()));
                rest = after;
                continue;
            }
        }

        rest = tail;

        let text = token.text.trim();
        if let Some(attribute) = fused_attribute(text) {
            attributes.push(attribute);
        } else if token.is_name() {
            attributes.push(AttributeRef::unqualified(text));
        } else {
            trace!("Skipping {text:?} in the projection");
        }
    }

    attributes
}

/// Some tokens come with the relation already glued on: `relation.attribute`.
fn fused_attribute(text: &str) -> Option<AttributeRef> {
    match text.split('.').collect::<Vec<_>>().as_slice() {
        [relation, name] if !relation.is_empty() && !name.is_empty() => {
            Some(AttributeRef::qualified(*relation, *name))
        }
        _ => None,
    }
}
