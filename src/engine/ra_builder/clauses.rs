use crate::engine::syntax::Node;
use log::{debug, trace};

pub const SELECT_STOP_KEYWORDS: [&str; 1] = ["FROM"];
pub const FROM_STOP_KEYWORDS: [&str; 4] = ["WHERE", "GROUP", "ORDER", "HAVING"];

/// Returns the tokens strictly between `start_keyword` and the first stop keyword.
///
/// Whitespace is left out. Only keywords can end a clause: a name or a string that happens to
/// spell `FROM` is just data. Groups are checked by their first token, which is how a WHERE group
/// ends the FROM clause.
///
/// An empty result means the clause is absent, it's up to the caller to decide if that's a
/// problem.
pub fn extract<'a>(tokens: &'a [Node], start_keyword: &str, stop_keywords: &[&str]) -> Vec<&'a Node> {
    let mut tokens = tokens.iter();

    if !tokens
        .by_ref()
        .any(|token| token.text().trim().eq_ignore_ascii_case(start_keyword))
    {
        debug!("No {start_keyword} clause found");
        return Vec::new();
    }

    let clause: Vec<_> = tokens
        .take_while(|token| !is_stop_keyword(token, stop_keywords))
        .filter(|token| !token.is_trivia())
        .collect();

    debug!("Found {} token(s) in the {start_keyword} clause", clause.len());

    clause
}

fn is_stop_keyword(token: &Node, stop_keywords: &[&str]) -> bool {
    let is_stop = token.first_leaf().is_some_and(|leaf| {
        stop_keywords
            .iter()
            .any(|stop_keyword| leaf.is_keyword(stop_keyword))
    });

    if is_stop {
        trace!("Clause ends at {:?}", token.text());
    }

    is_stop
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::syntax::build::*;
    use crate::engine::syntax::TokenClass;

    fn texts(nodes: Vec<&Node>) -> Vec<String> {
        nodes.into_iter().map(Node::text).collect()
    }

    #[test]
    fn test_between_keywords() {
        let tokens = vec![
            leaf("select", TokenClass::Dml),
            space(),
            name("a"),
            space(),
            keyword("from"),
            space(),
            name("b"),
        ];

        assert_eq!(
            vec!["a"],
            texts(extract(&tokens, "SELECT", &SELECT_STOP_KEYWORDS))
        );
        assert_eq!(vec!["b"], texts(extract(&tokens, "FROM", &FROM_STOP_KEYWORDS)));
    }

    #[test]
    fn test_missing_start_keyword() {
        let tokens = vec![leaf("select", TokenClass::Dml), space(), name("a")];

        assert!(extract(&tokens, "FROM", &FROM_STOP_KEYWORDS).is_empty());
    }

    #[test]
    fn test_data_spelling_a_stop_word_does_not_stop() {
        let tokens = vec![
            leaf("select", TokenClass::Dml),
            space(),
            leaf("'FROM'", TokenClass::StringLiteral),
            space(),
            name("from"),
            space(),
            keyword("FROM"),
            space(),
            name("b"),
        ];

        assert_eq!(
            vec!["'FROM'", "from"],
            texts(extract(&tokens, "SELECT", &SELECT_STOP_KEYWORDS))
        );
    }

    #[test]
    fn test_where_group_stops_from() {
        let tokens = vec![
            keyword("from"),
            space(),
            name("a"),
            space(),
            where_clause(vec![keyword("where"), space(), name("x")]),
        ];

        assert_eq!(vec!["a"], texts(extract(&tokens, "FROM", &FROM_STOP_KEYWORDS)));
    }

    #[test]
    fn test_stop_is_case_insensitive() {
        let tokens = vec![keyword("FROM"), space(), name("a"), space(), keyword("Order")];

        assert_eq!(vec!["a"], texts(extract(&tokens, "from", &FROM_STOP_KEYWORDS)));
    }
}
