use colored::Colorize;
use sql_ra::parse;
use sql_ra::syntax::{Node, Statement};

pub fn print_tokens(input: &str) -> Result<(), sql_ra::Error> {
    let statements = parse(input)?;

    for (number, statement) in statements.iter().enumerate() {
        println!("{}", format!("Statement {}", number + 1).bold());
        print!("{}", render_statement(statement));
    }

    Ok(())
}

fn render_statement(statement: &Statement) -> String {
    let mut output = String::new();

    for node in statement.tokens() {
        render_node(node, 1, &mut output);
    }

    output
}

fn render_node(node: &Node, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);

    match node {
        Node::Leaf(token) => {
            if !token.is_trivia() {
                output.push_str(&format!("{indent}{:?} {:?}\n", token.class, token.text));
            }
        }
        group => {
            output.push_str(&format!("{indent}{}\n", group_name(group).cyan()));

            for child in group.children() {
                render_node(child, depth + 1, output);
            }
        }
    }
}

fn group_name(group: &Node) -> &'static str {
    match group {
        Node::Leaf(_) => "Leaf",
        Node::Identifier(_) => "Identifier",
        Node::IdentifierList(_) => "IdentifierList",
        Node::Comparison(_) => "Comparison",
        Node::Where(_) => "Where",
        Node::Parenthesis(_) => "Parenthesis",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_are_indented() {
        colored::control::set_override(false);

        let statements = parse("select a from b where b.x = 1").unwrap();
        let rendered = render_statement(&statements[0]);

        assert_eq!(
            "  Dml \"select\"\n\
             \x20 Name \"a\"\n\
             \x20 Keyword \"from\"\n\
             \x20 Name \"b\"\n\
             \x20 Where\n\
             \x20   Keyword \"where\"\n\
             \x20   Comparison\n\
             \x20     Identifier\n\
             \x20       Name \"b\"\n\
             \x20       Punctuation(Dot) \".\"\n\
             \x20       Name \"x\"\n\
             \x20     ComparisonOperator \"=\"\n\
             \x20     IntegerLiteral \"1\"\n",
            rendered
        );
    }
}
