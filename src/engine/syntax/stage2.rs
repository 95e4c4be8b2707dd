//! Stage 2 turns Pest pairs into classified tokens.
//!
//! The grammar is flat, so this is a one to one mapping: every pair under the root becomes a
//! [Token]. Since Pest already validated the input, this cannot fail.
use crate::engine::syntax::stage1::{Rule, Stage1Rep};
use crate::engine::syntax::{Punctuation, Token, TokenClass};
use log::trace;
use pest::iterators::{Pair, Pairs};

pub struct Stage2Rep<'a> {
    pub input: &'a str,
    pub tokens: Vec<Token>,
}

impl<'a> From<Stage1Rep<'a>> for Stage2Rep<'a> {
    fn from(stage1: Stage1Rep<'a>) -> Self {
        let tokens = translate_root(stage1.pest);

        Stage2Rep {
            input: stage1.input,
            tokens,
        }
    }
}

fn translate_root(mut pairs: Pairs<Rule>) -> Vec<Token> {
    let Some(root) = pairs.next() else {
        return Vec::new();
    };
    assert_eq!(Rule::root, root.as_rule());

    root.into_inner()
        // EOI is End Of Input
        .filter(|pair| pair.as_rule() != Rule::EOI)
        .map(translate_token)
        .collect()
}

fn translate_token(pair: Pair<Rule>) -> Token {
    let class = classify(pair.as_rule());
    let token = Token::new(pair.as_str(), class, pair.as_span().into());

    trace!("Lexed {:?} as {:?}", token.text, token.class);

    token
}

fn classify(rule: Rule) -> TokenClass {
    // Pest does not let us match exhaustively, the catch-all at the bottom covers the
    // non-token rules.
    match rule {
        Rule::whitespace => TokenClass::Whitespace,
        Rule::comment => TokenClass::Comment,
        Rule::dml => TokenClass::Dml,
        Rule::keyword => TokenClass::Keyword,
        Rule::string => TokenClass::StringLiteral,
        Rule::float => TokenClass::FloatLiteral,
        Rule::integer => TokenClass::IntegerLiteral,
        Rule::name => TokenClass::Name,
        Rule::comparison_operator => TokenClass::ComparisonOperator,
        Rule::operator => TokenClass::Operator,
        Rule::wildcard => TokenClass::Wildcard,
        Rule::dot => TokenClass::Punctuation(Punctuation::Dot),
        Rule::comma => TokenClass::Punctuation(Punctuation::Comma),
        Rule::open_parenthesis => TokenClass::Punctuation(Punctuation::OpenParenthesis),
        Rule::close_parenthesis => TokenClass::Punctuation(Punctuation::CloseParenthesis),
        Rule::semicolon => TokenClass::Punctuation(Punctuation::Semicolon),
        _ => unreachable!("{rule:?} is not a token rule"),
    }
}

#[cfg(test)]
mod test {
    use crate::engine::syntax::stage1::parse_stage1;
    use crate::engine::syntax::stage2::Stage2Rep;
    use crate::engine::syntax::{Punctuation, TokenClass};

    #[test]
    fn test_simple_parse() {
        let stage2: Stage2Rep = parse_stage1("select a.b").unwrap().into();

        assert_eq!("select a.b", stage2.input);

        let classes: Vec<_> = stage2.tokens.iter().map(|token| token.class).collect();
        assert_eq!(
            vec![
                TokenClass::Dml,
                TokenClass::Whitespace,
                TokenClass::Name,
                TokenClass::Punctuation(Punctuation::Dot),
                TokenClass::Name,
            ],
            classes
        );

        assert_eq!("b", stage2.tokens[4].text);
        assert_eq!(9..10, stage2.tokens[4].position);
    }

    #[test]
    fn test_empty_input() {
        let stage2: Stage2Rep = parse_stage1("").unwrap().into();

        assert!(stage2.tokens.is_empty());
    }
}
