//! A list of boolean bindings such as `x = true y = false`, over
//! [`WordLexer`] tokens.

use crate::lex::WordLexer;
use crate::parse;
use crate::parser::{Parser, exactly, seq3, token_of_kind};
use crate::token::{SimpleToken, TokenKind};

use derive_more::Display;

#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{name} = {value}")]
pub struct Binding {
    pub name: String,
    pub value: bool,
}

pub fn boolean() -> Parser<bool> {
    Parser::one_of([exactly("true"), exactly("false")]).map(|word| word == "true")
}

/// `name = true|false`
pub fn binding() -> Parser<Binding> {
    seq3(
        token_of_kind(TokenKind::Ident),
        exactly("="),
        boolean(),
        |name: SimpleToken, _, value| Binding {
            name: name.text.to_string(),
            value,
        },
    )
    .with_name("Binding")
}

pub fn bindings() -> Parser<Vec<Binding>> {
    binding().many()
}

pub fn parse(input: &str) -> parse::Result<Vec<Binding>> {
    parse::parse(&bindings(), &WordLexer, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Tokenizer;
    use crate::parser::{Failure, State};

    fn bind(name: &str, value: bool) -> Binding {
        Binding {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn two_bindings() {
        assert_eq!(
            parse("x = true y = false"),
            Ok(vec![bind("x", true), bind("y", false)])
        );
    }

    #[test]
    fn no_bindings() {
        assert_eq!(parse(""), Ok(vec![]));
    }

    #[test]
    fn display() {
        let parsed = parse("flag=false").unwrap();
        assert_eq!(parsed[0].to_string(), "flag = false");
    }

    #[test]
    fn non_boolean_value_is_left_over() {
        assert_eq!(
            parse("x = true y = 3"),
            Err(parse::Error::TrailingInput {
                position: 3,
                remaining: 3
            })
        );
    }

    #[test]
    fn keyword_is_not_a_name() {
        let Err(parse::Error::TrailingInput { position, .. }) = parse("true = false") else {
            panic!("a keyword should not bind");
        };
        assert_eq!(position, 0);
    }

    #[test]
    fn missing_value_fails_the_single_binding() {
        let tokens = WordLexer.tokenize("x =").unwrap();
        let result = binding().parse(State::new(&tokens));
        // `boolean` is an alternation, which reports `NoMatch` even at the end.
        assert_eq!(result.into_result(), Err((Failure::NoMatch, 0)));
    }

    #[test]
    fn end_of_input_passes_through_a_sequence() {
        let tokens = WordLexer.tokenize("x =").unwrap();
        let name_is_true = seq3(
            token_of_kind(TokenKind::Ident),
            exactly("="),
            exactly("true"),
            |_: SimpleToken, _, _| (),
        );
        let result = name_is_true.parse(State::new(&tokens));
        assert_eq!(result.into_result(), Err((Failure::EndOfInput, 0)));
    }
}
