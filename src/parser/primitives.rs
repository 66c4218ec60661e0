use super::parser::{Failure, ParseResult, Parser};
use super::state::State;
use crate::token::Token;

/// Match a token whose text is `literal`, and return the literal.
pub fn exactly<K: Token + 'static>(literal: impl Into<String>) -> Parser<String, K> {
    let literal = literal.into();
    let name = format!("Exactly({literal:?})");
    Parser::from_fn(name, move |state: State<'_, K>| match state.current() {
        None => ParseResult::Fail(Failure::EndOfInput, state.pos()),
        Some(token) if token.text() == literal => {
            ParseResult::Ok(literal.clone(), state.advance().pos())
        }
        Some(_) => ParseResult::Fail(Failure::NoMatch, state.pos()),
    })
}

/// Match a token of the given kind, and return it.
pub fn token_of_kind<K: Token + 'static>(kind: K::Kind) -> Parser<K, K> {
    let name = format!("TokenOfKind({kind:?})");
    Parser::from_fn(name, move |state: State<'_, K>| match state.current() {
        None => ParseResult::Fail(Failure::EndOfInput, state.pos()),
        Some(token) if token.kind() == kind => {
            ParseResult::Ok(token.clone(), state.advance().pos())
        }
        Some(_) => ParseResult::Fail(Failure::NoMatch, state.pos()),
    })
}

/// Match any single token except one whose text is `literal`, and return its
/// text.
pub fn except<K: Token + 'static>(literal: impl Into<String>) -> Parser<String, K> {
    let literal = literal.into();
    let name = format!("Except({literal:?})");
    Parser::from_fn(name, move |state: State<'_, K>| match state.current() {
        None => ParseResult::Fail(Failure::EndOfInput, state.pos()),
        Some(token) if token.text() != literal => {
            ParseResult::Ok(token.text().to_string(), state.advance().pos())
        }
        Some(_) => ParseResult::Fail(Failure::NoMatch, state.pos()),
    })
}

/// Succeed, without consuming anything, only at the end of the input.
pub fn eof<K: Token + 'static>() -> Parser<(), K> {
    Parser::from_fn("Eof", |state: State<'_, K>| {
        if state.at_end() {
            ParseResult::Ok((), state.pos())
        } else {
            ParseResult::Fail(Failure::NoMatch, state.pos())
        }
    })
}
