//! This module ties a tokenizer and a grammar together.
//!
//! [`parse`] insists that the grammar consumes every token, and reports
//! leftovers as [`Error::TrailingInput`]. [`parse_prefix`] accepts a parse
//! that stops early and hands the leftover tokens back to the caller.

use crate::lex::{LexError, Tokenizer};
use crate::parser::{Failure, ParseResult, Parser, State};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("could not tokenize the input: {0}")]
    Lex(#[from] LexError),
    #[error("could not parse the input at token {position}: {failure}")]
    Parse { failure: Failure, position: usize },
    #[error("unexpected input after token {position} ({remaining} tokens left over)")]
    TrailingInput { position: usize, remaining: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A successful parse that may not have reached the end of the input.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed<T, K> {
    pub value: T,
    /// How many tokens the parser consumed.
    pub consumed: usize,
    /// The tokens after the parsed ones.
    pub rest: Vec<K>,
}

/// Tokenize `input` and parse all of it.
pub fn parse<T, L>(parser: &Parser<T, L::Token>, tokenizer: &L, input: &str) -> Result<T>
where
    L: Tokenizer,
{
    let tokens = tokenizer.tokenize(input)?;
    match parser.parse(State::new(&tokens)) {
        ParseResult::Ok(value, position) if position == tokens.len() => Ok(value),
        ParseResult::Ok(_, position) => Err(Error::TrailingInput {
            position,
            remaining: tokens.len() - position,
        }),
        ParseResult::Fail(failure, position) => Err(Error::Parse { failure, position }),
    }
}

/// Tokenize `input` and parse as much of it as the parser accepts.
pub fn parse_prefix<T, L>(
    parser: &Parser<T, L::Token>,
    tokenizer: &L,
    input: &str,
) -> Result<Parsed<T, L::Token>>
where
    L: Tokenizer,
{
    let mut tokens = tokenizer.tokenize(input)?;
    match parser.parse(State::new(&tokens)) {
        ParseResult::Ok(value, consumed) => {
            let rest = tokens.split_off(consumed);
            Ok(Parsed {
                value,
                consumed,
                rest,
            })
        }
        ParseResult::Fail(failure, position) => Err(Error::Parse { failure, position }),
    }
}
