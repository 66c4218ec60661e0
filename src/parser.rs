//! This module is responsible for declaring the parser type, and ways to create
//! parsers. It does not include any grammar: it is a library for building
//! recursive-descent parsers over a sequence of tokens.
//!
//! Parsers are built once, out of leaves ([`exactly`], [`token_of_kind`],
//! [`except`], [`eof`]) and combinators ([`Parser::one_of`], [`seq3`],
//! [`Parser::many`], [`Parser::many_sep`], [`Parser::try_map`],
//! [`Parser::lazy`], ...), and can then be run any number of times.

#[allow(clippy::module_inception)]
mod parser;
mod primitives;
mod repeat;
mod sequence;
mod state;

pub use parser::{Failure, ParseResult, Parser, TransformError};
pub use primitives::{eof, except, exactly, token_of_kind};
pub use sequence::{seq2, seq3, seq4, seq5};
pub use state::State;
