//! Provides a small parser-combinator engine over token sequences, along with
//! the tokenizers and grammars built on top of it.

/// Parsers and the combinators that build them.
pub mod parser;
/// Tokens and token kinds.
pub mod token;
pub mod lex;
/// Running a grammar over a whole input.
pub mod parse;
pub mod position;
pub mod json;
pub mod arith;
pub mod bindings;


// Re-export
pub mod prelude {
    use super::*;
    pub use parser::{
        Failure, ParseResult, Parser, State, TransformError, eof, exactly, except, seq2, seq3,
        seq4, seq5, token_of_kind,
    };
    pub use token::{SimpleToken, Token, TokenKind};
    pub use lex::{CharLexer, LexError, Tokenizer, WordLexer};
    pub use parse::{Parsed, parse, parse_prefix};
    pub use position::Position;
}
