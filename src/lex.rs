//! This module is responsible for lexing (tokenizing) text into tokens.
//!
//! The engine does not care how tokens are made: anything implementing
//! [`Tokenizer`] can feed it. Two lexers are provided. [`CharLexer`] makes a
//! token out of every character, which suits grammars that assemble numbers
//! and words themselves. [`WordLexer`] groups letters and digits into words.

use crate::position::Position;
use crate::token::{Keyword, SimpleToken, Symbol, Token, TokenKind};

use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// Turns text into a finite sequence of tokens, or rejects it.
pub trait Tokenizer {
    type Token: Token;

    fn tokenize(&self, input: &str) -> Result<Vec<Self::Token>, LexError>;
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{position} {kind}")]
pub struct LexError {
    pub position: Position,
    pub kind: LexErrorKind,
}

impl LexError {
    fn new(input: &str, offset: usize, kind: LexErrorKind) -> Self {
        Self {
            position: Position::locate(input, offset),
            kind,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unclosed quote ('\"')")]
    UnclosedQuote,
    #[error("backslash at the end of the input")]
    DanglingEscape,
    #[error("could not understand the character {0:?}")]
    NonsenseChar(char),
}

fn classify(c: char) -> Option<TokenKind> {
    if c.is_ascii_digit() {
        Some(TokenKind::Digit)
    } else if c.is_alphabetic() {
        Some(TokenKind::Letter)
    } else if Symbol::from_char(c).is_some() {
        Some(TokenKind::Symbol)
    } else {
        None
    }
}

/// One token per character. Whitespace is skipped, except inside string
/// literals, where every character is kept and a backslash together with the
/// character after it makes a single [`TokenKind::Escape`] token.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharLexer;

impl Tokenizer for CharLexer {
    type Token = SimpleToken;

    fn tokenize(&self, input: &str) -> Result<Vec<SimpleToken>, LexError> {
        let mut tokens = vec![];
        let mut chars = input.char_indices();
        // Offset of the quote that opened the current string literal.
        let mut open_quote = None;
        while let Some((offset, c)) = chars.next() {
            let kind = match c {
                '"' => {
                    open_quote = match open_quote {
                        None => Some(offset),
                        Some(_) => None,
                    };
                    TokenKind::Symbol
                }
                '\\' if open_quote.is_some() => {
                    let Some((_, escaped)) = chars.next() else {
                        return Err(LexError::new(input, offset, LexErrorKind::DanglingEscape));
                    };
                    tokens.push(SimpleToken::new(
                        TokenKind::Escape,
                        format!("\\{escaped}"),
                        offset,
                    ));
                    continue;
                }
                c if open_quote.is_some() => classify(c).unwrap_or(TokenKind::Other),
                c if c.is_whitespace() => continue,
                c => classify(c)
                    .ok_or_else(|| LexError::new(input, offset, LexErrorKind::NonsenseChar(c)))?,
            };
            tokens.push(SimpleToken::new(kind, c.to_string(), offset));
        }
        if let Some(offset) = open_quote {
            return Err(LexError::new(input, offset, LexErrorKind::UnclosedQuote));
        }
        Ok(tokens)
    }
}

/// Runs of letters become identifiers or keywords, runs of digits become
/// numbers, and every symbol is a token of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordLexer;

impl Tokenizer for WordLexer {
    type Token = SimpleToken;

    fn tokenize(&self, input: &str) -> Result<Vec<SimpleToken>, LexError> {
        let mut tokens = vec![];
        let mut chars = input.char_indices().peekable();
        while let Some(token) = lex_word(input, &mut chars)? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

fn lex_word(
    input: &str,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<Option<SimpleToken>, LexError> {
    skip_whitespace(chars);
    let Some((offset, c)) = chars.next() else {
        return Ok(None);
    };
    let token = if c.is_alphabetic() {
        let word = take_while(chars, c, char::is_alphabetic);
        let kind = if word.parse::<Keyword>().is_ok() {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        SimpleToken::new(kind, word, offset)
    } else if c.is_ascii_digit() {
        let number = take_while(chars, c, |c| c.is_ascii_digit());
        SimpleToken::new(TokenKind::Number, number, offset)
    } else if Symbol::from_char(c).is_some() {
        SimpleToken::new(TokenKind::Symbol, c.to_string(), offset)
    } else {
        return Err(LexError::new(input, offset, LexErrorKind::NonsenseChar(c)));
    };
    Ok(Some(token))
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
}

fn take_while(
    chars: &mut Peekable<CharIndices<'_>>,
    first: char,
    pred: impl Fn(char) -> bool,
) -> String {
    let mut word = String::from(first);
    while let Some((_, c)) = chars.next_if(|&(_, c)| pred(c)) {
        word.push(c);
    }
    word
}
