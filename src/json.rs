//! A JSON grammar built out of the combinators, over [`CharLexer`] tokens.
//!
//! Numbers, words and strings are assembled from single-character tokens, so
//! this grammar leans on every part of the engine: alternation between number
//! forms, fallible maps for literals and escapes, separated lists, and lazy
//! recursion for nested arrays and objects.

use crate::lex::CharLexer;
use crate::parse;
use crate::parser::{Parser, exactly, except, seq2, seq3, seq4, token_of_kind};
use crate::token::{SimpleToken, TokenKind};

use derive_more::From;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Write};
use thiserror::Error;

#[derive(Clone, Debug, From, PartialEq)]
pub enum Value {
    Null,
    #[from]
    Bool(bool),
    #[from]
    Int(i64),
    #[from]
    Float(f64),
    #[from(String, &str)]
    Str(String),
    #[from]
    Array(Vec<Value>),
    #[from]
    Object(BTreeMap<String, Value>),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown literal `{0}`")]
    UnknownLiteral(String),
    #[error("unknown escape sequence `{0}`")]
    UnknownEscape(String),
    #[error("`{0}` does not fit in a float")]
    FloatOutOfRange(String),
}

/// Escape codes and the characters they stand for.
const ESCAPES: &[(char, char)] = &[
    ('"', '"'),
    ('\\', '\\'),
    ('/', '/'),
    ('b', '\u{8}'),
    ('f', '\u{c}'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
];

fn unescape(escape: &str) -> Result<char, Error> {
    let mut chars = escape.chars();
    let (Some('\\'), Some(c), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(Error::UnknownEscape(escape.to_string()));
    };
    ESCAPES
        .iter()
        .find(|(code, _)| *code == c)
        .map(|(_, unescaped)| *unescaped)
        .ok_or_else(|| Error::UnknownEscape(escape.to_string()))
}

fn write_str(f: &mut fmt::Formatter, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        // '/' needs no escape.
        match ESCAPES.iter().find(|(code, unescaped)| *unescaped == c && *code != '/') {
            Some((code, _)) => write!(f, "\\{code}")?,
            None => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Writes canonical JSON: keys in order, no whitespace, and floats always
/// with a decimal point, so that the text parses back to the same value.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => {
                let text = x.to_string();
                if text.contains('.') {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
            Value::Str(s) => write_str(f, s),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Object(pairs) => {
                f.write_char('{')?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_str(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

// --- The grammar ---

fn kind(kind: TokenKind) -> Parser<SimpleToken> {
    token_of_kind(kind)
}

fn digits() -> Parser<String> {
    kind(TokenKind::Digit)
        .some()
        .map(|tokens| tokens.iter().map(|t| &*t.text).collect::<String>())
}

fn minus() -> Parser<&'static str> {
    exactly("-").optional().map(|m| if m.is_some() { "-" } else { "" })
}

pub fn integer() -> Parser<Value> {
    seq2(minus(), digits(), |sign, digits| format!("{sign}{digits}"))
        .try_map(|text| text.parse::<i64>().map(Value::Int))
        .with_name("Integer")
}

pub fn float() -> Parser<Value> {
    seq4(minus(), digits(), exactly("."), digits(), |sign, int, _, frac| {
        format!("{sign}{int}.{frac}")
    })
    .try_map(|text| match text.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(Value::Float(x)),
        _ => Err(Error::FloatOutOfRange(text)),
    })
    .with_name("Float")
}

/// A known escape sequence. An unknown one fails here, and [`string`] then
/// keeps it as it was written.
fn escape() -> Parser<String> {
    kind(TokenKind::Escape).try_map(|token| unescape(&token.text).map(String::from))
}

pub fn string() -> Parser<String> {
    let quote = || exactly("\"");
    let part = Parser::one_of([escape(), except("\"")]);
    seq3(quote(), part.many(), quote(), |_, parts, _| parts.concat()).with_name("String")
}

/// `true`, `false` or `null`. Reads a whole word first, and rejects the
/// words that are none of these.
pub fn literal() -> Parser<Value> {
    kind(TokenKind::Letter)
        .some()
        .try_map(|letters| {
            let word: String = letters.iter().map(|t| &*t.text).collect();
            match word.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                _ => Err(Error::UnknownLiteral(word)),
            }
        })
        .with_name("Literal")
}

pub fn array() -> Parser<Value> {
    seq3(
        exactly("["),
        Parser::lazy(value).many_sep(exactly(",")),
        exactly("]"),
        |_, items, _| Value::Array(items),
    )
    .with_name("Array")
}

pub fn object() -> Parser<Value> {
    let pair = seq3(string(), exactly(":"), Parser::lazy(value), |key, _, value| {
        (key, value)
    });
    seq3(
        exactly("{"),
        pair.many_sep(exactly(",")),
        exactly("}"),
        |_, pairs, _| Value::Object(pairs.into_iter().collect()),
    )
    .with_name("Object")
}

/// Any JSON value. Floats come before integers, since every float starts
/// with an integer.
pub fn value() -> Parser<Value> {
    Parser::one_of([
        float(),
        integer(),
        string().map(Value::Str),
        literal(),
        array(),
        object(),
    ])
}

/// Parse a whole JSON document.
pub fn parse(input: &str) -> parse::Result<Value> {
    parse::parse(&value(), &CharLexer, input)
}
