use derive_more::Display;
use std::fmt;
use std::rc::Rc;

/// What the engine needs to know about a token: its text, for literal
/// matching, and its kind, for typed matching.
pub trait Token: Clone {
    type Kind: Copy + Eq + fmt::Debug + Send + Sync + 'static;

    fn text(&self) -> &str;

    fn kind(&self) -> Self::Kind;
}

/// Implement an enum where each case maps to a string literal.
macro_rules! string_enum {
    (
      $( #[$($attr:meta)*] )*
      pub enum $name:ident {
        $($case:ident = $value:literal,)+
      }
    ) => {
        $( #[$($attr)*] )*
        #[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
        pub enum $name {
            $( $case, )+
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                match self {
                    $( Self::$case => $value, )+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ();
            fn from_str(s: &str) -> Result<Self, ()> {
                match s {
                    $( $value => Ok(Self::$case), )+
                    _ => Err(()),
                }
            }
        }

        impl $name {
            pub const ALL: &'static [Self] = &[
                $( Self::$case, )+
            ];
        }
    };
}

string_enum! {
    pub enum Keyword {
        True = "true",
        False = "false",
        Null = "null",
    }
}

string_enum! {
    /// Every symbol is a single character. "L" is short for left, "R" for
    /// right.
    pub enum Symbol {
        LBracket = "[",
        RBracket = "]",
        LCurly = "{",
        RCurly = "}",
        LParen = "(",
        RParen = ")",
        Comma = ",",
        Colon = ":",
        Period = ".",
        Minus = "-",
        Plus = "+",
        Star = "*",
        Equal = "=",
        Quote = "\"",
    }
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_ref().starts_with(c))
    }
}

/// The classification of a [`SimpleToken`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Keyword,
    Ident,
    /// A run of digits.
    Number,
    /// A single digit.
    Digit,
    /// A single letter.
    Letter,
    Symbol,
    /// A backslash and the character after it, inside a string literal.
    Escape,
    /// Anything else that appears inside a string literal.
    Other,
}

/// The token produced by the lexers in [`crate::lex`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{text}")]
pub struct SimpleToken {
    pub kind: TokenKind,
    pub text: Rc<str>,
    /// Byte offset of the first character in the input.
    pub offset: usize,
}

impl SimpleToken {
    pub fn new(kind: TokenKind, text: impl Into<Rc<str>>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }
}

impl Token for SimpleToken {
    type Kind = TokenKind;

    fn text(&self) -> &str {
        &self.text
    }

    fn kind(&self) -> TokenKind {
        self.kind
    }
}
