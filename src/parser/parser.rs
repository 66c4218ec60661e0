use super::state::State;
use crate::token::{SimpleToken, Token};

use std::fmt::{self, Display};
use std::sync::Arc;
use thiserror::Error;

/// Why a parser did not match. Every failure is recoverable: alternation and
/// repetition treat all of them as "try something else" or "stop here".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Failure {
    /// The input is present, but it is not what was expected.
    #[error("no match")]
    NoMatch,
    /// Tried to read a token past the last one.
    #[error("unexpected end of input")]
    EndOfInput,
    /// The parser matched, but turning its result into a value failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// The error of a fallible [`Parser::try_map`] callback, rendered to text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("could not transform the parsed value: {message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    pub fn new(message: impl Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// The result of a parsing operation. On success, contains the parsed value
/// and the position after it. On failure, contains the reason and the
/// position to resume from, which is always the position the failing parser
/// started at.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseResult<T> {
    Ok(T, usize),
    Fail(Failure, usize),
}

impl<T> ParseResult<T> {
    pub const fn pos(&self) -> usize {
        match self {
            ParseResult::Ok(_, pos) | ParseResult::Fail(_, pos) => *pos,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            ParseResult::Ok(value, _) => Some(value),
            ParseResult::Fail(..) => None,
        }
    }

    pub fn into_result(self) -> Result<(T, usize), (Failure, usize)> {
        match self {
            ParseResult::Ok(value, pos) => Ok((value, pos)),
            ParseResult::Fail(failure, pos) => Err((failure, pos)),
        }
    }
}

type ParseFn<T, K> = dyn Fn(State<'_, K>) -> ParseResult<T> + Send + Sync;

/// A parser producing a `T` out of a sequence of `K` tokens.
///
/// Cloning is cheap and clones share the same function. Parsers hold no
/// mutable state, so one grammar can serve any number of threads at once.
pub struct Parser<T, K = SimpleToken> {
    name: String,
    parse: Arc<ParseFn<T, K>>,
}

impl<T, K> Clone for Parser<T, K> {
    fn clone(&self) -> Self {
        Parser {
            name: self.name.clone(),
            parse: Arc::clone(&self.parse),
        }
    }
}

impl<T, K> fmt::Debug for Parser<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Parser").field("name", &self.name).finish()
    }
}

// How a parser is used

impl<T, K> Parser<T, K> {
    pub fn parse(&self, state: State<'_, K>) -> ParseResult<T> {
        (self.parse)(state)
    }

    /// A description of the parser, built out of the combinators that make it
    /// up.
    pub fn name(&self) -> &str {
        &self.name
    }
}

// Basic constructors

impl<T: 'static, K: Token + 'static> Parser<T, K> {
    pub fn from_fn<Func>(name: impl Into<String>, func: Func) -> Self
    where
        Func: Fn(State<'_, K>) -> ParseResult<T> + Send + Sync + 'static,
    {
        Parser {
            name: name.into(),
            parse: Arc::new(func),
        }
    }

    /// Succeed with `value` without consuming anything.
    pub fn ret(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Parser::from_fn("Ret", move |state| ParseResult::Ok(value.clone(), state.pos()))
    }

    /// Fail with `failure` without consuming anything.
    pub fn fail(failure: Failure) -> Self {
        Parser::from_fn("Fail", move |state| {
            ParseResult::Fail(failure.clone(), state.pos())
        })
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Parser {
            name: name.into(),
            ..self
        }
    }
}

// Combinators

impl<T: 'static, K: Token + 'static> Parser<T, K> {
    /// Rewrite the result of a successful parse.
    pub fn map<U, Func>(self, f: Func) -> Parser<U, K>
    where
        U: 'static,
        Func: Fn(T) -> U + Send + Sync + 'static,
    {
        let name = format!("Map({})", self.name);
        Parser::from_fn(name, move |state| match self.parse(state) {
            ParseResult::Ok(value, pos) => ParseResult::Ok(f(value), pos),
            ParseResult::Fail(failure, _) => ParseResult::Fail(failure, state.pos()),
        })
    }

    /// Rewrite the result of a successful parse with a callback that may
    /// reject it. A rejection is a [`Failure::Transform`] and gives back the
    /// tokens the parser consumed.
    pub fn try_map<U, E, Func>(self, f: Func) -> Parser<U, K>
    where
        U: 'static,
        E: Display,
        Func: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        let name = format!("TryMap({})", self.name);
        Parser::from_fn(name, move |state| match self.parse(state) {
            ParseResult::Ok(value, pos) => match f(value) {
                Ok(value) => ParseResult::Ok(value, pos),
                Err(err) => ParseResult::Fail(TransformError::new(err).into(), state.pos()),
            },
            ParseResult::Fail(failure, _) => ParseResult::Fail(failure, state.pos()),
        })
    }

    /// Try `self`, and if it fails, try `other` from the same position.
    pub fn or(self, other: Parser<T, K>) -> Parser<T, K> {
        Parser::one_of([self, other])
    }

    /// Try each parser in order from the same position, and return the first
    /// success. Later alternatives are not tried once one matches, so when one
    /// alternative accepts a prefix of another, the longer one must come first.
    pub fn one_of(parsers: impl IntoIterator<Item = Parser<T, K>>) -> Parser<T, K> {
        let parsers: Vec<_> = parsers.into_iter().collect();
        let names: Vec<_> = parsers.iter().map(Parser::name).collect();
        let name = format!("OneOf({})", names.join(" | "));
        Parser::from_fn(name, move |state| {
            for parser in &parsers {
                if let ok @ ParseResult::Ok(..) = parser.parse(state) {
                    return ok;
                }
            }
            ParseResult::Fail(Failure::NoMatch, state.pos())
        })
    }

    /// A parser that is built by `thunk` every time it is tried.
    ///
    /// Grammar rules that refer to themselves, directly or through other
    /// rules, must go through `lazy`: building them eagerly would recurse
    /// forever before any input is read. The thunk should be cheap and always
    /// build the same parser.
    pub fn lazy<Thunk>(thunk: Thunk) -> Parser<T, K>
    where
        Thunk: Fn() -> Parser<T, K> + Send + Sync + 'static,
    {
        Parser::from_fn("Lazy", move |state| thunk().parse(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{CharLexer, Tokenizer, WordLexer};
    use crate::parser::exactly;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn words(text: &str) -> Vec<SimpleToken> {
        WordLexer.tokenize(text).unwrap()
    }

    #[test]
    fn one_of_backtracks_to_a_shorter_alternative() {
        let parser = Parser::one_of([exactly("ab"), exactly("a")]);
        let tokens = words("a");
        assert_eq!(
            parser.parse(State::new(&tokens)),
            ParseResult::Ok("a".to_string(), 1)
        );
        let tokens = words("ab");
        assert_eq!(
            parser.parse(State::new(&tokens)),
            ParseResult::Ok("ab".to_string(), 1)
        );
    }

    #[test]
    fn one_of_first_match_wins() {
        let parser = Parser::one_of([
            exactly("a").map(|_| 1),
            exactly("a").map(|_| 2),
        ]);
        let tokens = words("a");
        assert_eq!(parser.parse(State::new(&tokens)), ParseResult::Ok(1, 1));
    }

    #[test]
    fn one_of_fails_with_no_match_at_the_start() {
        let parser = Parser::<String>::one_of([exactly("x"), exactly("y")]);
        let tokens = words("z");
        assert_eq!(
            parser.parse(State::new(&tokens)),
            ParseResult::Fail(Failure::NoMatch, 0)
        );
        // Even when the alternatives ran out of input.
        assert_eq!(
            parser.parse(State::new(&[])),
            ParseResult::Fail(Failure::NoMatch, 0)
        );
    }

    #[test]
    fn try_map_failure_gives_back_the_input() {
        let tokens = CharLexer.tokenize("7").unwrap();
        let parser = exactly("7").try_map(|_| Err::<u8, _>("seven is not allowed"));
        assert_eq!(
            parser.parse(State::new(&tokens)),
            ParseResult::Fail(
                Failure::Transform(TransformError::new("seven is not allowed")),
                0
            )
        );
    }

    #[test]
    fn try_map_failure_lets_the_next_alternative_run() {
        let tokens = words("b");
        let parser = Parser::one_of([
            exactly("b").try_map(|_| Err::<&str, _>("rejected")),
            exactly("b").map(|_| "accepted"),
        ]);
        assert_eq!(parser.parse(State::new(&tokens)).value(), Some("accepted"));
    }

    #[test]
    fn map_rewrites_the_value() {
        let tokens = words("a");
        let parser = exactly("a").map(|s| s.len());
        assert_eq!(parser.parse(State::new(&tokens)), ParseResult::Ok(1, 1));
    }

    #[test]
    fn lazy_builds_on_every_attempt_and_never_before() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);
        fn counted() -> Parser<String> {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            exactly("a")
        }

        let parser = Parser::lazy(counted).many();
        assert_eq!(BUILDS.load(Ordering::SeqCst), 0);

        let tokens = words("a a a");
        assert_eq!(parser.parse(State::new(&tokens)).pos(), 3);
        assert_eq!(BUILDS.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn names_describe_the_grammar() {
        let parser = Parser::<String>::one_of([exactly("a"), exactly("b")]).many();
        assert_eq!(
            parser.name(),
            r#"Many(OneOf(Exactly("a") | Exactly("b")))"#
        );
        assert_eq!(format!("{parser:?}"), format!("Parser {{ name: {:?} }}", parser.name()));
    }

    #[test]
    fn ret_and_fail_consume_nothing() {
        let tokens = words("a");
        let state = State::new(&tokens);
        assert_eq!(Parser::<_>::ret(5).parse(state), ParseResult::Ok(5, 0));
        assert_eq!(
            Parser::<u8>::fail(Failure::NoMatch).parse(state),
            ParseResult::Fail(Failure::NoMatch, 0)
        );
    }
}
