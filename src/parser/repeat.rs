use super::parser::{Failure, ParseResult, Parser};
use super::state::State;
use crate::token::Token;

/// Apply `parser` as long as it succeeds, pushing onto `items`. Returns the
/// position after the last success.
///
/// Stops at the end of the input, and also after a success that consumed
/// nothing, since repeating it would never end. That last attempt is
/// dropped.
fn repeat<T, K>(parser: &Parser<T, K>, mut state: State<'_, K>, items: &mut Vec<T>) -> usize {
    while !state.at_end() {
        match parser.parse(state) {
            ParseResult::Ok(item, pos) if pos > state.pos() => {
                items.push(item);
                state = state.with_pos(pos);
            }
            _ => break,
        }
    }
    state.pos()
}

impl<T: 'static, K: Token + 'static> Parser<T, K> {
    /// Zero or more repetitions. Never fails.
    pub fn many(self) -> Parser<Vec<T>, K> {
        let name = format!("Many({})", self.name());
        Parser::from_fn(name, move |state| {
            let mut items = vec![];
            let pos = repeat(&self, state, &mut items);
            ParseResult::Ok(items, pos)
        })
    }

    /// One or more repetitions.
    pub fn some(self) -> Parser<Vec<T>, K> {
        let name = format!("Some({})", self.name());
        Parser::from_fn(name, move |state| match self.parse(state) {
            ParseResult::Ok(first, pos) => {
                let mut items = vec![first];
                let pos = repeat(&self, state.with_pos(pos), &mut items);
                ParseResult::Ok(items, pos)
            }
            ParseResult::Fail(..) => ParseResult::Fail(Failure::NoMatch, state.pos()),
        })
    }

    /// Zero or more repetitions separated by `sep`, whose results are
    /// dropped. A separator is only consumed together with the item after it,
    /// so a trailing separator is left in the input.
    pub fn many_sep<S: 'static>(self, sep: Parser<S, K>) -> Parser<Vec<T>, K> {
        let name = format!("ManySep({}, {})", self.name(), sep.name());
        Parser::from_fn(name, move |state| {
            let mut items = vec![];
            let mut state = match self.parse(state) {
                ParseResult::Ok(first, pos) => {
                    items.push(first);
                    state.with_pos(pos)
                }
                ParseResult::Fail(..) => return ParseResult::Ok(items, state.pos()),
            };
            loop {
                let ParseResult::Ok(_, after_sep) = sep.parse(state) else {
                    break;
                };
                let ParseResult::Ok(item, after_item) = self.parse(state.with_pos(after_sep))
                else {
                    break;
                };
                if after_item == state.pos() {
                    break;
                }
                items.push(item);
                state = state.with_pos(after_item);
            }
            ParseResult::Ok(items, state.pos())
        })
    }

    /// Zero or one occurrence. Never fails.
    pub fn optional(self) -> Parser<Option<T>, K> {
        let name = format!("Optional({})", self.name());
        Parser::from_fn(name, move |state| match self.parse(state) {
            ParseResult::Ok(value, pos) => ParseResult::Ok(Some(value), pos),
            ParseResult::Fail(..) => ParseResult::Ok(None, state.pos()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{CharLexer, Tokenizer, WordLexer};
    use crate::parser::{exactly, token_of_kind};
    use crate::token::{SimpleToken, TokenKind};
    use proptest::prelude::*;
    use rstest::rstest;

    fn digits() -> Parser<Vec<u32>> {
        token_of_kind(TokenKind::Digit)
            .map(|token: SimpleToken| token.text.parse::<u32>().unwrap())
            .many_sep(exactly(","))
    }

    #[test]
    fn many_matches_nothing_without_failing() {
        let tokens = WordLexer.tokenize("abc").unwrap();
        assert_eq!(
            exactly("z").many().parse(State::new(&tokens)),
            ParseResult::Ok(vec![], 0)
        );
    }

    #[test]
    fn many_stops_at_the_first_failure() {
        let tokens = CharLexer.tokenize("aab").unwrap();
        assert_eq!(
            exactly("a").many().parse(State::new(&tokens)),
            ParseResult::Ok(vec!["a".to_string(), "a".to_string()], 2)
        );
    }

    #[test]
    fn many_over_a_nullable_parser_terminates() {
        let tokens = CharLexer.tokenize("b").unwrap();
        let parser = exactly("a").many().many();
        assert_eq!(parser.parse(State::new(&tokens)), ParseResult::Ok(vec![], 0));
    }

    #[test]
    fn some_needs_one_match() {
        let tokens = CharLexer.tokenize("ab").unwrap();
        let parser = exactly("b").some();
        assert_eq!(
            parser.parse(State::new(&tokens)),
            ParseResult::Fail(Failure::NoMatch, 0)
        );
        assert_eq!(
            parser.parse(State::at(&tokens, 1)),
            ParseResult::Ok(vec!["b".to_string()], 2)
        );
        assert_eq!(
            parser.parse(State::at(&tokens, 2)),
            ParseResult::Fail(Failure::NoMatch, 2)
        );
    }

    #[rstest]
    #[case("", vec![], 0)]
    #[case("1", vec![1], 1)]
    #[case("1,2,3", vec![1, 2, 3], 5)]
    #[case("1,", vec![1], 1)]
    #[case("1,2,,3", vec![1, 2], 3)]
    #[case(",1", vec![], 0)]
    fn many_sep_boundaries(#[case] text: &str, #[case] expected: Vec<u32>, #[case] pos: usize) {
        let tokens = CharLexer.tokenize(text).unwrap();
        assert_eq!(
            digits().parse(State::new(&tokens)),
            ParseResult::Ok(expected, pos)
        );
    }

    #[test]
    fn optional_never_fails() {
        let tokens = CharLexer.tokenize("-1").unwrap();
        let minus = exactly("-").optional();
        assert_eq!(
            minus.parse(State::new(&tokens)),
            ParseResult::Ok(Some("-".to_string()), 1)
        );
        assert_eq!(minus.parse(State::at(&tokens, 1)), ParseResult::Ok(None, 1));
    }

    proptest! {
        #[test]
        fn many_sep_reads_back_any_digit_list(list in prop::collection::vec(0u32..10, 0..20)) {
            let text = list.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
            let tokens = CharLexer.tokenize(&text).unwrap();
            let result = digits().parse(State::new(&tokens));
            prop_assert_eq!(result, ParseResult::Ok(list, tokens.len()));
        }
    }
}
