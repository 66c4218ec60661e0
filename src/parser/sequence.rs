use super::parser::{ParseResult, Parser};
use crate::token::Token;

/// Define `seqN`: run N parsers one after the other, and combine their
/// results. If any of them fails, the whole sequence fails with that failure,
/// at the position the sequence started from.
macro_rules! sequence {
    ($(
        $( #[$attr:meta] )*
        fn $name:ident($($parser:ident => $value:ident : $t:ident),+);
    )+) => {$(
        $( #[$attr] )*
        pub fn $name<$($t: 'static,)+ Out: 'static, K: Token + 'static, Combine>(
            $($parser: Parser<$t, K>,)+
            combine: Combine,
        ) -> Parser<Out, K>
        where
            Combine: Fn($($t),+) -> Out + Send + Sync + 'static,
        {
            let names = [$($parser.name()),+];
            let name = format!("{}({})", stringify!($name), names.join(", "));
            Parser::from_fn(name, move |state| {
                let mut pos = state.pos();
                $(
                    let $value = match $parser.parse(state.with_pos(pos)) {
                        ParseResult::Ok(value, next) => {
                            pos = next;
                            value
                        }
                        ParseResult::Fail(failure, _) => {
                            return ParseResult::Fail(failure, state.pos());
                        }
                    };
                )+
                ParseResult::Ok(combine($($value),+), pos)
            })
        }
    )+};
}

sequence! {
    /// Two parsers in a row.
    fn seq2(a => x: A, b => y: B);
    /// Three parsers in a row, typically an opening token, some content and a
    /// closing token.
    fn seq3(a => x: A, b => y: B, c => z: C);
    fn seq4(a => w: A, b => x: B, c => y: C, d => z: D);
    fn seq5(a => v: A, b => w: B, c => x: C, d => y: D, e => z: E);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::{CharLexer, Tokenizer};
    use crate::parser::{Failure, State, exactly};

    #[test]
    fn seq3_combines_in_order() {
        let tokens = CharLexer.tokenize("abc").unwrap();
        let parser = seq3(exactly("a"), exactly("b"), exactly("c"), |a, b, c| {
            format!("{c}{b}{a}")
        });
        assert_eq!(
            parser.parse(State::new(&tokens)),
            ParseResult::Ok("cba".to_string(), 3)
        );
    }

    #[test]
    fn failure_rolls_back_to_the_start() {
        let tokens = CharLexer.tokenize("abd").unwrap();
        let abc = seq3(exactly("a"), exactly("b"), exactly("c"), |_, _, _| "abc");
        assert_eq!(
            abc.parse(State::new(&tokens)),
            ParseResult::Fail(Failure::NoMatch, 0)
        );

        // The next alternative sees all of the input again.
        let ab = seq2(exactly("a"), exactly("b"), |_, _| "ab");
        let parser = abc.or(ab);
        assert_eq!(parser.parse(State::new(&tokens)), ParseResult::Ok("ab", 2));
    }

    #[test]
    fn failure_keeps_its_kind() {
        let tokens = CharLexer.tokenize("ab").unwrap();
        let parser = seq4(
            exactly("a"),
            exactly("b"),
            exactly("c"),
            exactly("d"),
            |_, _, _, _| (),
        );
        assert_eq!(
            parser.parse(State::new(&tokens)),
            ParseResult::Fail(Failure::EndOfInput, 0)
        );
    }

    #[test]
    fn seq5_name_lists_its_parts() {
        let parser: Parser<()> = seq5(
            exactly("1"),
            exactly("2"),
            exactly("3"),
            exactly("4"),
            exactly("5"),
            |_, _, _, _, _| (),
        );
        assert!(parser.name().starts_with(r#"seq5(Exactly("1"), Exactly("2")"#));
    }
}
