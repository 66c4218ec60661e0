use std::fmt;

/// The state of a parser at a given input: the whole token sequence and the
/// position of the next token to read.
///
/// Parsers take a state by value and report a position back, so a state held
/// by one parser can never be changed by another.
pub struct State<'t, K> {
    tokens: &'t [K],
    pos: usize,
}

impl<K> Clone for State<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for State<'_, K> {}

impl<K> fmt::Debug for State<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("State")
            .field("pos", &self.pos)
            .field("len", &self.tokens.len())
            .finish()
    }
}

impl<'t, K> State<'t, K> {
    pub const fn new(tokens: &'t [K]) -> Self {
        State { tokens, pos: 0 }
    }

    pub fn at(tokens: &'t [K], pos: usize) -> Self {
        assert!(pos <= tokens.len(), "position {pos} is past the end");
        State { tokens, pos }
    }

    pub fn with_pos(self, pos: usize) -> Self {
        Self::at(self.tokens, pos)
    }

    pub const fn pos(&self) -> usize {
        self.pos
    }

    pub const fn at_end(&self) -> bool {
        self.pos == self.tokens.len()
    }

    /// The token at the current position, or `None` at the end.
    pub fn current(&self) -> Option<&'t K> {
        self.tokens.get(self.pos)
    }

    /// Move past the current token. Must not be called at the end.
    pub fn advance(self) -> Self {
        assert!(!self.at_end(), "cannot advance past the end of the input");
        State {
            pos: self.pos + 1,
            ..self
        }
    }

    /// The tokens that have not been consumed yet.
    pub fn rest(&self) -> &'t [K] {
        &self.tokens[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_at_end() {
        let state = State::<char>::new(&[]);
        assert!(state.at_end());
        assert_eq!(state.current(), None);
        assert!(state.rest().is_empty());
    }

    #[test]
    fn advance_returns_a_new_state() {
        let tokens = ['a', 'b'];
        let start = State::new(&tokens);
        let next = start.advance();
        assert_eq!(start.current(), Some(&'a'));
        assert_eq!(next.current(), Some(&'b'));
        assert_eq!(next.rest(), &['b']);
        assert!(next.advance().at_end());
    }

    #[test]
    #[should_panic(expected = "past the end")]
    fn advance_at_end_panics() {
        let tokens = ['a'];
        State::new(&tokens).advance().advance();
    }
}
