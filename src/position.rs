use derive_more::Display;

/// A location in some input text, resolved to a line and a column.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display("[{line}:{column}]")]
pub struct Position {
    /// Byte offset, starts at 0.
    pub offset: usize,
    /// Starts at 1.
    pub line: usize,
    /// Starts at 1, counted in characters.
    pub column: usize,
}

impl Position {
    /// Resolve a byte offset into `text`. The offset must lie on a character
    /// boundary.
    pub fn locate(text: &str, offset: usize) -> Self {
        let before = &text[..offset];
        let line = before.chars().filter(|&c| c == '\n').count() + 1;
        let column = before.chars().rev().take_while(|&c| c != '\n').count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}
