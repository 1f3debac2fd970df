use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unexpected end of selector")]
    UnexpectedEnd,

    #[error("combinator at position {position} has nothing to its right")]
    DanglingCombinator { position: usize },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },
}
