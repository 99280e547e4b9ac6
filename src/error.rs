use thiserror::Error;

use crate::board::{Mark, Outcome};

/// Errors produced while reading a board from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected {expected} cells, got {got}")]
    WrongCellCount { expected: usize, got: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
}

/// Precondition violations of the search entry points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("game already over: {0}")]
    GameOver(Outcome),

    #[error("maximizer and minimizer both play {0}")]
    IndistinctRoles(Mark),
}
