//! Optimal move search for tic-tac-toe.
//!
//! [`Board`] holds the nine cells and answers terminal queries, [`min_max`] runs a
//! minimax search with alpha-beta pruning over it. Driving the game (reading input,
//! applying moves, announcing results) is left to the caller.

pub mod board;
pub mod error;
pub mod min_max;

pub use board::{Board, Cell, Mark, Move, Outcome};
pub use error::{ParseBoardError, SearchError};
pub use min_max::{best_move, Roles, ScoredMove, Searcher};
