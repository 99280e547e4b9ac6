pub mod cache;
pub mod stats;

use std::fmt::Debug;
use std::ops::Not;

use tracing::{debug, instrument};

use crate::board::{Board, Mark, Move, Outcome, NUM_CELLS};
use crate::error::SearchError;
use crate::min_max::cache::{Bound, Cache, Entry, NullCache};
use crate::min_max::stats::{NullStats, Stats};

/// Score of a won position before the depth adjustment. Must exceed the deepest ply (9).
pub const WIN_SCORE: i32 = 10;

#[derive(Eq, PartialEq, Hash)]
#[derive(Debug, Copy, Clone)]
pub enum Player {
    Min,
    Max,
}

impl Not for Player {
    type Output = Player;

    fn not(self) -> Player {
        match self {
            Player::Min => Player::Max,
            Player::Max => Player::Min,
        }
    }
}

/// Which mark the automated player (maximizer) and its opponent play.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Roles {
    maximizer: Mark,
    minimizer: Mark,
}

impl Roles {
    pub fn new(maximizer: Mark, minimizer: Mark) -> Result<Self, SearchError> {
        if maximizer == minimizer {
            return Err(SearchError::IndistinctRoles(maximizer));
        }
        Ok(Self { maximizer, minimizer })
    }

    pub fn with_maximizer(maximizer: Mark) -> Self {
        Self { maximizer, minimizer: !maximizer }
    }

    pub fn maximizer(self) -> Mark {
        self.maximizer
    }

    pub fn minimizer(self) -> Mark {
        self.minimizer
    }

    pub fn mark(self, player: Player) -> Mark {
        match player {
            Player::Max => self.maximizer,
            Player::Min => self.minimizer,
        }
    }

    pub fn outcome(self, board: &Board) -> Outcome {
        board.outcome(self.maximizer, self.minimizer)
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct ScoredMove {
    pub score: i32,
    pub min_max_move: Move,
}

impl ScoredMove {
    pub fn new(score: i32, min_max_move: Move) -> ScoredMove {
        ScoredMove { score, min_max_move }
    }
}

/// Minimax search with alpha-beta pruning over a single board.
///
/// The board is searched in place: every hypothetical mark is placed through
/// [`Board::place_scoped`] and removed again before the next candidate is tried, so
/// callers get their board back unchanged.
#[derive(Debug, Default)]
pub struct Searcher<C = NullCache, S = NullStats> {
    cache: C,
    stats: S,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Cache<Board>, S: Stats + Debug> Searcher<C, S> {
    pub fn with(cache: C, stats: S) -> Self {
        Self { cache, stats }
    }

    pub fn stats(&self) -> &S {
        &self.stats
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Exact minimax value of every legal move for the maximizer, in cell order.
    pub fn score_possible_moves(&mut self, board: &mut Board, roles: Roles) -> Result<Vec<ScoredMove>, SearchError> {
        let outcome = roles.outcome(board);
        if outcome != Outcome::InProgress {
            return Err(SearchError::GameOver(outcome));
        }
        self.cache.clear();

        let moves: Vec<Move> = board.empty_cells().collect();
        let scored = moves.into_iter().map(|m| {
            let mut child = board.place_scoped(m, roles.maximizer());
            let score = self.evaluate(&mut child, roles, 1, Player::Min, -i32::MAX, i32::MAX);
            ScoredMove::new(score, m)
        }).collect();
        Ok(scored)
    }

    /// The move with the strictly greatest score; on ties the lowest cell index wins.
    ///
    /// Its score is the minimax value of `board`.
    #[instrument(level = "debug", skip_all, fields(maximizer = %roles.maximizer()))]
    pub fn best_scored_move(&mut self, board: &mut Board, roles: Roles) -> Result<ScoredMove, SearchError> {
        let scored = self.score_possible_moves(board, roles)?;
        let best = pick_best(&scored).ok_or_else(|| SearchError::GameOver(roles.outcome(board)))?;
        debug!(best_move = best.min_max_move, score = best.score, stats = ?self.stats, "search finished");
        Ok(best)
    }

    pub fn best_move(&mut self, board: &mut Board, roles: Roles) -> Result<Move, SearchError> {
        self.best_scored_move(board, roles).map(|m| m.min_max_move)
    }

    fn evaluate(&mut self, board: &mut Board, roles: Roles, depth: u8, player: Player, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.record_node(depth);
        match roles.outcome(board) {
            Outcome::MaximizerWins => return WIN_SCORE - i32::from(depth),
            Outcome::MinimizerWins => return -WIN_SCORE + i32::from(depth),
            Outcome::Draw => return 0,
            Outcome::InProgress => {}
        }

        let (alpha_original, beta_original) = (alpha, beta);
        if let Some(entry) = self.cache.probe(board) {
            self.stats.record_cache_hit();
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::Lower => alpha = alpha.max(entry.score),
                Bound::Upper => beta = beta.min(entry.score),
            }
            if beta <= alpha {
                return entry.score;
            }
        } else {
            self.stats.record_cache_miss();
        }

        let mark = roles.mark(player);
        let mut best = match player {
            Player::Max => -i32::MAX,
            Player::Min => i32::MAX,
        };
        for index in 0..NUM_CELLS {
            if !board.is_cell_empty(index) {
                continue;
            }
            let score = {
                let mut child = board.place_scoped(index, mark);
                self.evaluate(&mut child, roles, depth + 1, !player, alpha, beta)
            };
            match player {
                Player::Max => {
                    best = best.max(score);
                    alpha = alpha.max(best);
                }
                Player::Min => {
                    best = best.min(score);
                    beta = beta.min(best);
                }
            }
            if beta <= alpha {
                self.stats.record_cutoff();
                break;
            }
        }

        self.cache.store(board, Entry::classify(best, alpha_original, beta_original));
        best
    }
}

/// Best move for `maximizer` on `board`, searched with a fresh [`Searcher`].
pub fn best_move(board: &mut Board, maximizer: Mark, minimizer: Mark) -> Result<Move, SearchError> {
    let roles = Roles::new(maximizer, minimizer)?;
    Searcher::new().best_move(board, roles)
}

/// The first move with the strictly greatest score, so ties go to the lowest cell
/// when `scored_moves` is in cell order.
pub fn pick_best(scored_moves: &[ScoredMove]) -> Option<ScoredMove> {
    scored_moves.iter().copied()
        .reduce(|best, candidate| if candidate.score > best.score { candidate } else { best })
}

/// Per-cell scores of `scored_moves`, `None` for cells that are not a legal move.
pub fn to_score_board(scored_moves: &[ScoredMove]) -> [Option<i32>; NUM_CELLS] {
    let mut scores = [None; NUM_CELLS];
    for m in scored_moves {
        scores[m.min_max_move] = Some(m.score);
    }
    scores
}
