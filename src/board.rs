use std::fmt::{self, Formatter};
use std::ops::{Deref, DerefMut, Not};
use std::str::FromStr;

use itertools::Itertools;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::ParseBoardError;

/// The # of cells on the board
pub const NUM_CELLS: usize = 9;

/// Index of a cell, row-major, `0..NUM_CELLS`.
pub type Move = usize;

const WIN_INDICES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(EnumIter, EnumString, Display, Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    X,
    O,
}

impl Not for Mark {
    type Output = Mark;

    fn not(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Mark),
}

impl Cell {
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(Mark::X) => 'X',
            Cell::Occupied(Mark::O) => 'O',
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}

/// Result of a position as seen by the maximizer. Derived from the cells, never stored.
#[derive(Display, Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Outcome {
    #[strum(serialize = "maximizer wins")]
    MaximizerWins,
    #[strum(serialize = "minimizer wins")]
    MinimizerWins,
    #[strum(serialize = "draw")]
    Draw,
    #[strum(serialize = "in progress")]
    InProgress,
}

/// A 3x3 tic-tac-toe board in row-major order.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub struct Board {
    cells: [Cell; NUM_CELLS],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; NUM_CELLS]) -> Self {
        Self { cells }
    }

    /// # Panics
    /// Panics if `index >= NUM_CELLS`.
    pub fn get(&self, index: Move) -> Cell {
        self.cells[index]
    }

    pub fn is_cell_empty(&self, index: Move) -> bool {
        self.cells[index] == Cell::Empty
    }

    /// Writes `mark` into `index`. The cell has to be empty.
    pub fn place(&mut self, index: Move, mark: Mark) {
        debug_assert!(self.is_cell_empty(index), "cell {index} is already occupied");
        self.cells[index] = Cell::from(mark);
    }

    pub fn clear(&mut self, index: Move) {
        self.cells[index] = Cell::Empty;
    }

    /// Places `mark` for as long as the returned guard lives.
    pub fn place_scoped(&mut self, index: Move, mark: Mark) -> Placement<'_> {
        self.place(index, mark);
        Placement { board: self, index }
    }

    /// Empty cells in ascending index order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells.iter().positions(|cell| *cell == Cell::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|cell| cell.mark() == Some(mark)).count()
    }

    /// The mark owning a complete row, column or diagonal.
    ///
    /// If several lines are complete any one of them is reported.
    pub fn winner(&self) -> Option<Mark> {
        WIN_INDICES.iter().find_map(|line| {
            let mark = self.cells[line[0]].mark()?;
            line.iter().map(|&index| self.cells[index]).all_equal().then_some(mark)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    pub fn outcome(&self, maximizer: Mark, minimizer: Mark) -> Outcome {
        match self.winner() {
            Some(mark) if mark == maximizer => Outcome::MaximizerWins,
            Some(mark) if mark == minimizer => Outcome::MinimizerWins,
            _ if self.is_full() => Outcome::Draw,
            _ => Outcome::InProgress,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rows = self.cells.chunks(3)
            .map(|row| row.iter().map(|cell| format!(" {} ", cell.symbol())).join("|"))
            .join("\n---+---+---\n");
        write!(f, "{rows}")
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads 9 cells: `X`, `O` (also `x`, `o`, `0`) or empty as `.`, `_`, `-`
    /// or a digit `1`-`9`. Whitespace, `/` and `|` separate rows and are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(NUM_CELLS);
        for (position, character) in s.chars().enumerate() {
            let cell = match character {
                'X' | 'x' => Cell::Occupied(Mark::X),
                'O' | 'o' | '0' => Cell::Occupied(Mark::O),
                '.' | '_' | '-' | '1'..='9' => Cell::Empty,
                '/' | '|' => continue,
                c if c.is_whitespace() => continue,
                _ => return Err(ParseBoardError::InvalidCharacter { character, position }),
            };
            cells.push(cell);
        }
        let got = cells.len();
        let cells: [Cell; NUM_CELLS] = cells.try_into()
            .map_err(|_| ParseBoardError::WrongCellCount { expected: NUM_CELLS, got })?;
        Ok(Self::from_cells(cells))
    }
}

/// A mark placed by [`Board::place_scoped`]. The cell is cleared again on drop.
#[derive(Debug)]
pub struct Placement<'a> {
    board: &'a mut Board,
    index: Move,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.clear(self.index);
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use crate::board::{Board, Cell, Mark, Outcome};
    use crate::error::ParseBoardError;

    fn parse_board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn outcome() {
        let outcome = |s: &str| parse_board(s).outcome(Mark::X, Mark::O);

        assert_eq!(outcome("........."), Outcome::InProgress);
        assert_eq!(outcome("XXX......"), Outcome::MaximizerWins);
        assert_eq!(outcome("OXX XOO XXO"), Outcome::MinimizerWins);
        assert_eq!(outcome("OOO......"), Outcome::MinimizerWins);
        assert_eq!(outcome("XOO OXX .OO"), Outcome::InProgress);
        assert_eq!(outcome("XOO OXX XOO"), Outcome::Draw);
        // diagonal, with cells still empty
        assert_eq!(outcome("X.O/.XO/..X"), Outcome::MaximizerWins);
        // column
        assert_eq!(outcome("XO./XO./.OX"), Outcome::MinimizerWins);
    }

    #[test]
    fn outcome_depends_on_roles() {
        let board = parse_board("OOO/XX./X..");
        assert_eq!(board.outcome(Mark::O, Mark::X), Outcome::MaximizerWins);
        assert_eq!(board.outcome(Mark::X, Mark::O), Outcome::MinimizerWins);
    }

    #[test]
    fn winning_full_board_is_not_a_draw() {
        let board = parse_board("XOX/OXO/OXX");
        assert!(board.is_full());
        assert_eq!(board.winner(), Some(Mark::X));
        assert_eq!(board.outcome(Mark::X, Mark::O), Outcome::MaximizerWins);
    }

    #[test]
    fn place_and_clear() {
        let mut board = Board::empty();
        assert!(board.is_cell_empty(4));
        board.place(4, Mark::X);
        assert!(!board.is_cell_empty(4));
        assert_eq!(board.get(4), Cell::Occupied(Mark::X));
        assert_eq!(board.count(Mark::X), 1);
        assert_eq!(board.count(Mark::O), 0);
        board.clear(4);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn placement_is_undone_on_drop() {
        let mut board = parse_board("X...O....");
        let before = board;
        {
            let mut placed = board.place_scoped(2, Mark::X);
            assert_eq!(placed.get(2), Cell::Occupied(Mark::X));
            let nested = placed.place_scoped(6, Mark::O);
            assert_eq!(nested.empty_cells().collect::<Vec<_>>(), vec![1, 3, 5, 7, 8]);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn empty_cells_ascending() {
        assert_eq!(parse_board("X.O/.X./O..").empty_cells().collect::<Vec<_>>(), vec![1, 3, 5, 7, 8]);
        assert_eq!(Board::empty().empty_cells().count(), 9);
    }

    #[test]
    fn parse() {
        let parsed = parse_board("x0-|123|o_.");
        assert_eq!(parsed.get(0), Cell::Occupied(Mark::X));
        assert_eq!(parsed.get(1), Cell::Occupied(Mark::O));
        assert_eq!(parsed.get(6), Cell::Occupied(Mark::O));
        assert_eq!(parsed.empty_cells().count(), 6);

        assert_eq!("XO.".parse::<Board>(), Err(ParseBoardError::WrongCellCount { expected: 9, got: 3 }));
        assert_eq!("XO..........".parse::<Board>(), Err(ParseBoardError::WrongCellCount { expected: 9, got: 12 }));
        assert_eq!(
            "XO.?.....".parse::<Board>(),
            Err(ParseBoardError::InvalidCharacter { character: '?', position: 3 })
        );
    }

    #[test]
    fn marks() {
        for mark in Mark::iter() {
            assert_eq!(mark.to_string().parse::<Mark>(), Ok(mark));
            assert_ne!(!mark, mark);
            assert_eq!(!!mark, mark);
        }
        assert_eq!("o".parse::<Mark>(), Ok(Mark::O));
        assert!("-".parse::<Mark>().is_err());
    }

    #[test]
    fn display() {
        let expected = " X | O |   \n---+---+---\n   | X |   \n---+---+---\n O |   |   ";
        assert_eq!(parse_board("XO./.X./O..").to_string(), expected);
    }
}
