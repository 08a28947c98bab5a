//! Core domain types for tic-tac-toe.

use super::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Smallest board edge the engine accepts.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest board edge the engine accepts.
pub const MAX_BOARD_SIZE: usize = 32;

/// One of the two marks in a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Side {
    /// Side X.
    X,
    /// Side O.
    O,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }
}

/// Who is sitting across the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mode {
    /// One human against the heuristic opponent.
    #[default]
    VsComputer,
    /// Two humans sharing the board.
    VsHuman,
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a side's mark.
    Occupied(Side),
}

impl Cell {
    /// Returns the side holding this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(side) => Some(side),
        }
    }
}

/// Square N×N board stored in row-major order.
///
/// Only [`Board::new`] builds one, so `cells.len() == size²` with `size` in
/// `MIN_BOARD_SIZE..=MAX_BOARD_SIZE` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with `size` rows and columns.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSize`] when `size` is outside
    /// [`MIN_BOARD_SIZE`]`..=`[`MAX_BOARD_SIZE`].
    #[instrument]
    pub fn new(size: usize) -> Result<Self, EngineError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(EngineError::InvalidSize { size });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// An empty board of the same size.
    pub fn cleared(&self) -> Self {
        Self {
            size: self.size,
            cells: vec![Cell::Empty; self.cells.len()],
        }
    }

    /// Edge length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (size²).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row-major index of (`row`, `col`).
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Gets the cell at `index`.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if the cell at `index` exists and is empty.
    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Marks `index` for `side`.
    ///
    /// Whether the cell was empty is the caller's business; only bounds are checked here.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexOutOfRange`] when `index` is not on the board.
    pub fn place(&mut self, index: usize, side: Side) -> Result<(), EngineError> {
        let cells = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, cells })?;
        *cell = Cell::Occupied(side);
        Ok(())
    }

    /// Returns a copy of the board with `side` placed at `index`.
    pub fn with_mark(&self, index: usize, side: Side) -> Result<Self, EngineError> {
        let mut board = self.clone();
        board.place(index, side)?;
        Ok(board)
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// The cell at floor(size² / 2). Off-center for even sizes.
    pub fn center(&self) -> usize {
        self.cells.len() / 2
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [usize; 4] {
        let n = self.cells.len();
        [0, self.size - 1, n - self.size, n - 1]
    }

    /// Mirrors the board across its main diagonal.
    pub fn transpose(&self) -> Self {
        let mut cells = vec![Cell::Empty; self.cells.len()];
        for row in 0..self.size {
            for col in 0..self.size {
                cells[self.index(col, row)] = self.cells[self.index(row, col)];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

impl fmt::Display for Board {
    /// Renders rows separated by rules; empty cells show their index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells.len() - 1).to_string().len();
        let rule = vec!["-".repeat(width); self.size].join("+");
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "{rule}")?;
            }
            for col in 0..self.size {
                let index = self.index(row, col);
                let symbol = match self.cells[index] {
                    Cell::Empty => index.to_string(),
                    Cell::Occupied(side) => side.to_string(),
                };
                if col > 0 {
                    write!(f, "|")?;
                }
                write!(f, "{symbol:>width$}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.cell_count(), 16);
        assert_eq!(board.empty_cells().len(), 16);
        assert!(!board.is_full());
    }

    #[test]
    fn test_size_below_three_rejected() {
        assert_eq!(Board::new(2), Err(EngineError::InvalidSize { size: 2 }));
        assert_eq!(Board::new(0), Err(EngineError::InvalidSize { size: 0 }));
    }

    #[test]
    fn test_board_serializes_size_and_cells() {
        let mut board = Board::new(3).unwrap();
        board.place(4, Side::X).unwrap();
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["size"], 3);
        assert_eq!(value["cells"].as_array().map(Vec::len), Some(9));
        assert_eq!(value["cells"][0], "Empty");
        assert_eq!(value["cells"][4], serde_json::json!({ "Occupied": "X" }));
    }

    #[test]
    fn test_oversized_board_rejected() {
        assert!(Board::new(MAX_BOARD_SIZE).is_ok());
        let too_big = MAX_BOARD_SIZE + 1;
        assert_eq!(Board::new(too_big), Err(EngineError::InvalidSize { size: too_big }));
        // Squaring this would overflow.
        let huge = 1usize << (usize::BITS / 2);
        assert_eq!(Board::new(huge), Err(EngineError::InvalidSize { size: huge }));
        assert_eq!(
            Board::new(usize::MAX),
            Err(EngineError::InvalidSize { size: usize::MAX })
        );
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(
            board.place(9, Side::X),
            Err(EngineError::IndexOutOfRange { index: 9, cells: 9 })
        );
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_corners_and_center() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.corners(), [0, 2, 6, 8]);
        assert_eq!(board.center(), 4);

        let board = Board::new(4).unwrap();
        assert_eq!(board.corners(), [0, 3, 12, 15]);
        assert_eq!(board.center(), 8);
    }

    #[test]
    fn test_transpose_moves_row_to_column() {
        let mut board = Board::new(3).unwrap();
        board.place(1, Side::X).unwrap();
        board.place(5, Side::O).unwrap();
        let t = board.transpose();
        assert_eq!(t.get(3), Some(Cell::Occupied(Side::X)));
        assert_eq!(t.get(7), Some(Cell::Occupied(Side::O)));
        assert_eq!(t.transpose(), board);
    }

    #[test]
    fn test_display_shows_indices_and_marks() {
        let mut board = Board::new(3).unwrap();
        board.place(0, Side::X).unwrap();
        board.place(4, Side::O).unwrap();
        assert_eq!(board.to_string(), "X|1|2\n-+-+-\n3|O|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_side_parses_case_insensitive() {
        assert_eq!("o".parse::<Side>().unwrap(), Side::O);
        assert_eq!("vs_human".parse::<Mode>().unwrap(), Mode::VsHuman);
        assert_eq!(Mode::VsComputer.to_string(), "vs_computer");
    }
}
