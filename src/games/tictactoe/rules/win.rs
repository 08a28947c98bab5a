//! Win detection for N×N boards.
//!
//! A line is a full row, a full column, the main diagonal or the
//! anti-diagonal. Shorter runs never count, whatever the board size.

use super::super::{Board, Cell, Side};
use tracing::instrument;

/// Every line of a board of edge `size`, in evaluation order:
/// rows, then columns, then the main diagonal, then the anti-diagonal.
pub fn lines(size: usize) -> impl Iterator<Item = Vec<usize>> {
    let row = move |r: usize| (0..size).map(move |c| r * size + c).collect::<Vec<_>>();
    let col = move |c: usize| (0..size).map(move |r| r * size + c).collect::<Vec<_>>();
    let main: Vec<usize> = (0..size).map(|i| i * size + i).collect();
    let anti: Vec<usize> = (0..size).map(|i| i * size + (size - 1 - i)).collect();
    (0..size).map(row).chain((0..size).map(col)).chain([main, anti])
}

/// Checks if there is a winner on the board.
///
/// Returns the winning side and the indices of the first complete line
/// found, or `None`.
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_winner(board: &Board) -> Option<(Side, Vec<usize>)> {
    lines(board.size()).find_map(|line| {
        let first = board.get(line[0])?.side()?;
        line.iter()
            .all(|&i| board.get(i) == Some(Cell::Occupied(first)))
            .then_some((first, line))
    })
}
