//! Heuristic computer opponent.
//!
//! Candidate moves are ranked in fixed tiers: complete a line, block the
//! human's line, take the center, take a corner, take anything else. Only
//! the last two tiers involve chance, drawn from an injected random source.

use super::rules::evaluate;
use super::{Board, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Which rule produced a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    /// Completes a line for the computer.
    WinNow,
    /// Occupies the cell that would complete the human's line.
    Block,
    /// The cell at floor(size² / 2).
    Center,
    /// One of the four corners.
    Corner,
    /// Any other empty cell.
    Edge,
}

/// A selected cell and the tier that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Cell to play.
    pub index: usize,
    /// Rule that picked it.
    pub tier: Tier,
}

/// Tiered move selection with uniform tie-breaking.
#[derive(Debug, Clone)]
pub struct HeuristicOpponent<R = StdRng> {
    rng: R,
}

impl HeuristicOpponent<StdRng> {
    /// Opponent seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Opponent with reproducible tie-breaking.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for HeuristicOpponent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> HeuristicOpponent<R> {
    /// Opponent drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Picks the computer's cell, or `None` when the board is full.
    pub fn choose_move(&mut self, board: &Board, computer: Side, human: Side) -> Option<usize> {
        self.choose(board, computer, human).map(|c| c.index)
    }

    /// Like [`choose_move`](Self::choose_move), also reporting the tier.
    #[instrument(skip(self, board), fields(size = board.size()))]
    pub fn choose(&mut self, board: &Board, computer: Side, human: Side) -> Option<Choice> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let choice = completing_cell(board, &empty, computer)
            .map(|index| Choice {
                index,
                tier: Tier::WinNow,
            })
            .or_else(|| {
                completing_cell(board, &empty, human).map(|index| Choice {
                    index,
                    tier: Tier::Block,
                })
            })
            .or_else(|| {
                let center = board.center();
                board.is_vacant(center).then_some(Choice {
                    index: center,
                    tier: Tier::Center,
                })
            })
            .or_else(|| {
                let corners = board.corners();
                let open: Vec<usize> = corners
                    .iter()
                    .copied()
                    .filter(|&i| board.is_vacant(i))
                    .collect();
                self.pick(&open).map(|index| Choice {
                    index,
                    tier: Tier::Corner,
                })
            })
            .or_else(|| {
                let corners = board.corners();
                let center = board.center();
                let rest: Vec<usize> = empty
                    .iter()
                    .copied()
                    .filter(|i| *i != center && !corners.contains(i))
                    .collect();
                self.pick(&rest).map(|index| Choice {
                    index,
                    tier: Tier::Edge,
                })
            });

        if let Some(choice) = choice {
            debug!(index = choice.index, tier = %choice.tier, "Opponent chose cell");
        }
        choice
    }

    fn pick(&mut self, candidates: &[usize]) -> Option<usize> {
        if candidates.is_empty() {
            None
        } else {
            Some(candidates[self.rng.random_range(0..candidates.len())])
        }
    }
}

/// First empty cell (ascending) where `side` would complete a line.
fn completing_cell(board: &Board, empty: &[usize], side: Side) -> Option<usize> {
    empty.iter().copied().find(|&i| {
        board
            .with_mark(i, side)
            .map(|b| evaluate(&b).winner() == Some(side))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, marks: &[(usize, Side)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(i, side) in marks {
            board.place(i, side).unwrap();
        }
        board
    }

    #[test]
    fn test_completes_own_row() {
        let board = board_with(3, &[(0, Side::O), (1, Side::O), (3, Side::X), (4, Side::X)]);
        let mut ai = HeuristicOpponent::seeded(7);
        assert_eq!(
            ai.choose(&board, Side::O, Side::X),
            Some(Choice {
                index: 2,
                tier: Tier::WinNow
            })
        );
    }

    #[test]
    fn test_win_beats_block() {
        // X threatens 7 (column 1); O completes column 0 at 6.
        let board = board_with(
            3,
            &[(0, Side::O), (3, Side::O), (1, Side::X), (4, Side::X), (8, Side::X)],
        );
        let mut ai = HeuristicOpponent::seeded(1);
        let choice = ai.choose(&board, Side::O, Side::X).unwrap();
        assert_eq!(choice.tier, Tier::WinNow);
        assert_eq!(choice.index, 6);
    }

    #[test]
    fn test_blocks_lowest_threat() {
        // X threatens both 2 (row 0) and 6 (column 0); lowest index wins.
        let board = board_with(3, &[(0, Side::X), (1, Side::X), (3, Side::X), (4, Side::O)]);
        let mut ai = HeuristicOpponent::seeded(3);
        assert_eq!(
            ai.choose(&board, Side::O, Side::X),
            Some(Choice {
                index: 2,
                tier: Tier::Block
            })
        );
    }

    #[test]
    fn test_center_on_even_board_uses_floor_formula() {
        let board = board_with(4, &[(0, Side::X)]);
        let mut ai = HeuristicOpponent::seeded(0);
        assert_eq!(ai.choose_move(&board, Side::O, Side::X), Some(8));
    }

    #[test]
    fn test_corner_when_center_taken() {
        let board = board_with(3, &[(4, Side::X)]);
        for seed in 0..20 {
            let mut ai = HeuristicOpponent::seeded(seed);
            let choice = ai.choose(&board, Side::O, Side::X).unwrap();
            assert_eq!(choice.tier, Tier::Corner);
            assert!([0, 2, 6, 8].contains(&choice.index));
        }
    }

    #[test]
    fn test_edge_when_corners_and_center_taken() {
        let board = board_with(
            4,
            &[(0, Side::X), (3, Side::X), (8, Side::X), (12, Side::O), (15, Side::O)],
        );
        for seed in 0..20 {
            let mut ai = HeuristicOpponent::seeded(seed);
            let choice = ai.choose(&board, Side::O, Side::X).unwrap();
            assert_eq!(choice.tier, Tier::Edge);
            assert!(![0, 3, 8, 12, 15].contains(&choice.index));
            assert!(board.is_vacant(choice.index));
        }
    }

    #[test]
    fn test_full_board_is_noop() {
        let mut board = Board::new(3).unwrap();
        for i in 0..9 {
            board.place(i, if i % 2 == 0 { Side::X } else { Side::O }).unwrap();
        }
        assert_eq!(HeuristicOpponent::seeded(0).choose_move(&board, Side::O, Side::X), None);
    }
}
