//! Board representation for Ultimate Tic-Tac-Toe
//!
//! The canonical game state is the move history. [`BigBoard`] is the derived
//! 9x9 grid, rebuilt with [`replay`] whenever the history changes.

pub mod board;
pub mod sub_board;


use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

// Re-exports
pub use board::{current_player, player_for_ply, replay, BigBoard};
pub use sub_board::SubBoard;

/// Number of sub-boards on the big board
pub const SUB_BOARDS: usize = 9;
/// Number of cells in a sub-board
pub const CELLS: usize = 9;
/// Total cells on the big board (81)
pub const TOTAL_CELLS: usize = SUB_BOARDS * CELLS;

/// Three-in-a-row index triples, shared by sub-boards and the big board.
/// Sub-board indices are row-major like cell indices, so one table serves both levels.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The two symmetric sides
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Get the other side
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }
}

/// A move outside the 9x9 grid.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("move ({sub_board}, {cell}) is outside the 9x9 grid")]
pub struct MoveError {
    pub sub_board: u8,
    pub cell: u8,
}

/// A move: which sub-board, and which cell inside it.
///
/// Ordering is sub-board first, then cell, which is the order the rules
/// engine generates legal moves in. On the wire a move is the pair
/// `[sub_board, cell]`.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[display("({sub_board}, {cell})")]
#[serde(into = "[u8; 2]", try_from = "[u8; 2]")]
pub struct Move {
    pub sub_board: u8,
    pub cell: u8,
}

impl Move {
    #[inline]
    pub fn new(sub_board: u8, cell: u8) -> Self {
        debug_assert!((sub_board as usize) < SUB_BOARDS && (cell as usize) < CELLS);
        Self { sub_board, cell }
    }

    /// Checked constructor for coordinates coming from outside the engine.
    pub fn try_new(sub_board: u8, cell: u8) -> Result<Self, MoveError> {
        if (sub_board as usize) < SUB_BOARDS && (cell as usize) < CELLS {
            Ok(Self { sub_board, cell })
        } else {
            Err(MoveError { sub_board, cell })
        }
    }

    /// Move at a flat index into the 81 cells (sub-board major)
    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self::new((idx / CELLS) as u8, (idx % CELLS) as u8)
    }

    /// Screen coordinates `(row, col)` on the 9x9 grid.
    pub fn to_grid(self) -> (u8, u8) {
        let (sb, c) = (self.sub_board, self.cell);
        ((sb / 3) * 3 + c / 3, (sb % 3) * 3 + c % 3)
    }

    /// Inverse of [`Move::to_grid`].
    pub fn from_grid(row: u8, col: u8) -> Option<Self> {
        if row >= 9 || col >= 9 {
            return None;
        }
        Some(Self::new((row / 3) * 3 + col / 3, (row % 3) * 3 + col % 3))
    }
}

impl From<Move> for [u8; 2] {
    fn from(mv: Move) -> Self {
        [mv.sub_board, mv.cell]
    }
}

impl TryFrom<[u8; 2]> for Move {
    type Error = MoveError;

    fn try_from([sub_board, cell]: [u8; 2]) -> Result<Self, Self::Error> {
        Move::try_new(sub_board, cell)
    }
}
