//! The 3x3 arrangement of sub-boards, derived from a move history

use super::sub_board::SubBoard;
use super::{Move, Player, SUB_BOARDS};

/// Full game grid: nine sub-boards indexed 0-8 in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BigBoard {
    sub_boards: [SubBoard; SUB_BOARDS],
}

impl BigBoard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn sub_boards(&self) -> &[SubBoard; SUB_BOARDS] {
        &self.sub_boards
    }

    #[inline]
    pub fn sub_board(&self, idx: u8) -> &SubBoard {
        &self.sub_boards[idx as usize]
    }

    /// Get the mark at a move's coordinates
    #[inline]
    pub fn get(&self, mv: Move) -> Option<Player> {
        self.sub_boards[mv.sub_board as usize].get(mv.cell)
    }

    #[inline]
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv).is_none()
    }

    /// Place a mark (no legality check, see `rules::legal_moves`)
    #[inline]
    pub fn place(&mut self, mv: Move, player: Player) {
        self.sub_boards[mv.sub_board as usize].place(mv.cell, player);
    }

    /// Remove a mark. Used to retract hypothetical moves during search.
    #[inline]
    pub fn remove(&mut self, mv: Move) {
        self.sub_boards[mv.sub_board as usize].clear(mv.cell);
    }

    /// Total marks on the board
    pub fn mark_count(&self) -> usize {
        self.sub_boards.iter().map(SubBoard::occupied).sum()
    }

    /// Same position with the two identities exchanged everywhere.
    pub fn with_players_swapped(&self) -> Self {
        Self {
            sub_boards: self.sub_boards.map(|sb| sb.with_players_swapped()),
        }
    }
}

/// Player who makes the `ply`-th move (0-based) of a game started by `first_player`.
#[inline]
pub fn player_for_ply(ply: usize, first_player: Player) -> Player {
    if ply % 2 == 0 {
        first_player
    } else {
        first_player.opponent()
    }
}

/// Player to move after `moves` have been played.
#[inline]
pub fn current_player(moves: &[Move], first_player: Player) -> Player {
    player_for_ply(moves.len(), first_player)
}

/// Rebuild the big board by replaying a move history.
///
/// Total for any sequence of in-range, non-colliding moves.
pub fn replay(moves: &[Move], first_player: Player) -> BigBoard {
    let mut board = BigBoard::new();
    for (ply, &mv) in moves.iter().enumerate() {
        board.place(mv, player_for_ply(ply, first_player));
    }
    board
}
