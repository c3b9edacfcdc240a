//! Game rules for Ultimate Tic-Tac-Toe
//!
//! Pure functions over a [`BigBoard`](crate::board::BigBoard):
//! - Win detection at sub-board and big-board level
//! - Terminal (won or full) sub-boards
//! - Legal moves under the forced-board rule

pub mod legal;
pub mod win;

// Re-exports for convenient access
pub use legal::{allowed_sub_boards, is_legal_move, legal_moves};
pub use win::{
    big_board_winner, is_sub_board_full, is_terminal_sub_board, line_winner, sub_board_winner,
    sub_board_winners,
};
