//! Win and terminal-state detection
//!
//! The same three-in-a-row scan runs at both levels: over cells inside a
//! sub-board, and over sub-board winners ("meta-cells") on the big board.

use crate::board::{BigBoard, Player, SubBoard, SUB_BOARDS, WIN_LINES};

/// Common owner of the first fully-matching win line, scanning in
/// [`WIN_LINES`] order.
#[inline]
pub fn line_winner(marks: &[Option<Player>; 9]) -> Option<Player> {
    WIN_LINES.iter().find_map(|&[a, b, c]| match marks[a] {
        Some(p) if marks[b] == Some(p) && marks[c] == Some(p) => Some(p),
        _ => None,
    })
}

/// Winner of a single sub-board
#[inline]
pub fn sub_board_winner(sub_board: &SubBoard) -> Option<Player> {
    line_winner(sub_board.cells())
}

/// Winner of every sub-board, indexed like the big board
pub fn sub_board_winners(board: &BigBoard) -> [Option<Player>; SUB_BOARDS] {
    let mut winners = [None; SUB_BOARDS];
    for (winner, sub_board) in winners.iter_mut().zip(board.sub_boards()) {
        *winner = sub_board_winner(sub_board);
    }
    winners
}

/// Winner of the whole game, treating sub-board winners as marks
#[inline]
pub fn big_board_winner(board: &BigBoard) -> Option<Player> {
    line_winner(&sub_board_winners(board))
}

/// True iff all nine cells are occupied
#[inline]
pub fn is_sub_board_full(sub_board: &SubBoard) -> bool {
    sub_board.cells().iter().all(Option::is_some)
}

/// Won or full: no more moves may be played in it
#[inline]
pub fn is_terminal_sub_board(sub_board: &SubBoard) -> bool {
    sub_board_winner(sub_board).is_some() || is_sub_board_full(sub_board)
}
