//! Legal move generation (the forced-board rule)
//!
//! A move in cell `c` sends the opponent to sub-board `c`. When that
//! sub-board is already won or full, the opponent may play in any
//! sub-board that is still open.

use crate::board::{BigBoard, Move, SUB_BOARDS};

use super::win::{big_board_winner, is_terminal_sub_board};

/// Sub-boards the next move may be played in, ascending.
///
/// Empty once the big board has a winner.
pub fn allowed_sub_boards(board: &BigBoard, last_move: Option<Move>) -> Vec<u8> {
    if big_board_winner(board).is_some() {
        return Vec::new();
    }

    match last_move {
        None => (0..SUB_BOARDS as u8).collect(),
        Some(last) if !is_terminal_sub_board(board.sub_board(last.cell)) => vec![last.cell],
        Some(_) => (0..SUB_BOARDS as u8)
            .filter(|&i| !is_terminal_sub_board(board.sub_board(i)))
            .collect(),
    }
}

/// Every legal move, ordered by sub-board then cell.
///
/// The order is part of the contract: the search keeps the first of
/// equally scored moves, so it fixes tie-breaks.
pub fn legal_moves(board: &BigBoard, last_move: Option<Move>) -> Vec<Move> {
    let mut moves = Vec::with_capacity(81);
    for sb in allowed_sub_boards(board, last_move) {
        moves.extend(
            board
                .sub_board(sb)
                .empty_cells()
                .map(|cell| Move::new(sb, cell)),
        );
    }
    moves
}

/// Check a single move against the forced-board rule
pub fn is_legal_move(board: &BigBoard, last_move: Option<Move>, mv: Move) -> bool {
    board.is_empty(mv) && allowed_sub_boards(board, last_move).contains(&mv.sub_board)
}
