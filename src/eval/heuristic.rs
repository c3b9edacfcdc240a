//! Heuristic evaluation function for Ultimate Tic-Tac-Toe positions
//!
//! Used only at search cutoffs (depth exhausted or game decided).

use crate::board::{BigBoard, Player, SUB_BOARDS, WIN_LINES};
use crate::rules::{is_terminal_sub_board, line_winner, sub_board_winners};

use super::score::Score;

/// Evaluate the board from the perspective of the given player.
///
/// Returns:
/// - `Score::DECISIVE` if `perspective` has won the big board
/// - `-Score::DECISIVE` if the opponent has
/// - otherwise a positional score in `[-POSITIONAL_LIMIT, POSITIONAL_LIMIT]`
///
/// The evaluation is antisymmetric: `evaluate(b, A) == -evaluate(b, B)`.
/// The search compares scores from both sides of the tree on one scale,
/// so any term added here must keep that property.
#[must_use]
pub fn evaluate(board: &BigBoard, perspective: Player) -> i32 {
    let winners = sub_board_winners(board);

    if let Some(winner) = line_winner(&winners) {
        return if winner == perspective {
            Score::DECISIVE
        } else {
            -Score::DECISIVE
        };
    }

    let opponent = perspective.opponent();
    let mut score = 0;

    for winner in winners.iter().flatten() {
        if *winner == perspective {
            score += Score::SUB_BOARD;
        } else {
            score -= Score::SUB_BOARD;
        }
    }

    score += Score::META_THREAT
        * (meta_threats(board, &winners, perspective) - meta_threats(board, &winners, opponent));

    // Clamped so that only a decided game reaches DECISIVE
    score.clamp(-Score::POSITIONAL_LIMIT, Score::POSITIONAL_LIMIT)
}

/// Count big-board lines where `player` owns two sub-boards and the third
/// can still be won.
fn meta_threats(board: &BigBoard, winners: &[Option<Player>; SUB_BOARDS], player: Player) -> i32 {
    let mut threats = 0;
    for line in WIN_LINES {
        let owned = line.iter().filter(|&&i| winners[i] == Some(player)).count();
        if owned != 2 {
            continue;
        }
        let open = line
            .iter()
            .any(|&i| winners[i].is_none() && !is_terminal_sub_board(board.sub_board(i as u8)));
        if open {
            threats += 1;
        }
    }
    threats
}
