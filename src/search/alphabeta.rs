//! Minimax search with alpha-beta pruning and iterative deepening
//!
//! The search plays hypothetical moves on a single work board with
//! place/remove pairs. Every candidate is retracted before the next one is
//! tried, so sibling branches never see each other's marks.
//!
//! # Features
//!
//! - Minimax over the rules engine's legal-move generator
//! - Alpha-beta cutoffs (optional, see [`Searcher::search_unpruned`])
//! - Iterative deepening under a soft wall-clock budget
//! - Node counting for diagnostics
//!
//! # Example
//!
//! ```
//! use uttt::board::{Move, Player};
//! use uttt::search::{Searcher, SubBoardWinPolicy};
//!
//! let mut searcher = Searcher::new(SubBoardWinPolicy::Explore);
//! let history = [Move::new(4, 4)];
//!
//! let result = searcher.find_best_move(2, &history, Player::A);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: {best_move}");
//! }
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{current_player, replay, BigBoard, Move, Player, TOTAL_CELLS};
use crate::eval::{evaluate, Score};
use crate::rules::{legal_moves, sub_board_winner};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = Score::DECISIVE * 1000;

/// What the search does with a move that wins its sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubBoardWinPolicy {
    /// Recurse into the child like any other move.
    #[default]
    Explore,
    /// Score the child as the node's running best without recursing.
    ///
    /// Triggers when the move wins the sub-board it was played in for the
    /// player who made it.
    ///
    /// With a fresh node (running best still at ±INF) the move is
    /// effectively ignored; it only decides the node's value when every
    /// candidate wins its sub-board.
    ShortCircuit,
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Sibling loops stopped by an alpha-beta cutoff
    pub cutoffs: u64,
    /// Children scored without recursion under `ShortCircuit`
    pub short_circuits: u64,
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` only when the position has no legal move
    pub best_move: Option<Move>,
    /// Score of the best move from the mover's perspective
    pub score: i32,
    /// Deepest completed depth
    pub depth: u8,
    /// Total nodes visited, across all depths of an iterative search
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Minimax searcher.
///
/// Holds only per-search bookkeeping (node counter, statistics); positions
/// are rebuilt from the move history on every call.
#[derive(Debug, Clone)]
pub struct Searcher {
    policy: SubBoardWinPolicy,
    pruning: bool,
    /// Side the root is searched for; every node is scored from its view.
    perspective: Player,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new(policy: SubBoardWinPolicy) -> Self {
        Self {
            policy,
            pruning: true,
            perspective: Player::A,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Fixed-depth search with alpha-beta pruning.
    ///
    /// Every legal move for the side to move is played, then scored by a
    /// minimizing search of `depth - 1` plies. Ties keep the earliest move
    /// in generation order.
    #[must_use]
    pub fn find_best_move(&mut self, depth: u8, moves: &[Move], first_player: Player) -> SearchResult {
        self.reset(true);
        self.search_at_depth(depth, moves, first_player)
    }

    /// Fixed-depth search without cutoffs.
    ///
    /// Same tree, same scores, same tie-breaks as [`Searcher::find_best_move`];
    /// only the node count differs.
    #[must_use]
    pub fn search_unpruned(&mut self, depth: u8, moves: &[Move], first_player: Player) -> SearchResult {
        self.reset(false);
        self.search_at_depth(depth, moves, first_player)
    }

    /// Iterative deepening: depth 1, 2, 3, ... while `keep_going(next_depth)`
    /// allows it, up to `max_depth`.
    ///
    /// Depth 1 always runs, so a legal move is available whenever one
    /// exists. The predicate is only consulted between depths; a started
    /// depth always completes and its result replaces the previous one.
    /// Depths beyond the number of empty cells are never searched.
    pub fn search_iterative<F>(
        &mut self,
        moves: &[Move],
        first_player: Player,
        max_depth: u8,
        mut keep_going: F,
    ) -> SearchResult
    where
        F: FnMut(u8) -> bool,
    {
        self.reset(true);

        let empty_cells = TOTAL_CELLS.saturating_sub(moves.len());
        let limit = usize::from(max_depth).min(empty_cells).max(1) as u8;

        let mut best = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stats: SearchStats::default(),
        };

        for depth in 1..=limit {
            if depth > 1 && !keep_going(depth) {
                break;
            }

            let depth_start = Instant::now();
            best = self.search_at_depth(depth, moves, first_player);

            debug!(
                depth,
                nodes = self.nodes,
                best_move = ?best.best_move,
                score = best.score,
                elapsed_ms = depth_start.elapsed().as_millis() as u64,
                "depth complete"
            );

            if best.best_move.is_none() {
                break;
            }
        }

        best
    }

    /// Iterative deepening until `budget` has elapsed.
    ///
    /// The deadline is checked between depths only, so the budget is a soft
    /// ceiling: the last depth started before the deadline runs to completion.
    pub fn search_timed(
        &mut self,
        moves: &[Move],
        first_player: Player,
        max_depth: u8,
        budget: Duration,
    ) -> SearchResult {
        let start = Instant::now();
        self.search_iterative(moves, first_player, max_depth, |_| start.elapsed() < budget)
    }

    fn reset(&mut self, pruning: bool) {
        self.pruning = pruning;
        self.nodes = 0;
        self.stats = SearchStats::default();
    }

    /// One complete root search. Node counts accumulate across calls
    /// until the next `reset`.
    /// Depth 0 is searched as depth 1.
    fn search_at_depth(&mut self, depth: u8, moves: &[Move], first_player: Player) -> SearchResult {
        let depth = depth.max(1);
        let mut board = replay(moves, first_player);
        let mover = current_player(moves, first_player);
        self.perspective = mover;

        let (best_move, score) = self.search_root(&mut board, moves.last().copied(), mover, depth);

        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    /// Root-level search. Returns the first strictly best move.
    fn search_root(
        &mut self,
        board: &mut BigBoard,
        last_move: Option<Move>,
        mover: Player,
        depth: u8,
    ) -> (Option<Move>, i32) {
        let candidates = legal_moves(board, last_move);
        if candidates.is_empty() {
            return (None, evaluate(board, mover));
        }

        let mut best_move = None;
        let mut best_score = -INF;
        let mut alpha = -INF;

        for mv in candidates {
            board.place(mv, mover);
            let score = self.minimax(
                board,
                depth.saturating_sub(1),
                false,
                mv,
                mover.opponent(),
                alpha,
                INF,
            );
            board.remove(mv);

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if self.pruning {
                alpha = alpha.max(best_score);
            }
        }

        (best_move, best_score)
    }

    /// Recursive minimax with alpha-beta bounds.
    ///
    /// `maximizing` is true when `to_move` is the root mover. Scores are
    /// always from the root mover's perspective.
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &mut BigBoard,
        depth: u8,
        maximizing: bool,
        last_move: Move,
        to_move: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        let score = evaluate(board, self.perspective);
        if depth == 0 || Score::is_decisive(score) {
            return score;
        }

        let moves = legal_moves(board, Some(last_move));
        if moves.is_empty() {
            // Every open cell is gone and nobody won the big board
            return score;
        }

        let mut best_score = if maximizing { -INF } else { INF };

        for mv in moves {
            board.place(mv, to_move);

            let value = if self.policy == SubBoardWinPolicy::ShortCircuit
                && sub_board_winner(board.sub_board(mv.sub_board)) == Some(to_move)
            {
                self.stats.short_circuits += 1;
                best_score
            } else {
                self.minimax(
                    board,
                    depth - 1,
                    !maximizing,
                    mv,
                    to_move.opponent(),
                    alpha,
                    beta,
                )
            };

            board.remove(mv);

            if maximizing {
                best_score = best_score.max(value);
                alpha = alpha.max(best_score);
            } else {
                best_score = best_score.min(value);
                beta = beta.min(best_score);
            }

            if self.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best_score
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SubBoardWinPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::is_legal_move;

    /// A wins sub-boards 0, 1 and 2 along their middle rows; B takes 3 and 4.
    fn finished_game() -> Vec<Move> {
        [
            (0, 3), (3, 0), (0, 4), (4, 0), (0, 5), (5, 1),
            (1, 3), (3, 1), (1, 4), (4, 1), (1, 5), (5, 2),
            (2, 3), (3, 2), (2, 4), (4, 2), (2, 5),
        ]
        .into_iter()
        .map(|(sb, cell)| Move::new(sb, cell))
        .collect()
    }

    #[test]
    fn test_search_empty_board() {
        let mut searcher = Searcher::default();
        let result = searcher.find_best_move(1, &[], Player::A);

        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
        assert_eq!(result.nodes, 81);
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_search_takes_sub_board_win() {
        // A: (4,0) (4,1); B plays elsewhere; B's last cell sends A to board 4.
        let history = [
            Move::new(4, 0), // A -> sends B to 0
            Move::new(0, 4), // B -> sends A to 4
            Move::new(4, 1), // A -> sends B to 1
            Move::new(1, 4), // B -> sends A to 4
        ];
        let board = replay(&history, Player::A);
        assert_eq!(board.get(Move::new(4, 0)), Some(Player::A));
        assert_eq!(board.get(Move::new(4, 1)), Some(Player::A));
        assert!(is_legal_move(&board, history.last().copied(), Move::new(4, 2)));

        let mut searcher = Searcher::default();
        let result = searcher.find_best_move(1, &history, Player::A);
        assert_eq!(result.best_move, Some(Move::new(4, 2)));
        assert_eq!(result.score, Score::SUB_BOARD);

        let mut quirky = Searcher::new(SubBoardWinPolicy::ShortCircuit);
        let result = quirky.find_best_move(1, &history, Player::A);
        assert_eq!(result.best_move, Some(Move::new(4, 2)));
    }

    #[test]
    fn test_search_terminal_position_returns_none() {
        let moves = finished_game();
        let board = replay(&moves, Player::A);
        assert_eq!(crate::rules::big_board_winner(&board), Some(Player::A));

        let mut searcher = Searcher::default();
        let result = searcher.find_best_move(3, &moves, Player::A);
        assert_eq!(result.best_move, None);
        // B is to move and has lost
        assert_eq!(result.score, -Score::DECISIVE);

        let result = searcher.search_iterative(&moves, Player::A, 81, |_| true);
        assert_eq!(result.best_move, None);
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_pruned_matches_unpruned() {
        let history = [Move::new(4, 4), Move::new(4, 0), Move::new(0, 4)];
        for depth in 1..=3 {
            let mut pruned = Searcher::default();
            let mut full = Searcher::default();
            let a = pruned.find_best_move(depth, &history, Player::A);
            let b = full.search_unpruned(depth, &history, Player::A);
            assert_eq!(a.best_move, b.best_move, "depth {depth}");
            assert_eq!(a.score, b.score, "depth {depth}");
            assert!(a.nodes <= b.nodes, "depth {depth}");
        }
    }

    #[test]
    fn test_pruning_reduces_nodes() {
        let history = [Move::new(4, 4)];
        let mut pruned = Searcher::default();
        let mut full = Searcher::default();
        let a = pruned.find_best_move(3, &history, Player::B);
        let b = full.search_unpruned(3, &history, Player::B);
        assert!(a.nodes < b.nodes, "pruned={} unpruned={}", a.nodes, b.nodes);
        assert!(a.stats.cutoffs > 0);
        assert_eq!(b.stats.cutoffs, 0);
    }

    #[test]
    fn test_search_scores_for_second_player() {
        // B holds (2,0) and (2,1) and is sent back to sub-board 2
        let history = [
            Move::new(4, 2), // A -> B to 2
            Move::new(2, 0), // B -> A to 0
            Move::new(0, 2), // A -> B to 2
            Move::new(2, 1), // B -> A to 1
            Move::new(1, 2), // A -> B to 2
        ];
        assert_eq!(current_player(&history, Player::A), Player::B);

        let mut searcher = Searcher::default();
        let result = searcher.find_best_move(1, &history, Player::A);
        assert_eq!(result.best_move, Some(Move::new(2, 2)));
        assert_eq!(result.score, Score::SUB_BOARD);
    }

    #[test]
    fn test_iterative_respects_quota() {
        let history = [Move::new(4, 4)];
        let mut searcher = Searcher::default();

        let result = searcher.search_iterative(&history, Player::A, 81, |next| next <= 2);
        assert_eq!(result.depth, 2);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_iterative_always_completes_depth_one() {
        let mut searcher = Searcher::default();
        let result = searcher.search_iterative(&[], Player::A, 81, |_| false);
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_iterative_matches_fixed_depth_move() {
        let history = [Move::new(4, 4), Move::new(4, 8)];
        let mut iterative = Searcher::default();
        let mut fixed = Searcher::default();

        let a = iterative.search_iterative(&history, Player::A, 3, |_| true);
        let b = fixed.find_best_move(3, &history, Player::A);
        assert_eq!(a.depth, 3);
        assert_eq!(a.best_move, b.best_move);
        // Node counts accumulate over depths 1..=3
        assert!(a.nodes > b.nodes);
    }

    #[test]
    fn test_timed_search_zero_budget() {
        let mut searcher = Searcher::default();
        let result = searcher.search_timed(&[Move::new(4, 4)], Player::A, 81, Duration::ZERO);
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_short_circuit_scores_running_best() {
        // B owns (4,0) and (4,3); A's last move sends B to board 4, where
        // (4,6) completes the column.
        let mut board = BigBoard::new();
        board.place(Move::new(0, 4), Player::A);
        board.place(Move::new(4, 0), Player::B);
        board.place(Move::new(4, 3), Player::B);
        board.place(Move::new(3, 4), Player::A);
        let before = board;

        let mut explore = Searcher::new(SubBoardWinPolicy::Explore);
        let value = explore.minimax(&mut board, 1, false, Move::new(3, 4), Player::B, -INF, INF);
        assert_eq!(value, -Score::SUB_BOARD);
        assert_eq!(explore.stats.short_circuits, 0);

        // (4,6) comes after (4,1), (4,2), (4,4) and (4,5), all worth 0, so it
        // takes the running best 0 instead of its explored -3.
        let mut quirky = Searcher::new(SubBoardWinPolicy::ShortCircuit);
        let value = quirky.minimax(&mut board, 1, false, Move::new(3, 4), Player::B, -INF, INF);
        assert_eq!(value, 0);
        assert_eq!(quirky.stats.short_circuits, 1);
        assert_eq!(board, before);
    }

    #[test]
    fn test_short_circuit_ignores_win_on_fresh_node() {
        // (4,1) is B's first candidate and wins the top row
        let mut board = BigBoard::new();
        board.place(Move::new(4, 0), Player::B);
        board.place(Move::new(4, 2), Player::B);
        board.place(Move::new(0, 4), Player::A);

        let mut quirky = Searcher::new(SubBoardWinPolicy::ShortCircuit);
        let value = quirky.minimax(&mut board, 1, false, Move::new(0, 4), Player::B, -INF, INF);
        assert_eq!(value, 0);
        assert_eq!(quirky.stats.short_circuits, 1);

        let mut explore = Searcher::default();
        let value = explore.minimax(&mut board, 1, false, Move::new(0, 4), Player::B, -INF, INF);
        assert_eq!(value, -Score::SUB_BOARD);
    }

    #[test]
    fn test_short_circuit_counted_in_full_search() {
        // B holds (4,0) and (4,3); A is sent to board 3, and only (3,4)
        // hands B the column in board 4.
        let history = [Move::new(4, 0), Move::new(0, 4), Move::new(4, 3)];
        assert_eq!(current_player(&history, Player::B), Player::A);

        let mut quirky = Searcher::new(SubBoardWinPolicy::ShortCircuit);
        let result = quirky.search_unpruned(2, &history, Player::B);
        assert_eq!(result.stats.short_circuits, 1);
        assert_eq!(result.best_move, Some(Move::new(3, 0)));
        assert_eq!(result.score, 0);

        let mut explore = Searcher::default();
        let result = explore.search_unpruned(2, &history, Player::B);
        assert_eq!(result.stats.short_circuits, 0);
        assert_eq!(result.best_move, Some(Move::new(3, 0)));
    }

    #[test]
    fn test_depth_zero_searches_one_ply() {
        let mut searcher = Searcher::default();
        let result = searcher.find_best_move(0, &[], Player::A);
        assert_eq!(result.depth, 1);
        assert_eq!(result.nodes, 81);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_search_restores_board_between_siblings() {
        // Re-running the same search must give identical results: no marks
        // leak out of the work board.
        let history = [Move::new(4, 4), Move::new(4, 0)];
        let mut searcher = Searcher::default();
        let first = searcher.find_best_move(3, &history, Player::A);
        let second = searcher.find_best_move(3, &history, Player::A);
        assert_eq!(first, second);
    }
}
