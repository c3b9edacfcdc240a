//! Evaluation module for Ultimate Tic-Tac-Toe positions
//!
//! A fixed, explainable heuristic:
//! - Decided big board
//! - Sub-boards won by each side
//! - Meta-threats (two won sub-boards on a line whose third is still open)

pub mod heuristic;
pub mod score;

pub use heuristic::evaluate;
pub use score::Score;
