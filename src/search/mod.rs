//! Search module for the Ultimate Tic-Tac-Toe engine
//!
//! Contains:
//! - Minimax with alpha-beta pruning over the legal-move generator
//! - An unpruned reference search with identical results
//! - Iterative deepening under a depth quota or wall-clock budget

pub mod alphabeta;

pub use alphabeta::{SearchResult, SearchStats, Searcher, SubBoardWinPolicy, INF};
