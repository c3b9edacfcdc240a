//! Main AI engine and its request/response contract
//!
//! This module wraps the [`Searcher`] behind the message shape used by every
//! front-end: a [`SearchRequest`] carrying the move history goes in, a
//! [`SearchResponse`] with the chosen move and diagnostics comes out. The
//! search mode depends on the request:
//!
//! 1. **Fixed depth**: `depth` present, one full-width search at that depth
//! 2. **Iterative deepening**: `depth` absent, depths 1, 2, ... until the
//!    time budget runs out
//!
//! # Example
//!
//! ```
//! use uttt::{AIEngine, EngineConfig, Move, Player, SearchRequest};
//!
//! let mut engine = AIEngine::with_config(EngineConfig::default());
//! let request = SearchRequest {
//!     depth: Some(2),
//!     time_budget_ms: None,
//!     move_history: vec![Move::new(4, 4)],
//!     first_player: Player::A,
//! };
//!
//! let response = engine.handle(&request);
//! println!("Best move: {:?}", response.best_move);
//! println!("Nodes: {}", response.nodes_visited);
//! ```

use std::time::{Duration, Instant};

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{Move, Player};
use crate::game::{Game, GameError};
use crate::search::{SearchResult, Searcher, SubBoardWinPolicy};

/// Default iterative-deepening budget
pub const DEFAULT_TIME_BUDGET_MS: u64 = 3_500;

/// Deepest search the iterative driver will ever start
pub const MAX_DEPTH: u8 = 81;

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchType {
    /// Single search at the requested depth
    FixedDepth,
    /// Iterative deepening under a time budget
    Iterative,
}

/// Engine configuration.
///
/// Every field has a default, so a partial JSON/TOML document is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Wall-clock budget for iterative deepening, in milliseconds
    pub time_budget_ms: u64,
    /// Upper bound for iterative deepening
    pub max_depth: u8,
    /// How the search treats a move that wins its sub-board
    pub sub_board_wins: SubBoardWinPolicy,
}

impl EngineConfig {
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            max_depth: MAX_DEPTH,
            sub_board_wins: SubBoardWinPolicy::default(),
        }
    }
}

/// A request for the engine's move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Fixed search depth, 0 searched as 1; iterative deepening when absent
    #[serde(default)]
    pub depth: Option<u8>,
    /// Overrides the configured budget for this request only
    #[serde(default)]
    pub time_budget_ms: Option<u64>,
    pub move_history: Vec<Move>,
    pub first_player: Player,
}

impl SearchRequest {
    /// Replay the history through a [`Game`], rejecting the first move that
    /// does not follow the rules.
    pub fn validate(&self) -> Result<Game, RequestError> {
        let mut game = Game::new(self.first_player);
        for (index, &mv) in self.move_history.iter().enumerate() {
            game.play(mv)
                .map_err(|source| RequestError::IllegalHistory { index, source })?;
        }
        Ok(game)
    }
}

/// The engine's answer to a [`SearchRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// `null` only when the position has no legal move
    #[serde(rename = "move")]
    pub best_move: Option<Move>,
    pub nodes_visited: u64,
    /// Deepest completed depth
    pub depth: u8,
    /// Root score of the chosen move, from the mover's perspective
    pub score: i32,
    pub elapsed_ms: u64,
}

/// A request the engine refused to search
#[derive(Debug, Display, Error)]
pub enum RequestError {
    #[display("move #{index} of the history is not playable: {source}")]
    IllegalHistory { index: usize, source: GameError },
    #[display("malformed request: {source}")]
    Malformed { source: serde_json::Error },
}

impl From<serde_json::Error> for RequestError {
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed { source }
    }
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub search_type: SearchType,
    /// Deepest completed depth
    pub depth: u8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    pub nodes: u64,
}

impl MoveResult {
    fn from_search(result: SearchResult, search_type: SearchType, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type,
            depth: result.depth,
            time_ms,
            nodes: result.nodes,
        }
    }
}

impl From<MoveResult> for SearchResponse {
    fn from(result: MoveResult) -> Self {
        Self {
            best_move: result.best_move,
            nodes_visited: result.nodes,
            depth: result.depth,
            score: result.score,
            elapsed_ms: result.time_ms,
        }
    }
}

/// Main AI engine.
///
/// Stateless between searches apart from its configuration: every call
/// rebuilds the position from the history it is given.
///
/// # Example
///
/// ```
/// use uttt::{AIEngine, Game, Move, Player};
///
/// let mut game = Game::new(Player::A);
/// game.play(Move::new(4, 4)).unwrap();
///
/// let mut engine = AIEngine::new();
/// if let Some(mv) = engine.get_move_at_depth(&game, 2) {
///     game.play(mv).unwrap();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
}

impl AIEngine {
    /// Create a new AI engine with default settings (3.5 s budget,
    /// sub-board wins explored normally).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(config.sub_board_wins),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for the side to move, searched under the time budget.
    #[must_use]
    pub fn get_move(&mut self, game: &Game) -> Option<Move> {
        self.get_move_with_stats(game.moves(), game.first_player(), None, None)
            .best_move
    }

    /// Best move at a fixed depth.
    #[must_use]
    pub fn get_move_at_depth(&mut self, game: &Game, depth: u8) -> Option<Move> {
        self.get_move_with_stats(game.moves(), game.first_player(), Some(depth), None)
            .best_move
    }

    /// Search with full diagnostics.
    ///
    /// With `depth` set, runs a single search at that depth. Otherwise
    /// deepens iteratively until `budget` (or the configured budget) is
    /// spent; the last completed depth wins.
    #[must_use]
    pub fn get_move_with_stats(
        &mut self,
        moves: &[Move],
        first_player: Player,
        depth: Option<u8>,
        budget: Option<Duration>,
    ) -> MoveResult {
        let start = Instant::now();

        let (result, search_type) = match depth {
            Some(depth) => (
                self.searcher.find_best_move(depth, moves, first_player),
                SearchType::FixedDepth,
            ),
            None => {
                let budget = budget.unwrap_or_else(|| self.config.time_budget());
                (
                    self.searcher
                        .search_timed(moves, first_player, self.config.max_depth, budget),
                    SearchType::Iterative,
                )
            }
        };

        MoveResult::from_search(result, search_type, start.elapsed().as_millis() as u64)
    }

    /// Answer a request.
    ///
    /// The history is trusted; use [`SearchRequest::validate`] or
    /// [`AIEngine::handle_line`] for input from outside the process.
    pub fn handle(&mut self, request: &SearchRequest) -> SearchResponse {
        let budget = request.time_budget_ms.map(Duration::from_millis);
        let result = self.get_move_with_stats(
            &request.move_history,
            request.first_player,
            request.depth,
            budget,
        );

        info!(
            history = request.move_history.len(),
            search_type = ?result.search_type,
            best_move = ?result.best_move,
            depth = result.depth,
            nodes = result.nodes,
            elapsed_ms = result.time_ms,
            "search request answered"
        );

        result.into()
    }

    /// Parse, validate and answer one JSON request.
    pub fn handle_line(&mut self, line: &str) -> Result<SearchResponse, RequestError> {
        let request: SearchRequest = serde_json::from_str(line).inspect_err(|err| {
            warn!(%err, "rejected malformed request");
        })?;

        if let Err(err) = request.validate() {
            warn!(%err, "rejected request");
            return Err(err);
        }

        Ok(self.handle(&request))
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
