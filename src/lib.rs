//! Ultimate Tic-Tac-Toe engine
//!
//! A 3x3 grid of 3x3 tic-tac-toe boards. The cell chosen inside a sub-board
//! sends the opponent to the sub-board at the same position:
//! - Three in a row inside a sub-board wins that sub-board
//! - Three won sub-boards in a row win the game
//! - A move aimed at a won or full sub-board frees the opponent to play in
//!   any sub-board still open
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Moves, sub-boards and the big board, replayed from a history
//! - [`rules`]: Win detection, terminal sub-boards, legal moves
//! - [`eval`]: Static evaluation
//! - [`search`]: Minimax with alpha-beta pruning and iterative deepening
//! - [`engine`]: Main AI engine and its request/response contract
//! - [`game`]: Move-history controller with undo/redo
//! - [`ui`]: Desktop front-end
//!
//! # Quick Start
//!
//! ```
//! use uttt::{AIEngine, Game, Move, Player};
//!
//! let mut game = Game::new(Player::A);
//! game.play(Move::new(4, 4)).unwrap();
//!
//! // Engine answers as B at a small fixed depth
//! let mut engine = AIEngine::new();
//! if let Some(mv) = engine.get_move_at_depth(&game, 3) {
//!     game.play(mv).unwrap();
//!     println!("Engine plays {mv}");
//! }
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{BigBoard, Move, Player, SubBoard};
pub use engine::{AIEngine, EngineConfig, MoveResult, RequestError, SearchRequest, SearchResponse, SearchType};
pub use game::{Game, GameError, GameStatus};
pub use search::SubBoardWinPolicy;
