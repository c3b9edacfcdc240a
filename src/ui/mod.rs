//! Desktop front-end
//!
//! A native GUI using egui/eframe. Searches run on a background thread so
//! the board stays responsive while the engine thinks.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::UtttApp;
pub use game_state::{GameMode, GameState, InputError};
