//! Game state management for the desktop front-end

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use derive_more::{Display, Error};
use tracing::warn;

use crate::{AIEngine, EngineConfig, Game, GameError, GameStatus, Move, Player, SearchRequest, SearchResponse};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Human against the engine
    PvE { human: Player },
    /// Two humans on one screen
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Player::A }
    }
}

/// Why a background search was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPurpose {
    /// The engine's own move, played as soon as it arrives
    EngineMove,
    /// A suggestion for the human to move
    Hint,
}

/// Background search state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<SearchResponse>,
        start_time: Instant,
        purpose: SearchPurpose,
    },
}

/// A click or shortcut the state refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InputError {
    #[display("the engine is thinking")]
    Busy,
    #[display("it is the engine's turn")]
    NotYourTurn,
    #[display("{_0}")]
    Game(GameError),
}

impl From<GameError> for InputError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

/// Main game state
pub struct GameState {
    pub game: Game,
    pub mode: GameMode,
    pub config: EngineConfig,
    /// Fixed search depth; iterative deepening under `config` when `None`
    pub depth: Option<u8>,
    pub ai_state: AiState,
    pub last_ai_result: Option<SearchResponse>,
    pub last_ai_time: Option<Duration>,
    pub suggested_move: Option<Move>,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(mode: GameMode, config: EngineConfig, depth: Option<u8>, first_player: Player) -> Self {
        Self {
            game: Game::new(first_player),
            mode,
            config,
            depth,
            ai_state: AiState::Idle,
            last_ai_result: None,
            last_ai_time: None,
            suggested_move: None,
            message: None,
        }
    }

    /// Start over in `mode`, keeping the first player and engine settings.
    pub fn new_game(&mut self, mode: GameMode) {
        *self = Self::new(mode, self.config, self.depth, self.game.first_player());
    }

    pub fn reset(&mut self) {
        self.new_game(self.mode);
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.game.current_player() == human,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the engine's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.game.current_player() != human,
            GameMode::PvP => false,
        }
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Play a human move.
    pub fn try_play(&mut self, mv: Move) -> Result<(), InputError> {
        if self.is_ai_thinking() {
            return Err(InputError::Busy);
        }
        if !self.is_human_turn() {
            return Err(InputError::NotYourTurn);
        }

        self.game.play(mv)?;
        self.after_move();
        Ok(())
    }

    fn after_move(&mut self) {
        self.suggested_move = None;
        self.message = match self.game.status() {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(format!("{player} wins")),
            GameStatus::Draw => Some("Draw".to_string()),
        };
    }

    fn request(&self) -> SearchRequest {
        SearchRequest {
            depth: self.depth,
            time_budget_ms: None,
            move_history: self.game.moves().to_vec(),
            first_player: self.game.first_player(),
        }
    }

    /// Run a search on a background thread.
    ///
    /// At most one search is in flight; a second call while thinking is
    /// ignored.
    fn spawn_search(&mut self, purpose: SearchPurpose) {
        if self.is_ai_thinking() || self.game.is_over() {
            return;
        }

        let request = self.request();
        let config = self.config;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = AIEngine::with_config(config);
            let response = engine.handle(&request);
            // The UI may have been closed in the meantime
            let _ = tx.send(response);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
            purpose,
        };
    }

    /// Start the engine's move if it is due.
    pub fn start_ai_thinking(&mut self) {
        if self.is_ai_turn() {
            self.spawn_search(SearchPurpose::EngineMove);
        }
    }

    /// Ask the engine for a move suggestion for the human to move.
    pub fn request_suggestion(&mut self) {
        if self.is_human_turn() {
            self.spawn_search(SearchPurpose::Hint);
        }
    }

    /// Poll the background search
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
                purpose,
            } => match receiver.try_recv() {
                Ok(response) => Some((response, start_time.elapsed(), *purpose)),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("Engine error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((response, elapsed, purpose)) = result else {
            return;
        };

        self.ai_state = AiState::Idle;
        self.last_ai_time = Some(elapsed);
        self.last_ai_result = Some(response.clone());

        match (purpose, response.best_move) {
            (SearchPurpose::EngineMove, Some(mv)) => match self.game.play(mv) {
                Ok(()) => self.after_move(),
                Err(err) => {
                    warn!(%err, "engine produced an unplayable move");
                    self.message = Some(err.to_string());
                }
            },
            (SearchPurpose::Hint, Some(mv)) => self.suggested_move = Some(mv),
            (_, None) => self.message = Some("No legal move".to_string()),
        }
    }

    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Take back moves until it is a human's turn again.
    pub fn undo(&mut self) -> Result<(), InputError> {
        if self.is_ai_thinking() {
            return Err(InputError::Busy);
        }

        self.game.undo()?;
        // Against the engine, also take back its reply
        while self.is_ai_turn() && self.game.can_undo() {
            self.game.undo()?;
        }

        self.suggested_move = None;
        self.message = None;
        Ok(())
    }

    /// Replay undone moves until it is a human's turn again.
    pub fn redo(&mut self) -> Result<(), InputError> {
        if self.is_ai_thinking() {
            return Err(InputError::Busy);
        }

        self.game.redo()?;
        while self.is_ai_turn() && self.game.can_redo() {
            self.game.redo()?;
        }

        self.after_move();
        Ok(())
    }

    /// Give the opening move to the other player. Only before the first move.
    pub fn switch_first_player(&mut self) -> Result<Player, InputError> {
        if self.is_ai_thinking() {
            return Err(InputError::Busy);
        }
        Ok(self.game.switch_first_player()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotseat() -> GameState {
        GameState::new(GameMode::PvP, EngineConfig::default(), Some(1), Player::A)
    }

    #[test]
    fn test_hotseat_turns() {
        let mut state = hotseat();
        assert!(state.is_human_turn());
        assert!(!state.is_ai_turn());

        state.try_play(Move::new(4, 4)).unwrap();
        assert_eq!(state.game.current_player(), Player::B);
        assert!(state.is_human_turn());
    }

    #[test]
    fn test_illegal_click_is_reported() {
        let mut state = hotseat();
        state.try_play(Move::new(4, 4)).unwrap();

        let err = state.try_play(Move::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            InputError::Game(GameError::IllegalMove { mv: Move::new(0, 0) })
        );
    }

    #[test]
    fn test_engine_turn_blocks_input() {
        let mut state = GameState::new(
            GameMode::PvE { human: Player::B },
            EngineConfig::default(),
            Some(1),
            Player::A,
        );
        assert!(state.is_ai_turn());
        assert_eq!(state.try_play(Move::new(4, 4)), Err(InputError::NotYourTurn));
    }

    #[test]
    fn test_pve_undo_takes_back_both_moves() {
        let mut state = GameState::new(GameMode::default(), EngineConfig::default(), Some(1), Player::A);
        state.try_play(Move::new(4, 4)).unwrap();
        // Stand in for the engine's reply
        state.game.play(Move::new(4, 0)).unwrap();

        state.undo().unwrap();
        assert!(state.game.moves().is_empty());

        state.redo().unwrap();
        assert_eq!(state.game.moves().len(), 2);
        assert!(state.is_human_turn());
    }

    #[test]
    fn test_hotseat_undo_single_move() {
        let mut state = hotseat();
        state.try_play(Move::new(4, 4)).unwrap();
        state.try_play(Move::new(4, 0)).unwrap();

        state.undo().unwrap();
        assert_eq!(state.game.moves(), &[Move::new(4, 4)]);
        assert_eq!(
            state.undo().and_then(|()| state.undo()),
            Err(InputError::Game(GameError::NothingToUndo))
        );
    }

    #[test]
    fn test_switch_first_player_only_before_moves() {
        let mut state = hotseat();
        assert_eq!(state.switch_first_player(), Ok(Player::B));

        state.try_play(Move::new(0, 0)).unwrap();
        assert_eq!(
            state.switch_first_player(),
            Err(InputError::Game(GameError::FirstPlayerLocked))
        );
    }

    #[test]
    fn test_new_game_keeps_first_player() {
        let mut state = hotseat();
        state.switch_first_player().unwrap();
        state.try_play(Move::new(0, 0)).unwrap();

        state.new_game(GameMode::PvE { human: Player::A });
        assert!(state.game.moves().is_empty());
        assert_eq!(state.game.first_player(), Player::B);
        assert!(state.is_ai_turn());
    }

    #[test]
    fn test_engine_opens_when_it_moves_first() {
        let state = GameState::new(
            GameMode::PvE { human: Player::A },
            EngineConfig::default(),
            Some(1),
            Player::B,
        );
        assert_eq!(state.game.first_player(), Player::B);
        assert_eq!(state.game.current_player(), Player::B);
        assert!(state.is_ai_turn());
    }

    #[test]
    fn test_background_hint() {
        let mut state = hotseat();
        state.try_play(Move::new(4, 4)).unwrap();
        state.request_suggestion();
        assert!(state.is_ai_thinking());
        assert_eq!(state.try_play(Move::new(4, 0)), Err(InputError::Busy));

        let deadline = Instant::now() + Duration::from_secs(30);
        while state.is_ai_thinking() && Instant::now() < deadline {
            state.check_ai_result();
            thread::sleep(Duration::from_millis(5));
        }

        let hint = state.suggested_move.unwrap();
        assert!(state.game.is_legal(hint));
        assert_eq!(state.game.moves().len(), 1);
    }
}
