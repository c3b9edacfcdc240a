//! Move-history game controller
//!
//! [`Game`] owns the canonical state of a match: the list of moves played
//! and the player who opened. The board, the side to move, the winner and
//! the legal moves are all recomputed from that list on demand.

use derive_more::{Display, Error};

use crate::board::{current_player, replay, BigBoard, Move, Player};
use crate::rules::{allowed_sub_boards, big_board_winner, legal_moves};

/// Rejected controller operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("illegal move {mv}")]
    IllegalMove { mv: Move },
    #[display("the game is already over")]
    GameOver,
    #[display("the first player can only be changed before the first move")]
    FirstPlayerLocked,
    #[display("nothing to undo")]
    NothingToUndo,
    #[display("nothing to redo")]
    NothingToRedo,
}

/// Outcome of the game so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    /// No winner and no legal move left
    Draw,
}

/// In-memory game: a move history with an undo/redo stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    moves: Vec<Move>,
    /// Undone moves, most recent last
    undone: Vec<Move>,
    first_player: Player,
}

impl Game {
    #[must_use]
    pub fn new(first_player: Player) -> Self {
        Self {
            moves: Vec::new(),
            undone: Vec::new(),
            first_player,
        }
    }

    /// Rebuild a game from a recorded history, checking every move.
    pub fn from_moves(first_player: Player, moves: &[Move]) -> Result<Self, GameError> {
        let mut game = Self::new(first_player);
        for &mv in moves {
            game.play(mv)?;
        }
        Ok(game)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    pub fn current_player(&self) -> Player {
        current_player(&self.moves, self.first_player)
    }

    pub fn big_board(&self) -> BigBoard {
        replay(&self.moves, self.first_player)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.big_board(), self.last_move())
    }

    pub fn allowed_sub_boards(&self) -> Vec<u8> {
        allowed_sub_boards(&self.big_board(), self.last_move())
    }

    pub fn winner(&self) -> Option<Player> {
        big_board_winner(&self.big_board())
    }

    pub fn status(&self) -> GameStatus {
        let board = self.big_board();
        if let Some(winner) = big_board_winner(&board) {
            GameStatus::Won(winner)
        } else if legal_moves(&board, self.last_move()).is_empty() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        self.status() != GameStatus::InProgress
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    pub fn can_undo(&self) -> bool {
        !self.moves.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Play a move for the side to move. Clears the redo stack.
    pub fn play(&mut self, mv: Move) -> Result<(), GameError> {
        let board = self.big_board();
        if big_board_winner(&board).is_some() {
            return Err(GameError::GameOver);
        }
        let legal = legal_moves(&board, self.last_move());
        if legal.is_empty() {
            return Err(GameError::GameOver);
        }
        if !legal.contains(&mv) {
            return Err(GameError::IllegalMove { mv });
        }

        self.moves.push(mv);
        self.undone.clear();
        Ok(())
    }

    /// Take back the last move.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let mv = self.moves.pop().ok_or(GameError::NothingToUndo)?;
        self.undone.push(mv);
        Ok(mv)
    }

    /// Replay the most recently undone move.
    pub fn redo(&mut self) -> Result<Move, GameError> {
        let mv = self.undone.pop().ok_or(GameError::NothingToRedo)?;
        self.moves.push(mv);
        Ok(mv)
    }

    /// Clear the history, keeping the first player.
    pub fn reset(&mut self) {
        self.moves.clear();
        self.undone.clear();
    }

    /// Hand the opening move to the other player.
    pub fn switch_first_player(&mut self) -> Result<Player, GameError> {
        if !self.moves.is_empty() {
            return Err(GameError::FirstPlayerLocked);
        }
        self.first_player = self.first_player.opponent();
        self.undone.clear();
        Ok(self.first_player)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Player::A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(pairs: &[(u8, u8)]) -> Vec<Move> {
        pairs.iter().map(|&(sb, cell)| Move::new(sb, cell)).collect()
    }

    /// A wins sub-boards 0, 1 and 2 along their middle rows.
    fn winning_history() -> Vec<Move> {
        moves(&[
            (0, 3), (3, 0), (0, 4), (4, 0), (0, 5), (5, 1),
            (1, 3), (3, 1), (1, 4), (4, 1), (1, 5), (5, 2),
            (2, 3), (3, 2), (2, 4), (4, 2), (2, 5),
        ])
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(Player::B);
        assert_eq!(game.current_player(), Player::B);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.legal_moves().len(), 81);
        assert_eq!(game.allowed_sub_boards(), (0..9).collect::<Vec<_>>());
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn test_play_alternates_and_forces_board() {
        let mut game = Game::default();
        game.play(Move::new(4, 7)).unwrap();

        assert_eq!(game.current_player(), Player::B);
        assert_eq!(game.allowed_sub_boards(), vec![7]);
        assert_eq!(game.big_board().get(Move::new(4, 7)), Some(Player::A));
    }

    #[test]
    fn test_play_rejects_illegal_move() {
        let mut game = Game::default();
        game.play(Move::new(4, 7)).unwrap();

        let err = game.play(Move::new(3, 0)).unwrap_err();
        assert_eq!(err, GameError::IllegalMove { mv: Move::new(3, 0) });
        assert_eq!(err.to_string(), "illegal move (3, 0)");
        assert_eq!(game.moves().len(), 1);
    }

    #[test]
    fn test_play_rejects_occupied_cell() {
        let mut game = Game::default();
        game.play(Move::new(4, 4)).unwrap();
        assert!(matches!(
            game.play(Move::new(4, 4)),
            Err(GameError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_finished_game() {
        let game = Game::from_moves(Player::A, &winning_history()).unwrap();
        assert_eq!(game.winner(), Some(Player::A));
        assert_eq!(game.status(), GameStatus::Won(Player::A));
        assert!(game.is_over());
        assert!(game.legal_moves().is_empty());
        assert!(game.allowed_sub_boards().is_empty());

        let mut game = game;
        assert_eq!(game.play(Move::new(6, 0)), Err(GameError::GameOver));
    }

    #[test]
    fn test_from_moves_reports_bad_history() {
        let result = Game::from_moves(Player::A, &moves(&[(4, 4), (0, 0)]));
        assert_eq!(
            result,
            Err(GameError::IllegalMove { mv: Move::new(0, 0) })
        );
    }

    #[test]
    fn test_undo_redo() {
        let mut game = Game::default();
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
        assert_eq!(game.redo(), Err(GameError::NothingToRedo));

        game.play(Move::new(4, 4)).unwrap();
        game.play(Move::new(4, 0)).unwrap();

        assert_eq!(game.undo(), Ok(Move::new(4, 0)));
        assert_eq!(game.undo(), Ok(Move::new(4, 4)));
        assert!(!game.can_undo());
        assert_eq!(game.current_player(), Player::A);

        assert_eq!(game.redo(), Ok(Move::new(4, 4)));
        assert_eq!(game.redo(), Ok(Move::new(4, 0)));
        assert!(!game.can_redo());
        assert_eq!(game.moves(), moves(&[(4, 4), (4, 0)]).as_slice());
    }

    #[test]
    fn test_play_clears_redo() {
        let mut game = Game::default();
        game.play(Move::new(4, 4)).unwrap();
        game.play(Move::new(4, 0)).unwrap();
        game.undo().unwrap();

        game.play(Move::new(4, 1)).unwrap();
        assert!(!game.can_redo());
        assert_eq!(game.redo(), Err(GameError::NothingToRedo));
    }

    #[test]
    fn test_reset_keeps_first_player() {
        let mut game = Game::new(Player::B);
        game.play(Move::new(0, 0)).unwrap();
        game.undo().unwrap();
        game.play(Move::new(1, 1)).unwrap();
        game.reset();

        assert!(game.moves().is_empty());
        assert!(!game.can_redo());
        assert_eq!(game.first_player(), Player::B);
    }

    #[test]
    fn test_switch_first_player() {
        let mut game = Game::default();
        assert_eq!(game.switch_first_player(), Ok(Player::B));
        assert_eq!(game.current_player(), Player::B);

        game.play(Move::new(0, 0)).unwrap();
        assert_eq!(
            game.switch_first_player(),
            Err(GameError::FirstPlayerLocked)
        );
        assert_eq!(game.first_player(), Player::B);
    }
}
