use blokus_core::PlayerId;
use thiserror::Error;

use crate::config::ConfigError;
use crate::rules::Rejection;

/// Failures of the game-level interface. Every variant leaves the game unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] Rejection),
    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: PlayerId, got: PlayerId },
    #[error("game is not in progress")]
    NotInProgress,
}

/// A serialized position or game that breaks a state invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("board seats {board} players but {seats} player states were given")]
    SeatCount { board: u8, seats: usize },
    #[error("player state {index} carries id {id}")]
    SeatId { index: usize, id: PlayerId },
    #[error("player {0} has start cells or pieces outside the board or catalogue")]
    SeatContents(PlayerId),
    #[error("turn order is not a permutation of the seats")]
    TurnOrder,
    #[error("turn index {turn} is past the turn order of {len}")]
    TurnIndex { turn: usize, len: usize },
    #[error("position does not match the configuration")]
    ConfigMismatch,
    #[error("final scores must be present exactly when the game is finished")]
    Scores,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
