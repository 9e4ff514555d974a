//! blokus-engine - placement rules, move generation and the game state machine.
//!
//! Legality lives in [`rules`], fast enumeration in [`movegen`] on top of the
//! validity masks, and turn sequencing in [`position`] and [`game`].

pub mod apply;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod position;
pub mod rules;
pub mod scoring;
pub mod validity_mask;

pub use apply::{apply_placement, apply_placement_mut};
pub use config::{ConfigError, GameConfig, GameMode, MIN_SIDE};
pub use error::{GameError, SnapshotError};
pub use game::{Game, GameStatus, MoveRecord};
pub use movegen::{count_legal_placements, has_legal_placement, legal_placements, LegalPlacements};
pub use perft::{perft, perft_parallel};
pub use position::Position;
pub use rules::{check_placement, is_legal, Rejection};
pub use scoring::{score_position, FinalScores};

/// Create and start a game for `config`.
pub fn new_game(config: GameConfig) -> Result<Game, GameError> {
    Game::new_game(config)
}
