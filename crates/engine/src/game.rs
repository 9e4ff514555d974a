//! Game state machine: NotStarted -> InProgress -> Finished.
//!
//! Moves are validated in full before anything is written, so every error
//! returned from [`Game::apply_move`] leaves the game exactly as it was.

use blokus_core::{Board, Placement, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::{GameError, SnapshotError};
use crate::movegen::LegalPlacements;
use crate::position::Position;
use crate::scoring::{score_position, FinalScores};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Finished,
}

/// One accepted move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub placement: Placement,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "GameRepr", into = "GameRepr")]
pub struct Game {
    config: GameConfig,
    position: Position,
    status: GameStatus,
    history: Vec<MoveRecord>,
    scores: Option<FinalScores>,
}

impl Game {
    /// Validated, not yet started.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let position = Position::from_config(&config)?;
        Ok(Self {
            config,
            position,
            status: GameStatus::NotStarted,
            history: Vec::new(),
            scores: None,
        })
    }

    /// Create and start in one step.
    pub fn new_game(config: GameConfig) -> Result<Self, GameError> {
        let mut game = Self::new(config)?;
        game.start()?;
        Ok(game)
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        if self.status != GameStatus::NotStarted {
            return Err(GameError::NotInProgress);
        }
        info!(
            mode = ?self.config.mode,
            width = self.config.width,
            height = self.config.height,
            players = self.config.player_count,
            "game started"
        );
        self.status = GameStatus::InProgress;
        if self.position.settle().is_none() {
            self.finish();
        }
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Present once the game is finished.
    pub fn final_scores(&self) -> Option<&FinalScores> {
        self.scores.as_ref()
    }

    /// Current board as an owned value.
    pub fn board_snapshot(&self) -> Board {
        self.position.board().clone()
    }

    /// None unless the game is in progress.
    pub fn active_player(&self) -> Option<PlayerId> {
        (self.status == GameStatus::InProgress).then(|| self.position.active_player())
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Legal placements for `player` on the current board. Empty unless in progress.
    pub fn legal_moves(&self, player: PlayerId) -> LegalPlacements {
        if self.status == GameStatus::InProgress {
            self.position.legal_moves(player)
        } else {
            LegalPlacements::exhausted(self.position.board())
        }
    }

    pub fn is_legal(&self, player: PlayerId, placement: &Placement) -> bool {
        self.status == GameStatus::InProgress && self.position.check(player, placement).is_ok()
    }

    pub fn apply_move(&mut self, player: PlayerId, placement: Placement) -> Result<(), GameError> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::NotInProgress);
        }
        let expected = self.position.active_player();
        if player != expected {
            return Err(GameError::WrongTurn {
                expected,
                got: player,
            });
        }
        if let Err(reason) = self.position.apply(player, &placement) {
            debug!(%player, %placement, %reason, "move rejected");
            return Err(reason.into());
        }
        debug!(%player, %placement, "move accepted");
        self.history.push(MoveRecord { player, placement });

        let before: Vec<bool> = self.position.players().iter().map(|p| p.out_of_moves).collect();
        let next = self.position.advance_turn();
        for (seat, was_out) in self.position.players().iter().zip(before) {
            if seat.out_of_moves && !was_out {
                debug!(player = %seat.id, "no legal move left, skipping");
            }
        }
        if next.is_none() {
            self.finish();
        }
        Ok(())
    }

    fn finish(&mut self) {
        let scores = score_position(&self.position, &self.config);
        info!(
            moves = self.history.len(),
            scores = ?scores.scores,
            winner = ?scores.winner,
            coverage = scores.coverage,
            "game finished"
        );
        self.scores = Some(scores);
        self.status = GameStatus::Finished;
    }
}

/// Wire form of a saved game; restoring it re-checks the configuration and
/// that the position was built from it.
#[derive(Serialize, Deserialize)]
struct GameRepr {
    config: GameConfig,
    position: Position,
    status: GameStatus,
    history: Vec<MoveRecord>,
    scores: Option<FinalScores>,
}

impl From<Game> for GameRepr {
    fn from(game: Game) -> Self {
        Self {
            config: game.config,
            position: game.position,
            status: game.status,
            history: game.history,
            scores: game.scores,
        }
    }
}

impl TryFrom<GameRepr> for Game {
    type Error = SnapshotError;

    fn try_from(repr: GameRepr) -> Result<Self, Self::Error> {
        repr.config.validate()?;
        let board = repr.position.board();
        if board.width() != repr.config.width
            || board.height() != repr.config.height
            || board.players() != repr.config.player_count
            || repr.position.turn_order() != repr.config.turn_order.as_slice()
        {
            return Err(SnapshotError::ConfigMismatch);
        }
        if (repr.status == GameStatus::Finished) != repr.scores.is_some() {
            return Err(SnapshotError::Scores);
        }
        Ok(Self {
            config: repr.config,
            position: repr.position,
            status: repr.status,
            history: repr.history,
            scores: repr.scores,
        })
    }
}
