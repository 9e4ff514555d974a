//! Position - board plus seats and turn order. A plain value: clone it to look ahead.

use blokus_core::{
    Board, CellSet, PieceCatalogue, Placement, PlayerId, PlayerState, MAX_PLAYERS,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::apply::apply_placement_mut;
use crate::config::{ConfigError, GameConfig};
use crate::error::SnapshotError;
use crate::movegen::{count_legal_placements, has_legal_placement, legal_placements, LegalPlacements};
use crate::rules::{check_placement, Rejection};

pub type Seats = SmallVec<[PlayerState; MAX_PLAYERS]>;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "PositionRepr", into = "PositionRepr")]
pub struct Position {
    board: Board,
    players: Seats,
    turn_order: SmallVec<[PlayerId; MAX_PLAYERS]>,
    turn: usize,
}

impl Position {
    /// Initial position for a validated configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height, config.player_count)?;
        let players = config
            .start_cells
            .iter()
            .enumerate()
            .map(|(i, cells)| {
                let start: CellSet = cells.iter().filter_map(|&c| board.index(c)).collect();
                PlayerState::new(PlayerId(i as u8), config.inventory, start)
            })
            .collect();
        Ok(Self {
            board,
            players,
            turn_order: config.turn_order.iter().copied().collect(),
            turn: 0,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id.index())
    }

    #[inline]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    #[inline]
    pub fn active_player(&self) -> PlayerId {
        self.turn_order[self.turn]
    }

    /// Every other seated player.
    pub fn opponents(&self, of: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .map(|p| p.id)
            .filter(move |&id| id != of)
    }

    /// True once no seated player can move.
    pub fn is_terminal(&self) -> bool {
        self.players.iter().all(|p| p.out_of_moves)
    }

    /// Legal placements for `player`, empty if the player is unknown.
    pub fn legal_moves(&self, player: PlayerId) -> LegalPlacements {
        match self.player(player) {
            Some(seat) => legal_placements(&self.board, seat),
            None => LegalPlacements::exhausted(&self.board),
        }
    }

    pub fn count_moves(&self, player: PlayerId) -> usize {
        self.player(player)
            .map_or(0, |seat| count_legal_placements(&self.board, seat))
    }

    pub fn has_move(&self, player: PlayerId) -> bool {
        self.player(player)
            .is_some_and(|seat| !seat.out_of_moves && has_legal_placement(&self.board, seat))
    }

    pub fn check(&self, player: PlayerId, placement: &Placement) -> Result<CellSet, Rejection> {
        let seat = self.player(player).ok_or(Rejection::UnknownPlayer)?;
        check_placement(&self.board, seat, placement)
    }

    /// Place a piece for `player` without touching the turn. Nothing is written on rejection.
    pub fn apply(&mut self, player: PlayerId, placement: &Placement) -> Result<CellSet, Rejection> {
        let seat = self
            .players
            .get_mut(player.index())
            .ok_or(Rejection::UnknownPlayer)?;
        apply_placement_mut(&mut self.board, seat, placement)
    }

    /// Place for the active player and hand the turn on.
    pub fn play(&mut self, placement: &Placement) -> Result<Option<PlayerId>, Rejection> {
        self.apply(self.active_player(), placement)?;
        Ok(self.advance_turn())
    }

    /// Copy of this position after the active player plays `placement`.
    pub fn after(&self, placement: &Placement) -> Result<Position, Rejection> {
        let mut next = self.clone();
        next.play(placement)?;
        Ok(next)
    }

    /// Hand the turn to the next player in order who can still move. Players
    /// found without a move are marked out for good. None once nobody can move.
    pub fn advance_turn(&mut self) -> Option<PlayerId> {
        self.seek(1)
    }

    /// Keep the active player if it can move, otherwise advance.
    pub fn settle(&mut self) -> Option<PlayerId> {
        self.seek(0)
    }

    fn seek(&mut self, start: usize) -> Option<PlayerId> {
        let n = self.turn_order.len();
        for step in start..start + n {
            let turn = (self.turn + step) % n;
            let id = self.turn_order[turn];
            let seat = &self.players[id.index()];
            if seat.out_of_moves {
                continue;
            }
            if has_legal_placement(&self.board, seat) {
                self.turn = turn;
                return Some(id);
            }
            self.players[id.index()].out_of_moves = true;
        }
        None
    }

    /// Cells of remaining inventory for `player`.
    pub fn remaining_area(&self, player: PlayerId) -> usize {
        self.player(player)
            .map_or(0, |seat| PieceCatalogue::standard().area_of(seat.remaining))
    }
}

/// Wire form, checked on the way back in.
#[derive(Serialize, Deserialize)]
struct PositionRepr {
    board: Board,
    players: Seats,
    turn_order: SmallVec<[PlayerId; MAX_PLAYERS]>,
    turn: usize,
}

impl From<Position> for PositionRepr {
    fn from(p: Position) -> Self {
        Self {
            board: p.board,
            players: p.players,
            turn_order: p.turn_order,
            turn: p.turn,
        }
    }
}

impl TryFrom<PositionRepr> for Position {
    type Error = SnapshotError;

    fn try_from(repr: PositionRepr) -> Result<Self, Self::Error> {
        let seats = repr.players.len();
        if seats != repr.board.players() as usize {
            return Err(SnapshotError::SeatCount {
                board: repr.board.players(),
                seats,
            });
        }
        let full = PieceCatalogue::standard().full_set();
        for (index, seat) in repr.players.iter().enumerate() {
            if seat.id.index() != index {
                return Err(SnapshotError::SeatId { index, id: seat.id });
            }
            if !seat.start_cells.and_not(&repr.board.full_mask()).is_empty()
                || !seat.remaining.is_subset_of(full)
            {
                return Err(SnapshotError::SeatContents(seat.id));
            }
        }

        let mut seen = 0u8;
        for id in &repr.turn_order {
            if id.index() >= seats || seen & (1 << id.index()) != 0 {
                return Err(SnapshotError::TurnOrder);
            }
            seen |= 1 << id.index();
        }
        if repr.turn_order.len() != seats {
            return Err(SnapshotError::TurnOrder);
        }
        if repr.turn >= repr.turn_order.len() {
            return Err(SnapshotError::TurnIndex {
                turn: repr.turn,
                len: repr.turn_order.len(),
            });
        }

        Ok(Self {
            board: repr.board,
            players: repr.players,
            turn_order: repr.turn_order,
            turn: repr.turn,
        })
    }
}
