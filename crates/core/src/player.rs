//! Per-player state owned by a game.

use serde::{Deserialize, Serialize};

use crate::bitset::CellSet;
use crate::{PieceId, PieceSet};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub remaining: PieceSet,
    pub has_moved: bool,
    pub last_piece: Option<PieceId>,
    /// Cells a first placement may cover.
    pub start_cells: CellSet,
    /// Confirmed to have no legal placement left. Boards only fill up, so this never clears.
    pub out_of_moves: bool,
}

impl PlayerState {
    pub fn new(id: PlayerId, inventory: PieceSet, start_cells: CellSet) -> Self {
        Self {
            id,
            remaining: inventory,
            has_moved: false,
            last_piece: None,
            start_cells,
            out_of_moves: false,
        }
    }

    #[inline]
    pub fn is_first_move(&self) -> bool {
        !self.has_moved
    }

    /// Record an accepted placement of `piece`.
    pub fn record_placement(&mut self, piece: PieceId) {
        self.remaining.remove(piece);
        self.has_moved = true;
        self.last_piece = Some(piece);
    }
}
