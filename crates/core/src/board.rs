//! board representation - one CellSet per player over linear indices (row * width + col)
//! zobrist hash maintained incrementally on every placement

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bitset::{CellSet, MAX_CELLS};
use crate::render::Renderable;
use crate::{Coord, PlayerId};

pub const MAX_PLAYERS: usize = 4;

/// Largest supported side; 25 x 25 fits the bit-set capacity.
pub const MAX_SIDE: u8 = 25;

/// ZOBRIST_TABLE[player * MAX_CELLS + cell], fixed seed so hashes are stable across runs.
const ZOBRIST_TABLE: [u64; MAX_PLAYERS * MAX_CELLS] = {
    let mut table = [0u64; MAX_PLAYERS * MAX_CELLS];
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut i = 0;
    while i < table.len() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        table[i] = state;
        i += 1;
    }
    table
};

#[inline(always)]
fn zobrist(player: usize, cell: usize) -> u64 {
    ZOBRIST_TABLE[player * MAX_CELLS + cell]
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must be between 1x1 and {MAX_SIDE}x{MAX_SIDE}, got {width}x{height}")]
    InvalidDimensions { width: u8, height: u8 },
    #[error("board supports 1 to {MAX_PLAYERS} players, got {0}")]
    InvalidPlayerCount(u8),
    #[error("player {0} is not seated on this board")]
    UnknownPlayer(PlayerId),
    #[error("invalid placement at {cell}: {reason}")]
    InvalidPlacement { cell: Coord, reason: &'static str },
    #[error("malformed board data: {0}")]
    Malformed(String),
}

/// Precomputed masks for one board size.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
struct Geometry {
    width: u8,
    height: u8,
    full: CellSet,
    not_first_col: CellSet,
    not_last_col: CellSet,
}

impl Geometry {
    fn new(width: u8, height: u8) -> Self {
        let w = width as usize;
        let full = CellSet::with_first(w * height as usize);
        let mut not_first_col = full;
        let mut not_last_col = full;
        for row in 0..height as usize {
            not_first_col.remove(row * w);
            not_last_col.remove(row * w + w - 1);
        }
        Self {
            width,
            height,
            full,
            not_first_col,
            not_last_col,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    geometry: Geometry,
    players: u8,
    cells: [CellSet; MAX_PLAYERS],
    hash: u64,
}

impl Board {
    pub fn new(width: u8, height: u8, players: u8) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        if players == 0 || players as usize > MAX_PLAYERS {
            return Err(BoardError::InvalidPlayerCount(players));
        }
        Ok(Self {
            geometry: Geometry::new(width, height),
            players,
            cells: [CellSet::EMPTY; MAX_PLAYERS],
            hash: 0,
        })
    }

    #[inline(always)]
    pub fn width(&self) -> u8 {
        self.geometry.width
    }

    #[inline(always)]
    pub fn height(&self) -> u8 {
        self.geometry.height
    }

    #[inline(always)]
    pub fn players(&self) -> u8 {
        self.players
    }

    #[inline(always)]
    pub fn cell_count(&self) -> usize {
        self.geometry.width as usize * self.geometry.height as usize
    }

    /// Incremental Zobrist hash - O(1), no recomputation
    #[inline(always)]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn in_bounds(&self, at: Coord) -> bool {
        at.row >= 0
            && at.col >= 0
            && at.row < self.geometry.height as i16
            && at.col < self.geometry.width as i16
    }

    /// Linear index of an in-bounds coordinate.
    #[inline]
    pub fn index(&self, at: Coord) -> Option<usize> {
        self.in_bounds(at)
            .then(|| at.row as usize * self.geometry.width as usize + at.col as usize)
    }

    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        let w = self.geometry.width as usize;
        Coord::new((index / w) as i16, (index % w) as i16)
    }

    /// Every cell on the board.
    #[inline]
    pub fn full_mask(&self) -> CellSet {
        self.geometry.full
    }

    pub fn owner(&self, at: Coord) -> Option<PlayerId> {
        let index = self.index(at)?;
        (0..self.players as usize)
            .find(|&p| self.cells[p].contains(index))
            .map(|p| PlayerId(p as u8))
    }

    /// False for off-board coordinates.
    pub fn is_empty(&self, at: Coord) -> bool {
        self.index(at)
            .is_some_and(|index| !self.occupied().contains(index))
    }

    #[inline]
    pub fn player_cells(&self, player: PlayerId) -> CellSet {
        self.cells
            .get(player.index())
            .copied()
            .unwrap_or(CellSet::EMPTY)
    }

    pub fn occupied(&self) -> CellSet {
        self.cells[..self.players as usize]
            .iter()
            .fold(CellSet::EMPTY, |acc, &set| acc | set)
    }

    pub fn empty_cells(&self) -> CellSet {
        self.geometry.full.and_not(&self.occupied())
    }

    pub fn remaining_empty_count(&self) -> u32 {
        self.empty_cells().count()
    }

    pub fn placed_area(&self, player: PlayerId) -> u32 {
        self.player_cells(player).count()
    }

    /// Convert coordinates to a set; None if any lies off the board.
    pub fn cell_set(&self, coords: &[Coord]) -> Option<CellSet> {
        let mut set = CellSet::EMPTY;
        for &c in coords {
            set.insert(self.index(c)?);
        }
        Some(set)
    }

    pub fn coords(&self, set: &CellSet) -> Vec<Coord> {
        (*set & self.geometry.full)
            .iter()
            .map(|i| self.coord(i))
            .collect()
    }

    /// Mark `coords` as owned by `player`. Nothing is written unless every cell
    /// is on the board and empty.
    pub fn place(&mut self, player: PlayerId, coords: &[Coord]) -> Result<(), BoardError> {
        let mut set = CellSet::EMPTY;
        for &c in coords {
            let index = self.index(c).ok_or(BoardError::InvalidPlacement {
                cell: c,
                reason: "cell is off the board",
            })?;
            if set.contains(index) {
                return Err(BoardError::InvalidPlacement {
                    cell: c,
                    reason: "cell listed twice",
                });
            }
            set.insert(index);
        }
        self.place_set(player, set)
    }

    /// Mask form of [`Board::place`].
    pub fn place_set(&mut self, player: PlayerId, set: CellSet) -> Result<(), BoardError> {
        if player.index() >= self.players as usize {
            return Err(BoardError::UnknownPlayer(player));
        }
        if let Some(index) = set.and_not(&self.geometry.full).first() {
            return Err(BoardError::InvalidPlacement {
                cell: self.coord(index),
                reason: "cell is off the board",
            });
        }
        if let Some(index) = (set & self.occupied()).first() {
            return Err(BoardError::InvalidPlacement {
                cell: self.coord(index),
                reason: "cell is already occupied",
            });
        }
        let p = player.index();
        for index in set.iter() {
            self.hash ^= zobrist(p, index);
        }
        self.cells[p] |= set;
        Ok(())
    }

    /// Cells sharing a side with `set`, excluding `set` itself.
    pub fn neighbor_cells(&self, set: &CellSet) -> CellSet {
        let g = &self.geometry;
        let w = g.width as usize;
        let up = set.shr(w);
        let down = set.shl(w);
        let left = set.shr(1) & g.not_last_col;
        let right = set.shl(1) & g.not_first_col;
        ((up | down | left | right) & g.full).and_not(set)
    }

    /// Cells touching `set` only diagonally.
    pub fn corner_cells(&self, set: &CellSet) -> CellSet {
        let g = &self.geometry;
        let w = g.width as usize;
        let down_right = set.shl(w + 1) & g.not_first_col;
        let down_left = set.shl(w - 1) & g.not_last_col;
        let up_right = set.shr(w - 1) & g.not_first_col;
        let up_left = set.shr(w + 1) & g.not_last_col;
        ((down_right | down_left | up_right | up_left) & g.full)
            .and_not(set)
            .and_not(&self.neighbor_cells(set))
    }

    /// Coordinate form of [`Board::neighbor_cells`].
    pub fn neighbors_of(&self, coords: &[Coord]) -> Vec<Coord> {
        let set = self.cell_set_lossy(coords);
        self.coords(&self.neighbor_cells(&set))
    }

    /// Coordinate form of [`Board::corner_cells`].
    pub fn corners_of(&self, coords: &[Coord]) -> Vec<Coord> {
        let set = self.cell_set_lossy(coords);
        self.coords(&self.corner_cells(&set))
    }

    fn cell_set_lossy(&self, coords: &[Coord]) -> CellSet {
        coords.iter().filter_map(|&c| self.index(c)).collect()
    }

    /// Empty cells where `player` may extend: diagonal to own cells, never
    /// edge-adjacent to them.
    pub fn frontier(&self, player: PlayerId) -> CellSet {
        let own = self.player_cells(player);
        let forbidden = self.occupied() | self.neighbor_cells(&own);
        self.corner_cells(&own).and_not(&forbidden)
    }

    /// Cells `player` can never cover: occupied, or edge-adjacent to own cells.
    pub fn forbidden(&self, player: PlayerId) -> CellSet {
        let own = self.player_cells(player);
        self.occupied() | self.neighbor_cells(&own)
    }

    pub fn rows(&self) -> Vec<String> {
        self.render_rows()
    }
}

impl Renderable for Board {
    fn dimensions(&self) -> (u8, u8) {
        (self.geometry.height, self.geometry.width)
    }

    fn cell_owner(&self, at: Coord) -> Option<PlayerId> {
        self.owner(at)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Wire form: one string per row, '.' empty, '0'..'3' owner.
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    width: u8,
    height: u8,
    players: u8,
    rows: Vec<String>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            players: board.players(),
            rows: board.rows(),
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let mut board = Board::new(repr.width, repr.height, repr.players)?;
        if repr.rows.len() != repr.height as usize {
            return Err(BoardError::Malformed(format!(
                "expected {} rows, got {}",
                repr.height,
                repr.rows.len()
            )));
        }
        for (row, line) in repr.rows.iter().enumerate() {
            if line.chars().count() != repr.width as usize {
                return Err(BoardError::Malformed(format!(
                    "row {row} should have {} cells",
                    repr.width
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let at = Coord::new(row as i16, col as i16);
                match ch {
                    '.' => {}
                    '0'..='3' => {
                        let player = PlayerId(ch as u8 - b'0');
                        board.place(player, &[at])?;
                    }
                    other => {
                        return Err(BoardError::Malformed(format!(
                            "unexpected cell '{other}' at {at}"
                        )))
                    }
                }
            }
        }
        Ok(board)
    }
}
