use blokus_core::{BoardError, Coord, PieceSet, PlayerId, MAX_PLAYERS, MAX_SIDE, PIECE_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_SIDE: u8 = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Two players, most area placed wins.
    Duo,
    /// Players share the goal of covering the board.
    TotalAllocation,
    /// Two players scored on a fixed target region.
    Challenge,
    /// Four players, most area placed wins.
    FourPlayer,
}

impl GameMode {
    pub fn supports_players(self, count: u8) -> bool {
        match self {
            GameMode::Duo | GameMode::Challenge => count == 2,
            GameMode::FourPlayer => count == 4,
            GameMode::TotalAllocation => matches!(count, 1 | 2 | 4),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be between {MIN_SIDE}x{MIN_SIDE} and {MAX_SIDE}x{MAX_SIDE}, got {width}x{height}")]
    BoardSize { width: u8, height: u8 },
    #[error("{mode:?} does not support {count} players")]
    PlayerCount { mode: GameMode, count: u8 },
    #[error("expected start cells for {expected} players, got {got}")]
    StartCellCount { expected: u8, got: usize },
    #[error("{0} has no start cells")]
    MissingStartCells(PlayerId),
    #[error("start cell {cell} of {player} is off the board")]
    StartCellOffBoard { player: PlayerId, cell: Coord },
    #[error("turn order must list every player exactly once")]
    TurnOrder,
    #[error("inventory names pieces outside the catalogue")]
    UnknownPieces,
    #[error("challenge mode needs a target region")]
    EmptyTarget,
    #[error("target cell {0} is off the board")]
    TargetOffBoard(Coord),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Everything needed to set up a game. Passed explicitly; there is no global default.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,
    pub width: u8,
    pub height: u8,
    pub player_count: u8,
    /// Per player, the cells a first placement may cover.
    pub start_cells: Vec<Vec<Coord>>,
    pub turn_order: Vec<PlayerId>,
    /// Pieces each player starts with.
    pub inventory: PieceSet,
    /// Challenge region; unused by other modes.
    #[serde(default)]
    pub target: Vec<Coord>,
}

impl GameConfig {
    pub fn duo() -> Self {
        Self {
            mode: GameMode::Duo,
            width: 14,
            height: 14,
            player_count: 2,
            start_cells: vec![vec![Coord::new(0, 0)], vec![Coord::new(13, 13)]],
            turn_order: vec![PlayerId(0), PlayerId(1)],
            inventory: PieceSet::standard(),
            target: Vec::new(),
        }
    }

    /// 20x20, players seated clockwise from the top-left corner.
    pub fn four_player() -> Self {
        Self {
            mode: GameMode::FourPlayer,
            width: 20,
            height: 20,
            player_count: 4,
            start_cells: vec![
                vec![Coord::new(0, 0)],
                vec![Coord::new(0, 19)],
                vec![Coord::new(19, 19)],
                vec![Coord::new(19, 0)],
            ],
            turn_order: (0..4).map(PlayerId).collect(),
            inventory: PieceSet::standard(),
            target: Vec::new(),
        }
    }

    /// 20x20 coverage game; every player may open in any corner.
    pub fn total_allocation(players: u8) -> Self {
        let corners = corners(20, 20);
        Self {
            mode: GameMode::TotalAllocation,
            width: 20,
            height: 20,
            player_count: players,
            start_cells: vec![corners; players as usize],
            turn_order: (0..players).map(PlayerId).collect(),
            inventory: PieceSet::standard(),
            target: Vec::new(),
        }
    }

    /// Duo layout scored on `target`.
    pub fn challenge(target: Vec<Coord>) -> Self {
        Self {
            mode: GameMode::Challenge,
            target,
            ..Self::duo()
        }
    }

    /// Challenge on the central 6x6 block of the Duo board.
    pub fn challenge_center() -> Self {
        let target = (4..10)
            .flat_map(|row| (4..10).map(move |col| Coord::new(row, col)))
            .collect();
        Self::challenge(target)
    }

    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Duo => Self::duo(),
            GameMode::FourPlayer => Self::four_player(),
            GameMode::TotalAllocation => Self::total_allocation(4),
            GameMode::Challenge => Self::challenge_center(),
        }
    }

    fn in_bounds(&self, cell: Coord) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && cell.row < self.height as i16
            && cell.col < self.width as i16
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if !(MIN_SIDE..=MAX_SIDE).contains(&width) || !(MIN_SIDE..=MAX_SIDE).contains(&height) {
            return Err(ConfigError::BoardSize { width, height });
        }
        if self.player_count as usize > MAX_PLAYERS || !self.mode.supports_players(self.player_count) {
            return Err(ConfigError::PlayerCount {
                mode: self.mode,
                count: self.player_count,
            });
        }
        if self.start_cells.len() != self.player_count as usize {
            return Err(ConfigError::StartCellCount {
                expected: self.player_count,
                got: self.start_cells.len(),
            });
        }
        for (i, cells) in self.start_cells.iter().enumerate() {
            let player = PlayerId(i as u8);
            if cells.is_empty() {
                return Err(ConfigError::MissingStartCells(player));
            }
            if let Some(&cell) = cells.iter().find(|&&c| !self.in_bounds(c)) {
                return Err(ConfigError::StartCellOffBoard { player, cell });
            }
        }
        let mut order = self.turn_order.clone();
        order.sort_unstable();
        if !order.iter().copied().eq((0..self.player_count).map(PlayerId)) {
            return Err(ConfigError::TurnOrder);
        }
        if !self.inventory.is_subset_of(PieceSet::first(PIECE_COUNT)) {
            return Err(ConfigError::UnknownPieces);
        }
        if self.mode == GameMode::Challenge {
            if self.target.is_empty() {
                return Err(ConfigError::EmptyTarget);
            }
            if let Some(&cell) = self.target.iter().find(|&&c| !self.in_bounds(c)) {
                return Err(ConfigError::TargetOffBoard(cell));
            }
        }
        Ok(())
    }
}

fn corners(width: i16, height: i16) -> Vec<Coord> {
    vec![
        Coord::new(0, 0),
        Coord::new(0, width - 1),
        Coord::new(height - 1, width - 1),
        Coord::new(height - 1, 0),
    ]
}
