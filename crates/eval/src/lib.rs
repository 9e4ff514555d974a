//! Blokus eval crate - heuristics for position evaluation.
//!
//! Every term is a pure function of the position: no caches, no randomness,
//! so search results are reproducible.

use blokus_core::{Board, CellSet, PlayerId, PlayerState};
use blokus_engine::rules::{forbidden_cells, target_cells};
use blokus_engine::{count_legal_placements, score_position, GameConfig, GameMode, Position};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub placed_area: f32,
    pub remaining_area: f32,
    pub mobility: f32,
    pub frontier: f32,
    pub territory: f32,
    pub blocked_frontier: f32,
    /// Challenge: owned target cells.
    pub target: f32,
    /// Total allocation: per uncovered cell.
    pub coverage: f32,
    /// Multiplier on the final score difference once the game is over.
    pub terminal: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            placed_area: 1.0,
            remaining_area: -0.25,
            mobility: 0.05,
            frontier: 0.5,
            territory: 0.1,
            blocked_frontier: -0.3,
            target: 2.0,
            coverage: 1.0,
            terminal: 10.0,
        }
    }
}

impl EvalWeights {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Duo => Self::default(),
            GameMode::FourPlayer => Self {
                mobility: 0.03,
                territory: 0.05,
                ..Self::default()
            },
            GameMode::TotalAllocation => Self {
                mobility: 0.02,
                blocked_frontier: -0.6,
                coverage: 2.0,
                ..Self::default()
            },
            GameMode::Challenge => Self {
                target: 4.0,
                ..Self::default()
            },
        }
    }
}

/// Raw feature values for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Features {
    pub placed_area: f32,
    pub remaining_area: f32,
    pub mobility: f32,
    pub frontier: f32,
    pub territory: f32,
    pub blocked_frontier: f32,
}

impl Features {
    fn weighted(&self, w: &EvalWeights) -> f32 {
        self.placed_area * w.placed_area
            + self.remaining_area * w.remaining_area
            + self.mobility * w.mobility
            + self.frontier * w.frontier
            + self.territory * w.territory
            + self.blocked_frontier * w.blocked_frontier
    }
}

/// Cells within one king step of `set`, `set` included.
#[inline]
fn grow(board: &Board, set: &CellSet) -> CellSet {
    *set | board.neighbor_cells(set) | board.corner_cells(set)
}

pub fn features(position: &Position, seat: &PlayerState) -> Features {
    let board = position.board();
    let frontier = target_cells(board, seat);
    let reachable = grow(board, &grow(board, &frontier));
    let territory = reachable.and_not(&forbidden_cells(board, seat));

    let others = position
        .players()
        .iter()
        .filter(|p| p.id != seat.id)
        .fold(CellSet::EMPTY, |acc, p| acc | board.player_cells(p.id));
    let blocked = frontier & board.neighbor_cells(&others);

    Features {
        placed_area: board.placed_area(seat.id) as f32,
        remaining_area: position.remaining_area(seat.id) as f32,
        mobility: count_legal_placements(board, seat) as f32,
        frontier: frontier.count() as f32,
        territory: territory.count() as f32,
        blocked_frontier: blocked.count() as f32,
    }
}

/// Mean of `f` over every player but `player`; 0 when alone.
fn mean_opponent(position: &Position, player: PlayerId, f: impl Fn(&PlayerState) -> f32) -> f32 {
    let (sum, n) = position
        .players()
        .iter()
        .filter(|p| p.id != player)
        .fold((0.0, 0), |(sum, n), p| (sum + f(p), n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f32
    }
}

fn owned_target(board: &Board, config: &GameConfig, player: PlayerId) -> f32 {
    config
        .target
        .iter()
        .filter(|&&c| board.owner(c) == Some(player))
        .count() as f32
}

/// Score `position` from `player`'s point of view; higher is better.
pub fn evaluate(
    position: &Position,
    player: PlayerId,
    config: &GameConfig,
    weights: &EvalWeights,
) -> f32 {
    let Some(seat) = position.player(player) else {
        return 0.0;
    };
    let board = position.board();

    let own = features(position, seat).weighted(weights);
    let opp = mean_opponent(position, player, |p| features(position, p).weighted(weights));
    let mut score = own - opp;

    match config.mode {
        GameMode::Challenge => {
            let mine = owned_target(board, config, player);
            let theirs = mean_opponent(position, player, |p| owned_target(board, config, p.id));
            score += weights.target * (mine - theirs);
        }
        GameMode::TotalAllocation => {
            score -= weights.coverage * board.remaining_empty_count() as f32;
        }
        GameMode::Duo | GameMode::FourPlayer => {}
    }

    if position.is_terminal() {
        let finals = score_position(position, config);
        let mine = finals.scores[player.index()] as f32;
        let diff = if config.mode == GameMode::TotalAllocation {
            mine
        } else {
            mine - mean_opponent(position, player, |p| finals.scores[p.id.index()] as f32)
        };
        score += weights.terminal * diff;
    }
    score
}
