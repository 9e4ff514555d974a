//! Blokus search crate - greedy ranking and bounded lookahead for move selection.

mod greedy;
mod lookahead;

pub use greedy::GreedySearch;
pub use lookahead::LookaheadSearch;

use std::cmp::Ordering;

use blokus_core::{PieceCatalogue, Placement, PlayerId};
use blokus_engine::{Game, GameStatus, Position};
use blokus_eval::EvalWeights;
use serde::{Deserialize, Serialize};

pub const MAX_DEPTH: u8 = 4;

/// How much work a search may do. Exhausting `max_nodes` makes the search
/// fall back to static evaluation for the nodes it has not expanded yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BudgetRepr")]
pub struct SearchBudget {
    /// Plies, clamped to `1..=MAX_DEPTH`. Depth 1 is greedy.
    pub depth: u8,
    /// Candidates kept per node after one-ply ordering.
    pub beam_width: usize,
    pub max_nodes: usize,
}

impl SearchBudget {
    pub fn new(depth: u8, beam_width: usize, max_nodes: usize) -> Self {
        Self {
            depth: depth.clamp(1, MAX_DEPTH),
            beam_width: beam_width.max(1),
            max_nodes: max_nodes.max(1),
        }
    }

    pub fn greedy() -> Self {
        Self::new(1, usize::MAX, usize::MAX)
    }

    pub fn strong() -> Self {
        Self::new(3, 12, 20_000)
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(2, 8, 4_000)
    }
}

/// Budget as written in a settings file; missing fields take the defaults.
#[derive(Deserialize)]
#[serde(default)]
struct BudgetRepr {
    depth: u8,
    beam_width: usize,
    max_nodes: usize,
}

impl Default for BudgetRepr {
    fn default() -> Self {
        let SearchBudget {
            depth,
            beam_width,
            max_nodes,
        } = SearchBudget::default();
        Self {
            depth,
            beam_width,
            max_nodes,
        }
    }
}

impl From<BudgetRepr> for SearchBudget {
    fn from(repr: BudgetRepr) -> Self {
        SearchBudget::new(repr.depth, repr.beam_width, repr.max_nodes)
    }
}

/// Position after `player` places `placement` and the turn moves on.
pub fn successor(position: &Position, player: PlayerId, placement: &Placement) -> Option<Position> {
    let mut next = position.clone();
    next.apply(player, placement).ok()?;
    next.advance_turn();
    Some(next)
}

/// Higher score first, then larger piece, then lower (piece, orientation, anchor).
pub(crate) fn rank(a: (f32, &Placement), b: (f32, &Placement)) -> Ordering {
    let area = |p: &Placement| p.area(PieceCatalogue::standard());
    b.0.total_cmp(&a.0)
        .then_with(|| area(b.1).cmp(&area(a.1)))
        .then_with(|| a.1.cmp(b.1))
}

/// Pick a move for `player`. None unless the game is in progress, `player`
/// holds the turn and has a legal move. Same game and budget, same answer.
pub fn suggest_move(
    game: &Game,
    player: PlayerId,
    budget: &SearchBudget,
    weights: &EvalWeights,
) -> Option<Placement> {
    if game.status() != GameStatus::InProgress || game.active_player() != Some(player) {
        return None;
    }
    let found = if budget.depth <= 1 {
        GreedySearch::new(weights.clone()).find_best_move(game.position(), game.config(), player)
    } else {
        LookaheadSearch::new(*budget, weights.clone()).search(game.position(), game.config(), player)
    };
    found.map(|(placement, _)| placement)
}
