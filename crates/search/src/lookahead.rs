use std::cmp::Ordering;

use blokus_core::{Placement, PlayerId};
use blokus_engine::{GameConfig, Position};
use blokus_eval::{evaluate, EvalWeights};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{rank, successor, SearchBudget, MAX_DEPTH};

/// Paranoid alpha-beta: the searching player maximises, everyone else is
/// assumed to minimise its score. Each node keeps only its `beam_width` best
/// children by one-ply score.
pub struct LookaheadSearch {
    pub depth: u8,
    pub beam_width: usize,
    pub max_nodes: usize,
    pub weights: EvalWeights,
}

impl LookaheadSearch {
    pub fn new(budget: SearchBudget, weights: EvalWeights) -> Self {
        Self {
            depth: budget.depth.clamp(1, MAX_DEPTH),
            beam_width: budget.beam_width.max(1),
            max_nodes: budget.max_nodes.max(1),
            weights,
        }
    }

    pub fn search(
        &self,
        position: &Position,
        config: &GameConfig,
        player: PlayerId,
    ) -> Option<(Placement, f32)> {
        let mut ctx = Context {
            root: player,
            config,
            weights: &self.weights,
            beam_width: self.beam_width,
            max_nodes: self.max_nodes,
            nodes: 0,
            hits: 0,
            cutoffs: 0,
            table: FxHashMap::default(),
        };

        let mut best: Option<(Placement, f32)> = None;
        for (placement, child, _) in ctx.candidates(position, player, true) {
            // full window at the root so equal values stay exact for the tie-break
            let value = ctx.alphabeta(&child, self.depth - 1, f32::NEG_INFINITY, f32::INFINITY);
            let better = match &best {
                None => true,
                Some((current, score)) => {
                    rank((value, &placement), (*score, current)) == Ordering::Less
                }
            };
            if better {
                best = Some((placement, value));
            }
        }

        trace!(
            nodes = ctx.nodes,
            tt_entries = ctx.table.len(),
            tt_hits = ctx.hits,
            cutoffs = ctx.cutoffs,
            "lookahead finished"
        );
        best
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    depth: u8,
    value: f32,
    bound: Bound,
}

struct Context<'a> {
    root: PlayerId,
    config: &'a GameConfig,
    weights: &'a EvalWeights,
    beam_width: usize,
    max_nodes: usize,
    nodes: usize,
    hits: usize,
    cutoffs: usize,
    table: FxHashMap<u64, Entry>,
}

impl Context<'_> {
    #[inline]
    fn static_eval(&mut self, position: &Position) -> f32 {
        self.nodes += 1;
        evaluate(position, self.root, self.config, self.weights)
    }

    /// Children of `position` for `mover`, best first from the mover's side.
    fn candidates(
        &mut self,
        position: &Position,
        mover: PlayerId,
        maximizing: bool,
    ) -> Vec<(Placement, Position, f32)> {
        let moves: Vec<Placement> = position.legal_moves(mover).collect();
        let mut children = Vec::with_capacity(moves.len());
        for placement in moves {
            if let Some(child) = successor(position, mover, &placement) {
                let score = self.static_eval(&child);
                children.push((placement, child, score));
            }
        }
        let sign = if maximizing { 1.0 } else { -1.0 };
        children.sort_by(|a, b| rank((sign * a.2, &a.0), (sign * b.2, &b.0)));
        children.truncate(self.beam_width);
        children
    }

    fn alphabeta(&mut self, position: &Position, depth: u8, mut alpha: f32, mut beta: f32) -> f32 {
        if depth == 0 || position.is_terminal() || self.nodes >= self.max_nodes {
            return self.static_eval(position);
        }

        let key = table_key(position);
        if let Some(entry) = self.table.get(&key).copied() {
            if entry.depth >= depth {
                let hit = match entry.bound {
                    Bound::Exact => true,
                    Bound::Lower => entry.value >= beta,
                    Bound::Upper => entry.value <= alpha,
                };
                if hit {
                    self.hits += 1;
                    return entry.value;
                }
            }
        }

        let mover = position.active_player();
        let maximizing = mover == self.root;
        let children = self.candidates(position, mover, maximizing);
        if children.is_empty() {
            return self.static_eval(position);
        }

        let (alpha0, beta0) = (alpha, beta);
        let mut best = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
        for (_, child, _) in &children {
            let value = self.alphabeta(child, depth - 1, alpha, beta);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if alpha >= beta {
                self.cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha0 {
            Bound::Upper
        } else if best >= beta0 {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.insert(
            key,
            Entry {
                depth,
                value: best,
                bound,
            },
        );
        best
    }
}

/// Board hash mixed with the side to move and every inventory.
fn table_key(position: &Position) -> u64 {
    const MIX: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut key = position.board().zobrist_hash();
    key ^= (position.active_player().0 as u64 + 1).wrapping_mul(MIX);
    for (i, seat) in position.players().iter().enumerate() {
        let bits = (seat.remaining.bits() as u64) << 1 | seat.out_of_moves as u64;
        key ^= bits.rotate_left(16 * i as u32).wrapping_mul(MIX);
    }
    key
}
