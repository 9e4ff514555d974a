//! perft - counts move sequences from a position, for movegen verification and benches.
//! A player without a move is skipped; a finished game ends the sequence early.

use blokus_core::Placement;
use rayon::prelude::*;

use crate::position::Position;

/// Number of move sequences of length `depth`, counting a sequence that
/// ends in a finished game as one leaf.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 || position.is_terminal() {
        return 1;
    }
    let player = position.active_player();
    if depth == 1 {
        return position.count_moves(player) as u64;
    }
    let mut total = 0;
    for placement in position.legal_moves(player) {
        let mut next = position.clone();
        if next.play(&placement).is_ok() {
            total += perft(&next, depth - 1);
        }
    }
    total
}

/// Same count as [`perft`], with the root moves split across the rayon pool.
pub fn perft_parallel(position: &Position, depth: u32) -> u64 {
    if depth <= 1 || position.is_terminal() {
        return perft(position, depth);
    }
    let root: Vec<_> = position.legal_moves(position.active_player()).collect();
    root.par_iter()
        .map(|placement| {
            let mut next = position.clone();
            match next.play(placement) {
                Ok(_) => perft(&next, depth - 1),
                Err(_) => 0,
            }
        })
        .sum()
}

/// Leaf count per root move, in generation order.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(Placement, u64)> {
    if depth == 0 || position.is_terminal() {
        return Vec::new();
    }
    position
        .legal_moves(position.active_player())
        .filter_map(|placement| {
            let next = position.after(&placement).ok()?;
            Some((placement, perft(&next, depth - 1)))
        })
        .collect()
}
