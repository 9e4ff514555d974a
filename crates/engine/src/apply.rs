use blokus_core::{Board, CellSet, Placement, PlayerState};

use crate::rules::{check_placement, Rejection};

/// Apply a placement to a copy of the board.
pub fn apply_placement(
    board: &Board,
    player: &PlayerState,
    placement: &Placement,
) -> Result<Board, Rejection> {
    let mut next = board.clone();
    let mut seat = player.clone();
    apply_placement_mut(&mut next, &mut seat, placement)?;
    Ok(next)
}

/// Validate, then write. On rejection neither board nor player is touched.
#[inline]
pub fn apply_placement_mut(
    board: &mut Board,
    player: &mut PlayerState,
    placement: &Placement,
) -> Result<CellSet, Rejection> {
    let mask = check_placement(board, player, placement)?;
    // check_placement already proved every cell empty and on the board
    board
        .place_set(player.id, mask)
        .map_err(|_| Rejection::Overlap)?;
    player.record_placement(placement.piece);
    Ok(mask)
}
