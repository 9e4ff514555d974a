//! legality checks - bounds, overlap, edge contact, corner contact, start cells

use blokus_core::{Board, CellSet, PieceCatalogue, Placement, PlayerState};
use thiserror::Error;

/// Why a placement was refused. Expected during normal play and search.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Error)]
pub enum Rejection {
    #[error("piece id is not in the catalogue")]
    UnknownPiece,
    #[error("piece has no such orientation")]
    UnknownOrientation,
    #[error("player is not seated in this game")]
    UnknownPlayer,
    #[error("piece was already used")]
    PieceUnavailable,
    #[error("piece would leave the board")]
    OutOfBounds,
    #[error("piece overlaps an occupied cell")]
    Overlap,
    #[error("piece shares an edge with the player's own piece")]
    EdgeContact,
    #[error("piece does not touch the player's pieces corner to corner")]
    NoCornerContact,
    #[error("first piece must cover a start cell")]
    MissingStartCell,
}

/// Validate `placement` for `player` and return the covered cells.
///
/// Reads only; nothing is written to the board.
pub fn check_placement(
    board: &Board,
    player: &PlayerState,
    placement: &Placement,
) -> Result<CellSet, Rejection> {
    let catalogue = PieceCatalogue::standard();
    let piece = catalogue
        .get(placement.piece)
        .ok_or(Rejection::UnknownPiece)?;
    let orientation = piece
        .orientation(placement.orientation as usize)
        .ok_or(Rejection::UnknownOrientation)?;
    if player.id.index() >= board.players() as usize {
        return Err(Rejection::UnknownPlayer);
    }
    if !player.remaining.contains(placement.piece) {
        return Err(Rejection::PieceUnavailable);
    }

    let mut mask = CellSet::EMPTY;
    for cell in orientation.translated(placement.anchor) {
        let cell = cell.ok_or(Rejection::OutOfBounds)?;
        mask.insert(board.index(cell).ok_or(Rejection::OutOfBounds)?);
    }
    check_cells(board, player, &mask)?;
    Ok(mask)
}

/// Contact rules for an in-bounds cell mask.
pub fn check_cells(board: &Board, player: &PlayerState, mask: &CellSet) -> Result<(), Rejection> {
    if mask.intersects(&board.occupied()) {
        return Err(Rejection::Overlap);
    }
    if player.is_first_move() {
        // edge rule is suspended; the start cells take the place of corner contact
        if !mask.intersects(&player.start_cells) {
            return Err(Rejection::MissingStartCell);
        }
        return Ok(());
    }
    let own = board.player_cells(player.id);
    if mask.intersects(&board.neighbor_cells(&own)) {
        return Err(Rejection::EdgeContact);
    }
    if !mask.intersects(&board.corner_cells(&own)) {
        return Err(Rejection::NoCornerContact);
    }
    Ok(())
}

pub fn is_legal(board: &Board, player: &PlayerState, placement: &Placement) -> bool {
    check_placement(board, player, placement).is_ok()
}

/// Cells `player` may extend from next: start cells before the first move,
/// the corner frontier afterwards.
pub fn target_cells(board: &Board, player: &PlayerState) -> CellSet {
    if player.is_first_move() {
        player.start_cells.and_not(&board.occupied()) & board.full_mask()
    } else {
        board.frontier(player.id)
    }
}

/// Cells `player` can never cover from here.
pub fn forbidden_cells(board: &Board, player: &PlayerState) -> CellSet {
    if player.is_first_move() {
        board.occupied()
    } else {
        board.forbidden(player.id)
    }
}
