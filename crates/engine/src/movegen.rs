//! Legal placement generation for one player.
//!
//! Anchors are drawn from the player's target cells (start cells before the
//! first move, corner frontier afterwards) through the validity mask, so every
//! yielded placement passes [`check_placement`](crate::rules::check_placement)
//! and every legal placement is yielded exactly once.

use blokus_core::bitset::CellSetIter;
use blokus_core::{
    Board, CellSet, Coord, PieceCatalogue, PieceId, PieceSet, Placement, PlayerState,
};

use crate::rules::{forbidden_cells, target_cells};
use crate::validity_mask::{anchor_mask, FitCache};

/// Lazy, single-pass sequence of legal placements in
/// (piece id, orientation index, anchor index) order.
pub struct LegalPlacements {
    catalogue: &'static PieceCatalogue,
    width: usize,
    target: CellSet,
    forbidden: CellSet,
    fits: FitCache,
    pieces: PieceSet,
    piece: Option<PieceId>,
    orientation: usize,
    anchors: Option<CellSetIter>,
}

impl LegalPlacements {
    fn new(board: &Board, player: &PlayerState) -> Self {
        let target = target_cells(board, player);
        let seated = player.id.index() < board.players() as usize;
        // nothing to extend from means nothing to enumerate
        let pieces = if target.is_empty() || !seated {
            PieceSet::EMPTY
        } else {
            player.remaining
        };
        Self {
            catalogue: PieceCatalogue::standard(),
            width: board.width() as usize,
            target,
            forbidden: forbidden_cells(board, player),
            fits: FitCache::new(board),
            pieces,
            piece: None,
            orientation: 0,
            anchors: None,
        }
    }

    /// A sequence that yields nothing.
    pub fn exhausted(board: &Board) -> Self {
        Self {
            catalogue: PieceCatalogue::standard(),
            width: board.width() as usize,
            target: CellSet::EMPTY,
            forbidden: CellSet::EMPTY,
            fits: FitCache::new(board),
            pieces: PieceSet::EMPTY,
            piece: None,
            orientation: 0,
            anchors: None,
        }
    }

    /// Move to the next (piece, orientation) pair. False once exhausted.
    fn advance(&mut self) -> bool {
        loop {
            if let Some(piece) = self.piece {
                let orientations = self.catalogue.orientations(piece);
                if self.orientation + 1 < orientations.len() {
                    self.orientation += 1;
                    self.load_anchors(piece);
                    return true;
                }
            }
            let Some(next) = self.pieces.iter().next() else {
                self.piece = None;
                self.anchors = None;
                return false;
            };
            self.pieces.remove(next);
            if self.catalogue.orientations(next).is_empty() {
                continue;
            }
            self.piece = Some(next);
            self.orientation = 0;
            self.load_anchors(next);
            return true;
        }
    }

    fn load_anchors(&mut self, piece: PieceId) {
        let orientation = &self.catalogue.orientations(piece)[self.orientation];
        let mask = anchor_mask(
            orientation,
            self.width,
            &self.target,
            &self.forbidden,
            &mut self.fits,
        );
        self.anchors = Some(mask.iter());
    }
}

impl Iterator for LegalPlacements {
    type Item = Placement;

    fn next(&mut self) -> Option<Placement> {
        loop {
            if let (Some(piece), Some(anchors)) = (self.piece, self.anchors.as_mut()) {
                if let Some(index) = anchors.next() {
                    let w = self.width;
                    let anchor = Coord::new((index / w) as i16, (index % w) as i16);
                    return Some(Placement::new(piece, self.orientation as u8, anchor));
                }
            }
            if !self.advance() {
                return None;
            }
        }
    }
}

/// All legal placements for `player`, lazily.
pub fn legal_placements(board: &Board, player: &PlayerState) -> LegalPlacements {
    LegalPlacements::new(board, player)
}

/// Short-circuits on the first legal placement.
pub fn has_legal_placement(board: &Board, player: &PlayerState) -> bool {
    legal_placements(board, player).next().is_some()
}

/// Count without materializing placements.
pub fn count_legal_placements(board: &Board, player: &PlayerState) -> usize {
    let target = target_cells(board, player);
    if target.is_empty() || player.id.index() >= board.players() as usize {
        return 0;
    }
    let forbidden = forbidden_cells(board, player);
    let catalogue = PieceCatalogue::standard();
    let width = board.width() as usize;
    let mut fits = FitCache::new(board);
    player
        .remaining
        .iter()
        .flat_map(|id| catalogue.orientations(id))
        .map(|o| anchor_mask(o, width, &target, &forbidden, &mut fits).count() as usize)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{check_placement, is_legal};
    use blokus_core::PlayerId;

    fn seat(board: &Board, id: u8, start: &[Coord]) -> PlayerState {
        PlayerState::new(
            PlayerId(id),
            PieceSet::standard(),
            board.cell_set(start).unwrap(),
        )
    }

    fn brute_force(board: &Board, player: &PlayerState) -> Vec<Placement> {
        let cat = PieceCatalogue::standard();
        let mut out = Vec::new();
        for id in player.remaining.iter() {
            for o in 0..cat.orientations(id).len() {
                for row in 0..board.height() as i16 {
                    for col in 0..board.width() as i16 {
                        let p = Placement::new(id, o as u8, Coord::new(row, col));
                        if is_legal(board, player, &p) {
                            out.push(p);
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_first_move_matches_brute_force() {
        let board = Board::new(14, 14, 2).unwrap();
        let p = seat(&board, 0, &[Coord::new(0, 0)]);
        let fast: Vec<_> = legal_placements(&board, &p).collect();
        let mut slow = brute_force(&board, &p);
        slow.sort();
        let mut sorted = fast.clone();
        sorted.sort();
        assert_eq!(sorted, slow);
        assert_eq!(count_legal_placements(&board, &p), fast.len());
        // one placement per (orientation, cell covering the corner) at (0,0): only
        // orientations with a cell at offset (0,0) can cover it
        assert!(fast.iter().all(|m| m.anchor == Coord::new(0, 0)));
    }

    #[test]
    fn test_midgame_matches_brute_force() {
        let mut board = Board::new(10, 10, 2).unwrap();
        let mut a = seat(&board, 0, &[Coord::new(0, 0)]);
        let mut b = seat(&board, 1, &[Coord::new(9, 9)]);
        board
            .place(PlayerId(0), &[Coord::new(0, 0), Coord::new(1, 0), Coord::new(1, 1)])
            .unwrap();
        a.record_placement(PieceId(3));
        board
            .place(PlayerId(1), &[Coord::new(9, 9), Coord::new(8, 9), Coord::new(7, 9)])
            .unwrap();
        b.record_placement(PieceId(2));
        board.place(PlayerId(1), &[Coord::new(2, 2)]).unwrap();

        for player in [&a, &b] {
            let mut fast: Vec<_> = legal_placements(&board, player).collect();
            for m in &fast {
                assert!(check_placement(&board, player, m).is_ok(), "{m}");
            }
            fast.sort();
            assert_eq!(fast, brute_force(&board, player));
            assert_eq!(count_legal_placements(&board, player), fast.len());
        }
    }

    #[test]
    fn test_order_is_by_piece_then_orientation() {
        let board = Board::new(14, 14, 2).unwrap();
        let p = seat(&board, 0, &[Coord::new(0, 0)]);
        let moves: Vec<_> = legal_placements(&board, &p).collect();
        let keys: Vec<_> = moves.iter().map(|m| (m.piece, m.orientation)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(moves[0], Placement::new(PieceId::MONOMINO, 0, Coord::ORIGIN));
    }

    #[test]
    fn test_empty_inventory_yields_nothing() {
        let board = Board::new(14, 14, 2).unwrap();
        let mut p = seat(&board, 0, &[Coord::new(0, 0)]);
        p.remaining = PieceSet::EMPTY;
        assert_eq!(legal_placements(&board, &p).count(), 0);
        assert!(!has_legal_placement(&board, &p));
        assert_eq!(count_legal_placements(&board, &p), 0);
    }

    #[test]
    fn test_blocked_start_yields_nothing() {
        let mut board = Board::new(14, 14, 2).unwrap();
        board.place(PlayerId(1), &[Coord::new(0, 0)]).unwrap();
        let p = seat(&board, 0, &[Coord::new(0, 0)]);
        assert!(!has_legal_placement(&board, &p));
    }
}
