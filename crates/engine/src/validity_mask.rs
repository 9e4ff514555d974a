//! Anchor masks via Minkowski smear.
//! For each offset of an orientation, shift a board mask back by that offset
//! and combine: bit=1 at anchor a means a + offset hits the mask for some offset.

use blokus_core::{Board, CellSet, Orientation};

/// Linear offset of each orientation cell for a board of this width.
#[inline]
fn linear_offsets(orientation: &Orientation, width: usize) -> impl Iterator<Item = usize> + '_ {
    orientation
        .cells()
        .iter()
        .map(move |c| c.row as usize * width + c.col as usize)
}

/// Anchors where some cell of the orientation lands in `mask`.
pub fn smear(mask: &CellSet, orientation: &Orientation, width: usize) -> CellSet {
    let mut out = CellSet::EMPTY;
    for offset in linear_offsets(orientation, width) {
        out |= mask.shr(offset);
    }
    out
}

/// Anchors whose bounding box stays on the board, cached per box size.
///
/// Row wrap in the smear is only possible for anchors outside this region,
/// so masking with it makes the linear shifts exact.
#[derive(Clone)]
pub struct FitCache {
    width: u8,
    height: u8,
    fits: [[Option<CellSet>; 5]; 5],
}

impl FitCache {
    pub fn new(board: &Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            fits: [[None; 5]; 5],
        }
    }

    pub fn get(&mut self, box_height: u8, box_width: u8) -> CellSet {
        let (h, w) = (box_height.clamp(1, 5) as usize, box_width.clamp(1, 5) as usize);
        if let Some(mask) = self.fits[h - 1][w - 1] {
            return mask;
        }
        let mask = fit_region(self.width, self.height, box_height, box_width);
        self.fits[h - 1][w - 1] = Some(mask);
        mask
    }
}

fn fit_region(width: u8, height: u8, box_height: u8, box_width: u8) -> CellSet {
    if box_height > height || box_width > width {
        return CellSet::EMPTY;
    }
    let w = width as usize;
    let row = CellSet::with_first((width - box_width) as usize + 1);
    let mut region = CellSet::EMPTY;
    for r in 0..=(height - box_height) as usize {
        region |= row.shl(r * w);
    }
    region
}

/// Legal anchors for one orientation: touches `target`, avoids `forbidden`, fits the board.
pub fn anchor_mask(
    orientation: &Orientation,
    width: usize,
    target: &CellSet,
    forbidden: &CellSet,
    fits: &mut FitCache,
) -> CellSet {
    let mut touch = CellSet::EMPTY;
    let mut blocked = CellSet::EMPTY;
    for offset in linear_offsets(orientation, width) {
        touch |= target.shr(offset);
        blocked |= forbidden.shr(offset);
    }
    touch.and_not(&blocked) & fits.get(orientation.height(), orientation.width())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blokus_core::{Coord, PieceCatalogue, PieceId};

    #[test]
    fn test_fit_region_for_domino() {
        let board = Board::new(5, 5, 2).unwrap();
        let mut fits = FitCache::new(&board);
        // horizontal domino: columns 0..=3 on every row
        let region = fits.get(1, 2);
        assert_eq!(region.count(), 20);
        assert!(!region.contains(4));
        assert!(region.contains(3));
        // vertical: rows 0..=3
        assert_eq!(fits.get(2, 1).count(), 20);
        assert!(!fits.get(2, 1).contains(20));
    }

    #[test]
    fn test_fit_region_too_large() {
        let board = Board::new(5, 5, 2).unwrap();
        let mut fits = FitCache::new(&board);
        assert_eq!(fits.get(5, 5).count(), 1);
        let tiny = Board::new(3, 3, 2).unwrap();
        let mut fits = FitCache::new(&tiny);
        assert!(fits.get(1, 5).is_empty());
    }

    #[test]
    fn test_anchor_mask_start_corner() {
        let board = Board::new(14, 14, 2).unwrap();
        let cat = PieceCatalogue::standard();
        let domino = &cat.orientations(PieceId(1))[0];
        let target = board.cell_set(&[Coord::new(0, 0)]).unwrap();
        let mut fits = FitCache::new(&board);
        let anchors = anchor_mask(domino, 14, &target, &CellSet::EMPTY, &mut fits);
        // only anchor (0,0); anchor (0,-1) does not exist
        assert_eq!(board.coords(&anchors), vec![Coord::new(0, 0)]);
    }

    #[test]
    fn test_anchor_mask_respects_forbidden() {
        let board = Board::new(6, 6, 2).unwrap();
        let cat = PieceCatalogue::standard();
        let mono = &cat.orientations(PieceId::MONOMINO)[0];
        let target = board
            .cell_set(&[Coord::new(2, 2), Coord::new(3, 3)])
            .unwrap();
        let forbidden = board.cell_set(&[Coord::new(3, 3)]).unwrap();
        let mut fits = FitCache::new(&board);
        let anchors = anchor_mask(mono, 6, &target, &forbidden, &mut fits);
        assert_eq!(board.coords(&anchors), vec![Coord::new(2, 2)]);
        assert_eq!(smear(&target, mono, 6), target);
    }
}
