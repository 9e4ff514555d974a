//! Placement (move) definitions.

use serde::{Deserialize, Serialize};

use crate::piece::Cells;
use crate::render::Renderable;
use crate::{Coord, Orientation, PieceCatalogue, PieceId, PlayerId};

/// A proposed move: piece, orientation index, and the anchor the normalized
/// orientation offsets are translated by. Not validated.
///
/// Field order gives the stable tie-break ordering used by move selection.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: PieceId,
    pub orientation: u8,
    pub anchor: Coord,
}

impl Placement {
    pub fn new(piece: PieceId, orientation: u8, anchor: Coord) -> Self {
        Self {
            piece,
            orientation,
            anchor,
        }
    }

    pub fn resolve<'a>(&self, catalogue: &'a PieceCatalogue) -> Option<&'a Orientation> {
        catalogue
            .get(self.piece)?
            .orientation(self.orientation as usize)
    }

    /// Board cells covered, None for an unknown piece or orientation or an
    /// anchor whose cells overflow the coordinate range.
    pub fn cells(&self, catalogue: &PieceCatalogue) -> Option<Cells> {
        self.resolve(catalogue)?.translated(self.anchor).collect()
    }

    pub fn area(&self, catalogue: &PieceCatalogue) -> usize {
        catalogue.get(self.piece).map_or(0, |p| p.area())
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.piece, self.orientation, self.anchor)
    }
}

/// A placement resolved to cells and an owner, for hosts that draw pieces.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PlacedPiece {
    pub player: PlayerId,
    pub placement: Placement,
    pub cells: Cells,
}

impl PlacedPiece {
    pub fn resolve(
        player: PlayerId,
        placement: Placement,
        catalogue: &PieceCatalogue,
    ) -> Option<Self> {
        Some(Self {
            player,
            placement,
            cells: placement.cells(catalogue)?,
        })
    }
}

impl Renderable for PlacedPiece {
    fn dimensions(&self) -> (u8, u8) {
        let rows = self.cells.iter().map(|c| c.row + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|c| c.col + 1).max().unwrap_or(0);
        (rows.max(0) as u8, cols.max(0) as u8)
    }

    fn cell_owner(&self, at: Coord) -> Option<PlayerId> {
        self.cells.contains(&at).then_some(self.player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_translate_by_anchor() {
        let cat = PieceCatalogue::standard();
        let p = Placement::new(PieceId(1), 0, Coord::new(3, 4));
        let cells = p.cells(cat).expect("domino");
        assert_eq!(cells.as_slice(), &[Coord::new(3, 4), Coord::new(3, 5)]);
        assert_eq!(p.area(cat), 2);
    }

    #[test]
    fn test_unknown_orientation() {
        let cat = PieceCatalogue::standard();
        assert!(Placement::new(PieceId(0), 1, Coord::ORIGIN).cells(cat).is_none());
        assert!(Placement::new(PieceId(40), 0, Coord::ORIGIN).cells(cat).is_none());
        assert!(Placement::new(PieceId(1), 0, Coord::new(0, i16::MAX))
            .cells(cat)
            .is_none());
    }

    #[test]
    fn test_ordering_is_piece_then_orientation_then_anchor() {
        let a = Placement::new(PieceId(1), 1, Coord::new(0, 0));
        let b = Placement::new(PieceId(2), 0, Coord::new(0, 0));
        let c = Placement::new(PieceId(2), 0, Coord::new(0, 1));
        assert!(a < b && b < c);
    }

    #[test]
    fn test_placed_piece_renders() {
        let cat = PieceCatalogue::standard();
        let placed =
            PlacedPiece::resolve(PlayerId(2), Placement::new(PieceId(3), 0, Coord::new(1, 1)), cat)
                .expect("V3");
        assert_eq!(placed.dimensions(), (3, 3));
        assert_eq!(placed.render_rows(), vec!["...", ".2.", ".22"]);
    }
}
