//! Polyomino catalogue - canonical shapes plus their distinct orientations.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::Coord;

/// Largest piece in any catalogue (pentominoes).
pub const MAX_PIECE_CELLS: usize = 5;

/// Number of pieces in the standard inventory.
pub const PIECE_COUNT: usize = 21;

pub type Cells = SmallVec<[Coord; MAX_PIECE_CELLS]>;

/// Standard 21-piece inventory, (row, col) offsets.
const STANDARD_SHAPES: [(&str, &[(i16, i16)]); PIECE_COUNT] = [
    ("I1", &[(0, 0)]),
    ("I2", &[(0, 0), (0, 1)]),
    ("I3", &[(0, 0), (0, 1), (0, 2)]),
    ("V3", &[(0, 0), (1, 0), (1, 1)]),
    ("I4", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
    ("L4", &[(0, 0), (1, 0), (2, 0), (2, 1)]),
    ("O4", &[(0, 0), (0, 1), (1, 0), (1, 1)]),
    ("T4", &[(0, 0), (0, 1), (0, 2), (1, 1)]),
    ("Z4", &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    ("F", &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)]),
    ("I5", &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    ("L5", &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)]),
    ("N", &[(0, 1), (1, 1), (2, 0), (2, 1), (3, 0)]),
    ("P", &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]),
    ("T5", &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1)]),
    ("U", &[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]),
    ("V5", &[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]),
    ("W", &[(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]),
    ("X", &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]),
    ("Y", &[(0, 1), (1, 0), (1, 1), (2, 1), (3, 1)]),
    ("Z5", &[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]),
];

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u8);

impl PieceId {
    /// The single-cell piece of the standard inventory.
    pub const MONOMINO: PieceId = PieceId(0);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    #[error("piece {0} has no cells")]
    Empty(&'static str),
    #[error("piece {0} has more than {MAX_PIECE_CELLS} cells")]
    TooLarge(&'static str),
    #[error("piece {0} repeats a cell")]
    Duplicate(&'static str),
    #[error("piece {0} is not edge-connected")]
    Disconnected(&'static str),
    #[error("catalogue holds {0} pieces, at most 32 fit an inventory")]
    TooManyPieces(usize),
}

/// One rotation/reflection of a piece, translated so min row and min col are 0.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Orientation {
    cells: Cells,
    height: u8,
    width: u8,
}

impl Orientation {
    fn normalized(raw: &[Coord]) -> Self {
        let min_row = raw.iter().map(|c| c.row).min().unwrap_or(0);
        let min_col = raw.iter().map(|c| c.col).min().unwrap_or(0);
        let mut cells: Cells = raw
            .iter()
            .map(|&c| Coord::new(c.row - min_row, c.col - min_col))
            .collect();
        cells.sort_unstable();
        let height = cells.iter().map(|c| c.row + 1).max().unwrap_or(0) as u8;
        let width = cells.iter().map(|c| c.col + 1).max().unwrap_or(0) as u8;
        Self {
            cells,
            height,
            width,
        }
    }

    /// Offsets sorted row-major, all non-negative.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Bounding box rows.
    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Bounding box columns.
    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Cells translated by `anchor`; None where a cell leaves the `i16` grid.
    pub fn translated(&self, anchor: Coord) -> impl Iterator<Item = Option<Coord>> + '_ {
        self.cells.iter().map(move |&c| c.checked_add(anchor))
    }
}

#[derive(Clone, Debug)]
pub struct Piece {
    id: PieceId,
    name: &'static str,
    canonical: Cells,
    orientations: Vec<Orientation>,
}

impl Piece {
    fn build(id: PieceId, name: &'static str, shape: &[(i16, i16)]) -> Result<Self, CatalogueError> {
        if shape.is_empty() {
            return Err(CatalogueError::Empty(name));
        }
        if shape.len() > MAX_PIECE_CELLS {
            return Err(CatalogueError::TooLarge(name));
        }
        let canonical: Cells = shape.iter().map(|&rc| Coord::from(rc)).collect();
        for (i, a) in canonical.iter().enumerate() {
            if canonical[i + 1..].contains(a) {
                return Err(CatalogueError::Duplicate(name));
            }
        }
        if !is_connected(&canonical) {
            return Err(CatalogueError::Disconnected(name));
        }

        // rotations first, then the mirrored rotations; first occurrence wins
        let mut orientations: Vec<Orientation> = Vec::with_capacity(8);
        for mirrored in [false, true] {
            let mut current: Cells = if mirrored {
                canonical.iter().map(|c| c.mirror()).collect()
            } else {
                canonical.clone()
            };
            for _ in 0..4 {
                let candidate = Orientation::normalized(&current);
                if !orientations.contains(&candidate) {
                    orientations.push(candidate);
                }
                current = current.iter().map(|c| c.rotate_cw()).collect();
            }
        }

        Ok(Self {
            id,
            name,
            canonical,
            orientations,
        })
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.canonical.len()
    }

    pub fn canonical(&self) -> &[Coord] {
        &self.canonical
    }

    #[inline]
    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }

    #[inline]
    pub fn orientation(&self, index: usize) -> Option<&Orientation> {
        self.orientations.get(index)
    }
}

fn is_connected(cells: &[Coord]) -> bool {
    let mut seen = vec![false; cells.len()];
    let mut stack = vec![0usize];
    seen[0] = true;
    while let Some(i) = stack.pop() {
        for (j, other) in cells.iter().enumerate() {
            if !seen[j] && cells[i].is_neighbor(*other) {
                seen[j] = true;
                stack.push(j);
            }
        }
    }
    seen.into_iter().all(|s| s)
}

/// Immutable piece table. Orientation indices are stable for the life of the process.
#[derive(Clone, Debug)]
pub struct PieceCatalogue {
    pieces: Vec<Piece>,
}

impl PieceCatalogue {
    pub fn from_shapes(shapes: &[(&'static str, &[(i16, i16)])]) -> Result<Self, CatalogueError> {
        if shapes.len() > 32 {
            return Err(CatalogueError::TooManyPieces(shapes.len()));
        }
        let pieces = shapes
            .iter()
            .enumerate()
            .map(|(i, &(name, shape))| Piece::build(PieceId(i as u8), name, shape))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pieces })
    }

    /// Shared standard catalogue, built on first use.
    pub fn standard() -> &'static PieceCatalogue {
        static STANDARD: OnceLock<PieceCatalogue> = OnceLock::new();
        STANDARD.get_or_init(|| match PieceCatalogue::from_shapes(&STANDARD_SHAPES) {
            Ok(catalogue) => catalogue,
            Err(err) => panic!("standard piece table is malformed: {err}"),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[inline]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Orientations of `id`, empty if the id is unknown.
    pub fn orientations(&self, id: PieceId) -> &[Orientation] {
        self.get(id).map(Piece::orientations).unwrap_or(&[])
    }

    /// Every piece in this catalogue.
    pub fn full_set(&self) -> PieceSet {
        PieceSet::first(self.pieces.len())
    }

    /// Total cell count of the pieces in `set`.
    pub fn area_of(&self, set: PieceSet) -> usize {
        set.iter()
            .filter_map(|id| self.get(id))
            .map(Piece::area)
            .sum()
    }
}

/// Remaining-piece inventory, one bit per piece id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceSet(u32);

impl PieceSet {
    pub const EMPTY: PieceSet = PieceSet(0);

    /// Ids `0..count`.
    pub fn first(count: usize) -> Self {
        if count >= 32 {
            PieceSet(!0)
        } else {
            PieceSet((1u32 << count) - 1)
        }
    }

    /// The standard 21-piece inventory.
    pub fn standard() -> Self {
        Self::first(PIECE_COUNT)
    }

    pub fn from_bits(bits: u32) -> Self {
        PieceSet(bits)
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn contains(self, id: PieceId) -> bool {
        id.0 < 32 && (self.0 >> id.0) & 1 == 1
    }

    #[inline]
    pub fn insert(&mut self, id: PieceId) {
        if id.0 < 32 {
            self.0 |= 1 << id.0;
        }
    }

    #[inline]
    pub fn remove(&mut self, id: PieceId) {
        if id.0 < 32 {
            self.0 &= !(1 << id.0);
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_subset_of(self, other: PieceSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Ascending ids.
    pub fn iter(self) -> impl Iterator<Item = PieceId> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(PieceId(id))
        })
    }
}

impl FromIterator<PieceId> for PieceSet {
    fn from_iter<I: IntoIterator<Item = PieceId>>(iter: I) -> Self {
        let mut set = PieceSet::EMPTY;
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl std::fmt::Debug for PieceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(|id| id.0)).finish()
    }
}
