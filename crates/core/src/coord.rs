//! grid coordinates - (row, col), row 0 is the top edge

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub row: i16,
    pub col: i16,
}

impl Coord {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Edge-adjacent cells (up, left, right, down).
    pub fn neighbors(self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col),
            Coord::new(self.row, self.col - 1),
            Coord::new(self.row, self.col + 1),
            Coord::new(self.row + 1, self.col),
        ]
    }

    /// Diagonally adjacent cells.
    pub fn diagonals(self) -> [Coord; 4] {
        [
            Coord::new(self.row - 1, self.col - 1),
            Coord::new(self.row - 1, self.col + 1),
            Coord::new(self.row + 1, self.col - 1),
            Coord::new(self.row + 1, self.col + 1),
        ]
    }

    pub fn is_neighbor(self, other: Coord) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }

    pub fn is_diagonal(self, other: Coord) -> bool {
        (self.row - other.row).abs() == 1 && (self.col - other.col).abs() == 1
    }

    /// `self + rhs`, or None if either component leaves the `i16` range.
    pub fn checked_add(self, rhs: Coord) -> Option<Coord> {
        Some(Coord::new(
            self.row.checked_add(rhs.row)?,
            self.col.checked_add(rhs.col)?,
        ))
    }

    /// Rotate a quarter turn clockwise about the origin.
    pub fn rotate_cw(self) -> Self {
        Coord::new(self.col, -self.row)
    }

    /// Mirror across the vertical axis.
    pub fn mirror(self) -> Self {
        Coord::new(self.row, -self.col)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl From<(i16, i16)> for Coord {
    fn from((row, col): (i16, i16)) -> Self {
        Coord::new(row, col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
