//! Capability interface for hosts that draw game state.

use crate::{Coord, PlayerId};

pub trait Renderable {
    /// (rows, cols)
    fn dimensions(&self) -> (u8, u8);

    fn cell_owner(&self, at: Coord) -> Option<PlayerId>;

    /// Text grid, '.' for empty cells and the owner digit otherwise.
    fn render_rows(&self) -> Vec<String> {
        let (rows, cols) = self.dimensions();
        (0..rows as i16)
            .map(|row| {
                (0..cols as i16)
                    .map(|col| match self.cell_owner(Coord::new(row, col)) {
                        Some(p) => char::from(b'0' + p.0),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}
