//! blokus core crate - fundamental types for the tile-placement engine.

pub mod bitset;
mod board;
mod coord;
mod piece;
mod placement;
mod player;
mod render;

pub use bitset::{CellSet, MAX_CELLS};
pub use board::{Board, BoardError, MAX_PLAYERS, MAX_SIDE};
pub use coord::Coord;
pub use piece::{
    CatalogueError, Cells, Orientation, Piece, PieceCatalogue, PieceId, PieceSet, MAX_PIECE_CELLS,
    PIECE_COUNT,
};
pub use placement::{PlacedPiece, Placement};
pub use player::{PlayerId, PlayerState};
pub use render::Renderable;
