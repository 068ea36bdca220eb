use crate::tile::{Tile, TileCoord};
use crate::transformation::TileTransformation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    Left,
    Right,
}

impl Rotation {
    /// Where the tile at `coord` lands on a board of `size`.
    pub const fn map(self, coord: TileCoord, size: usize) -> TileCoord {
        let last = size as i32 - 1;
        match self {
            Self::Left => TileCoord::new(coord.col, last - coord.row),
            Self::Right => TileCoord::new(last - coord.col, coord.row),
        }
    }
}

/// Rotates a square grid a quarter turn, returning the new grid and every
/// tile's move. The input grid is left untouched.
pub fn rotate_tiles(tiles: &[Vec<Tile>], rotation: Rotation) -> (Vec<Vec<Tile>>, Vec<TileTransformation>) {
    let size = tiles.len();
    let mut rotated = vec![vec![Tile::empty(); size]; size];
    let mut moves = Vec::with_capacity(size * size);
    for (row, cols) in tiles.iter().enumerate() {
        for (col, tile) in cols.iter().enumerate() {
            let from = TileCoord::new(row as i32, col as i32);
            let to = rotation.map(from, size);
            rotated[to.row as usize][to.col as usize] = tile.clone();
            moves.push(TileTransformation::new(from, to));
        }
    }
    (rotated, moves)
}
