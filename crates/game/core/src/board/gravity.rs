use crate::tile::{Tile, TileCoord, TileType};
use crate::transformation::TileTransformation;

use super::Board;

/// Tile movements produced by one removal pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Settled {
    pub removed: Vec<TileTransformation>,
    /// Existing tiles that fell, then every generated tile.
    pub shift_down: Vec<TileTransformation>,
    pub new_tiles: Vec<TileTransformation>,
}

impl Board {
    /// Empties `removed`, lets the remaining tiles fall and fills the gaps
    /// with generated tiles.
    ///
    /// Columns are walked bottom to top with a running empty count; a pillar
    /// seals the segment below it and restarts the count. Each segment's
    /// trailing empties are refilled in place: the `i`-th new tile of a
    /// segment whose top is `top` (the pillar row, or N) starts at
    /// `top + i` and ends at `top - shift + i`.
    pub(crate) fn remove_and_refill(&mut self, removed: &[TileCoord]) -> Settled {
        let mut settled = Settled::default();
        for &coord in removed {
            if let Some(tile) = self.tile_mut(coord) {
                *tile = Tile::empty();
                settled.removed.push(TileTransformation::in_place(coord));
            }
        }

        let size = self.size;
        let mut shifts = Vec::new();
        // (column, segment top, empties in segment)
        let mut openings: Vec<(usize, usize, usize)> = Vec::new();

        for col in 0..size {
            let mut shift = 0;
            for row in 0..size {
                match self.tiles[row][col].tile_type {
                    TileType::Pillar(_) => {
                        if shift > 0 {
                            openings.push((col, row, shift));
                        }
                        shift = 0;
                    }
                    TileType::Empty => shift += 1,
                    _ if shift > 0 => {
                        let tile = core::mem::take(&mut self.tiles[row][col]);
                        self.tiles[row - shift][col] = tile;
                        shifts.push(TileTransformation::new(
                            TileCoord::new(row as i32, col as i32),
                            TileCoord::new((row - shift) as i32, col as i32),
                        ));
                    }
                    _ => {}
                }
            }
            if shift > 0 {
                openings.push((col, size, shift));
            }
        }

        let needed: usize = openings.iter().map(|&(_, _, shift)| shift).sum();
        let ctx = self.generation_context();
        let mut fresh = self
            .generator
            .tiles(&ctx, needed, &mut self.rng)
            .into_iter();

        settled.shift_down = shifts;
        for (col, top, shift) in openings {
            for i in 0..shift {
                let end_row = top - shift + i;
                let tile_type = fresh.next().unwrap_or_default();
                self.tiles[end_row][col] = Tile::new(tile_type);
                let movement = TileTransformation::new(
                    TileCoord::new((top + i) as i32, col as i32),
                    TileCoord::new(end_row as i32, col as i32),
                );
                settled.new_tiles.push(movement);
                settled.shift_down.push(movement);
            }
        }

        self.refresh_markers();
        settled
    }
}
