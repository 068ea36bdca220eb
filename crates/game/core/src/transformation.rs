use crate::combat::CombatOutcome;
use crate::input::InputType;
use crate::tile::{Color, Tile, TileCoord};

/// One tile's journey. Removed tiles start and end in place; generated
/// tiles start off the top of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileTransformation {
    pub initial: TileCoord,
    pub end: TileCoord,
}

impl TileTransformation {
    pub const fn new(initial: TileCoord, end: TileCoord) -> Self {
        Self { initial, end }
    }

    pub const fn in_place(coord: TileCoord) -> Self {
        Self::new(coord, coord)
    }
}

/// The rock group a touch removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchedGroup {
    pub color: Color,
    pub size: usize,
}

/// Everything a single board input changed, in render order.
///
/// `shift_down` lists every existing tile that fell followed by every
/// generated tile; `new_tiles` repeats the generated ones on their own.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transformation {
    pub input: InputType,
    pub removed: Vec<TileTransformation>,
    pub shift_down: Vec<TileTransformation>,
    pub new_tiles: Vec<TileTransformation>,
    /// Relocations outside gravity: rotations, swaps, stepping onto the exit.
    pub moved: Vec<TileTransformation>,
    pub matched: Option<MatchedGroup>,
    pub pillars_damaged: Vec<TileCoord>,
    pub pillars_destroyed: usize,
    pub combat: Vec<CombatOutcome>,
    pub end_tiles: Vec<Vec<Tile>>,
}

impl Transformation {
    pub fn new(input: InputType, end_tiles: Vec<Vec<Tile>>) -> Self {
        Self {
            input,
            removed: Vec::new(),
            shift_down: Vec::new(),
            new_tiles: Vec::new(),
            moved: Vec::new(),
            matched: None,
            pillars_damaged: Vec::new(),
            pillars_destroyed: 0,
            combat: Vec::new(),
            end_tiles,
        }
    }

    /// True when any tile changed position or left the board.
    pub fn has_tile_changes(&self) -> bool {
        !(self.removed.is_empty() && self.shift_down.is_empty() && self.moved.is_empty())
    }
}
