//! Tile and coordinate model.
//!
//! A [`Tile`] is a [`TileType`] plus transient UI flags. Rocks are the only
//! tiles that can be matched; pillars are immovable barriers; players and
//! monsters carry their full [`EntityState`].

mod coord;

pub use coord::{Direction, TileCoord};

use bitflags::bitflags;
use strum::EnumIter;

use crate::entity::{EntityKind, EntityState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Blue,
    Red,
    Purple,
    Brown,
    Green,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Gold,
    Gem,
}

/// A collectible resting on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    pub amount: u32,
}

impl Item {
    pub const fn gold(amount: u32) -> Self {
        Self {
            kind: ItemKind::Gold,
            amount,
        }
    }

    pub const fn gem(amount: u32) -> Self {
        Self {
            kind: ItemKind::Gem,
            amount,
        }
    }
}

/// Immovable, damageable barrier. Completed groups of the same color next to
/// a pillar chip one point of health off it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PillarData {
    pub color: Color,
    pub health: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileType {
    #[default]
    Empty,
    Rock {
        color: Color,
    },
    Pillar(PillarData),
    Player(EntityState),
    Monster(EntityState),
    Item(Item),
    Exit {
        blocked: bool,
    },
}

impl TileType {
    pub const fn rock(color: Color) -> Self {
        Self::Rock { color }
    }

    pub const fn pillar(color: Color, health: u8) -> Self {
        Self::Pillar(PillarData { color, health })
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_rock(&self) -> bool {
        matches!(self, Self::Rock { .. })
    }

    pub const fn is_pillar(&self) -> bool {
        matches!(self, Self::Pillar(_))
    }

    pub const fn is_monster(&self) -> bool {
        matches!(self, Self::Monster(_))
    }

    pub const fn is_player(&self) -> bool {
        matches!(self, Self::Player(_))
    }

    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }

    pub const fn rock_color(&self) -> Option<Color> {
        match self {
            Self::Rock { color } => Some(*color),
            _ => None,
        }
    }

    pub const fn entity(&self) -> Option<&EntityState> {
        match self {
            Self::Player(entity) | Self::Monster(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.entity().map(|entity| entity.kind)
    }

    /// Coarse comparison used for targeting and goal matching: rocks compare
    /// by color, entities by kind, everything else by variant.
    pub fn same_kind(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rock { color: a }, Self::Rock { color: b }) => a == b,
            (Self::Pillar(a), Self::Pillar(b)) => a.color == b.color,
            (Self::Player(a), Self::Player(b)) | (Self::Monster(a), Self::Monster(b)) => {
                a.kind == b.kind
            }
            (Self::Item(a), Self::Item(b)) => a.kind == b.kind,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

bitflags! {
    /// Transient presentation marks. Cleared at the start of every board input.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        const HIGHLIGHTED    = 1 << 0;
        const TARGETED       = 1 << 1;
        const ATTACK_PENDING = 1 << 2;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub tile_type: TileType,
    pub flags: TileFlags,
}

impl Tile {
    pub const fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            flags: TileFlags::empty(),
        }
    }

    pub const fn empty() -> Self {
        Self::new(TileType::Empty)
    }

    pub const fn rock(color: Color) -> Self {
        Self::new(TileType::rock(color))
    }

    pub const fn exit() -> Self {
        Self::new(TileType::Exit { blocked: false })
    }
}

impl From<TileType> for Tile {
    fn from(tile_type: TileType) -> Self {
        Self::new(tile_type)
    }
}
