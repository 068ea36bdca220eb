//! Semantic inputs consumed by the board and the phase machine.
//!
//! Hosts create the player-facing variants (touches, rotations, item and rune
//! uses, pause/play); the referee, the goal tracker and the runtime create the
//! rest.

use crate::entity::{AbilityKind, EntityKind, RuneKind};
use crate::tile::{Item, TileCoord, TileType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoseReason {
    NoMoreMoves,
    PlayerDied,
    OutOfTurns,
}

#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputType {
    /// Tap on a tile. `tile_type` is what the host believed was there; a
    /// stale touch is ignored.
    Touch {
        coord: TileCoord,
        tile_type: TileType,
    },
    RotateLeft,
    RotateRight,
    Attack {
        attacker: TileCoord,
        defender: Option<TileCoord>,
    },
    AttackArea {
        attacker: TileCoord,
        targets: Vec<TileCoord>,
    },
    MonsterDies {
        coord: TileCoord,
        kind: EntityKind,
    },
    CollectItem {
        coord: TileCoord,
        item: Item,
    },
    ItemUsed {
        ability: AbilityKind,
        targets: Vec<TileCoord>,
    },
    RuneUsed {
        rune: RuneKind,
        targets: Vec<TileCoord>,
    },
    ReffingFinished {
        new_turn: bool,
    },
    /// Renderer (or the runtime in auto-settle mode) reports the last
    /// transformation has been shown.
    AnimationsFinished,
    GameWin,
    GameLose {
        reason: LoseReason,
    },
    NewTurn,
    Pause,
    Play,
    SelectLevel,
    UnlockExit,
    PlayerAwarded {
        reward: Item,
    },
}

impl InputType {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Inputs the player issues directly, as opposed to rule consequences.
    pub const fn is_player_move(&self) -> bool {
        matches!(
            self,
            Self::Touch { .. }
                | Self::RotateLeft
                | Self::RotateRight
                | Self::ItemUsed { .. }
                | Self::RuneUsed { .. }
        )
    }

    /// A touch on a monster only highlights its attack pattern. The board
    /// answers it, but play stays in the current phase.
    pub const fn is_inspection(&self) -> bool {
        matches!(
            self,
            Self::Touch {
                tile_type: TileType::Monster(_),
                ..
            }
        )
    }
}

/// Queue envelope: an input plus its position in the run's input log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Input {
    pub seq: u64,
    pub kind: InputType,
}

impl Input {
    pub const fn new(seq: u64, kind: InputType) -> Self {
        Self { seq, kind }
    }
}
