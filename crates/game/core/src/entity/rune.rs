use arrayvec::ArrayVec;
use strum::EnumIter;

use crate::config::GameConfig;
use crate::tile::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuneKind {
    /// Swap the player with an orthogonal neighbor.
    GetSwifty,
    /// One point of damage to each targeted monster.
    RainEmbers,
    /// Recolor targeted rocks to the color of the first target.
    TransformRock,
}

/// A rune socketed in the pickaxe. Mining qualifying groups charges it; once
/// `progress` reaches `cooldown` it can be used, which empties the charge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rune {
    pub kind: RuneKind,
    pub cooldown: u32,
    pub recharge_minimum: usize,
    pub recharge_color: Option<Color>,
    pub target_count: usize,
    pub progress: u32,
}

impl Rune {
    pub const fn new(kind: RuneKind) -> Self {
        let (cooldown, recharge_minimum, target_count) = match kind {
            RuneKind::GetSwifty => (3, 3, 1),
            RuneKind::RainEmbers => (5, 4, 2),
            RuneKind::TransformRock => (4, 3, 3),
        };
        Self {
            kind,
            cooldown,
            recharge_minimum,
            recharge_color: None,
            target_count,
            progress: 0,
        }
    }

    pub const fn is_charged(&self) -> bool {
        self.progress >= self.cooldown
    }

    /// Records a mined group; only groups that meet the recharge rule count.
    #[must_use]
    pub fn record_group(&self, color: Color, size: usize) -> Self {
        let color_ok = self.recharge_color.is_none_or(|wanted| wanted == color);
        if !color_ok || size < self.recharge_minimum {
            return *self;
        }
        Self {
            progress: (self.progress + 1).min(self.cooldown),
            ..*self
        }
    }

    #[must_use]
    pub const fn reset(&self) -> Self {
        Self {
            progress: 0,
            ..*self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickaxe {
    pub rune_slots: usize,
    pub runes: ArrayVec<Rune, { GameConfig::MAX_RUNE_SLOTS }>,
}

impl Pickaxe {
    pub fn new(rune_slots: usize) -> Self {
        Self {
            rune_slots: rune_slots.min(GameConfig::MAX_RUNE_SLOTS),
            runes: ArrayVec::new(),
        }
    }

    pub fn rune(&self, kind: RuneKind) -> Option<&Rune> {
        self.runes.iter().find(|rune| rune.kind == kind)
    }

    /// Sockets a rune if a free slot exists.
    #[must_use]
    pub fn socket(&self, rune: Rune) -> Self {
        let mut next = self.clone();
        if next.runes.len() < next.rune_slots {
            let _ = next.runes.try_push(rune);
        }
        next
    }

    #[must_use]
    pub fn remove(&self, kind: RuneKind) -> Self {
        let mut next = self.clone();
        next.runes.retain(|rune| rune.kind != kind);
        next
    }

    #[must_use]
    pub fn add_slot(&self) -> Self {
        Self {
            rune_slots: (self.rune_slots + 1).min(GameConfig::MAX_RUNE_SLOTS),
            runes: self.runes.clone(),
        }
    }

    #[must_use]
    pub fn record_group(&self, color: Color, size: usize) -> Self {
        Self {
            rune_slots: self.rune_slots,
            runes: self
                .runes
                .iter()
                .map(|rune| rune.record_group(color, size))
                .collect(),
        }
    }

    #[must_use]
    pub fn reset(&self, kind: RuneKind) -> Self {
        Self {
            rune_slots: self.rune_slots,
            runes: self
                .runes
                .iter()
                .map(|rune| if rune.kind == kind { rune.reset() } else { *rune })
                .collect(),
        }
    }
}
