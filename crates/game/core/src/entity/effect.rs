use crate::entity::RuneKind;
use crate::tile::ItemKind;

/// Lasting modification bought between levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectModel {
    FullHeal,
    PlusTwoMaxHealth,
    Dodge(u8),
    Luck(u8),
    Gems(u32),
    RuneSlot,
    Rune(RuneKind),
}

/// An effect on sale, with its tier and price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreOffer {
    pub effect: EffectModel,
    pub tier: u8,
    pub cost: u32,
    pub currency: ItemKind,
}

impl StoreOffer {
    pub const fn new(effect: EffectModel, tier: u8, cost: u32) -> Self {
        Self {
            effect,
            tier,
            cost,
            currency: ItemKind::Gem,
        }
    }
}
