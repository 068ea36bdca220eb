//! Purchasable abilities and their centralised rules table.
//!
//! Every behavior an ability has (price, healing, targeting, extra attacks,
//! directional shielding) is answered by [`AbilityKind::rules`]; the board
//! dispatches on the kind and never hard-codes numbers.

use strum::EnumIter;

use crate::tile::{Direction, ItemKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    LesserHealingPotion,
    GreaterHealingPotion,
    GreatestHealingPotion,
    Dynamite,
    RockASwap,
    TransmogrificationPotion,
    KillMonsterPotion,
    MassMinePickaxe,
    Helmet,
    DoubleAttack,
}

/// Healing applied by a consumable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heal {
    Amount(i32),
    Full,
}

/// What a targeted ability may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityTarget {
    Rock,
    Monster,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityRules {
    pub cost: u32,
    pub currency: ItemKind,
    pub heal: Option<Heal>,
    /// Number of board coordinates the ability must be aimed at.
    pub target_count: usize,
    pub target: Option<AbilityTarget>,
    pub extra_attacks: u32,
    /// Damage blocked from a direction while the ability is held.
    pub shield: Option<(Direction, i32)>,
    /// Passive abilities are never consumed by use.
    pub consumable: bool,
}

impl AbilityRules {
    const fn consumable(cost: u32, currency: ItemKind) -> Self {
        Self {
            cost,
            currency,
            heal: None,
            target_count: 0,
            target: None,
            extra_attacks: 0,
            shield: None,
            consumable: true,
        }
    }

    const fn passive(cost: u32, currency: ItemKind) -> Self {
        Self {
            consumable: false,
            ..Self::consumable(cost, currency)
        }
    }

    const fn heals(mut self, heal: Heal) -> Self {
        self.heal = Some(heal);
        self
    }

    const fn targets(mut self, count: usize, target: AbilityTarget) -> Self {
        self.target_count = count;
        self.target = Some(target);
        self
    }
}

impl AbilityKind {
    pub const fn rules(self) -> AbilityRules {
        use AbilityRules as R;
        match self {
            Self::LesserHealingPotion => R::consumable(35, ItemKind::Gold).heals(Heal::Amount(1)),
            Self::GreaterHealingPotion => R::consumable(60, ItemKind::Gold).heals(Heal::Amount(2)),
            Self::GreatestHealingPotion => R::consumable(2, ItemKind::Gem).heals(Heal::Full),
            Self::Dynamite => R::consumable(58, ItemKind::Gold).targets(1, AbilityTarget::Rock),
            Self::RockASwap => R::consumable(45, ItemKind::Gold).targets(2, AbilityTarget::Rock),
            Self::TransmogrificationPotion => {
                R::consumable(70, ItemKind::Gold).targets(1, AbilityTarget::Monster)
            }
            Self::KillMonsterPotion => R::consumable(3, ItemKind::Gem).targets(1, AbilityTarget::Monster),
            Self::MassMinePickaxe => R::consumable(4, ItemKind::Gem).targets(1, AbilityTarget::Rock),
            Self::Helmet => {
                let mut rules = R::passive(40, ItemKind::Gold);
                rules.shield = Some((Direction::North, 1));
                rules
            }
            Self::DoubleAttack => {
                let mut rules = R::passive(5, ItemKind::Gem);
                rules.extra_attacks = 1;
                rules
            }
        }
    }

    pub const fn cost(self) -> u32 {
        self.rules().cost
    }

    /// Damage this ability absorbs from an attack arriving from `from`.
    pub const fn blocks_damage(self, from: Direction) -> i32 {
        match self.rules().shield {
            Some((direction, amount)) if direction as u8 == from as u8 => amount,
            _ => 0,
        }
    }
}

/// A held ability and how many uses remain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityStack {
    pub kind: AbilityKind,
    pub count: u32,
}
