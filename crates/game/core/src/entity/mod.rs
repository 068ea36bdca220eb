//! Entity and ability model.
//!
//! [`EntityState`] is a value type: every mutator borrows `self` and returns
//! the updated entity, so the board can compute a new tile without aliasing
//! the old one.

mod ability;
mod attack;
mod carry;
mod catalog;
mod effect;
mod rune;

pub use ability::{AbilityKind, AbilityRules, AbilityStack, AbilityTarget, Heal};
pub use attack::{AttackModel, AttackRange};
pub use carry::CarryModel;
pub use catalog::EntityCatalog;
pub use effect::{EffectModel, StoreOffer};
pub use rune::{Pickaxe, Rune, RuneKind};

use strum::EnumIter;

use crate::tile::{Color, Direction, ItemKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Player,
    Rat,
    Bat,
    Dragon,
    Alamo,
    Wizard,
    LavaHorse,
    Sally,
}

impl EntityKind {
    pub const fn is_monster(self) -> bool {
        !matches!(self, Self::Player)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityState {
    pub kind: EntityKind,
    pub name: String,
    pub hp: i32,
    pub original_hp: i32,
    pub attack: AttackModel,
    pub carry: CarryModel,
    pub abilities: Vec<AbilityStack>,
    pub pickaxe: Option<Pickaxe>,
    pub effects: Vec<EffectModel>,
    /// Percent chance to avoid an incoming attack. Players only.
    pub dodge: u8,
    pub luck: u8,
}

impl EntityState {
    pub fn new(kind: EntityKind, hp: i32, attack: AttackModel) -> Self {
        Self {
            kind,
            name: kind.to_string(),
            hp,
            original_hp: hp,
            attack,
            carry: CarryModel::default(),
            abilities: Vec::new(),
            pickaxe: None,
            effects: Vec::new(),
            dodge: 0,
            luck: 0,
        }
    }

    /// A player that hits the tile directly below it.
    pub fn player(hp: i32, damage: i32) -> Self {
        let attack = AttackModel::new(damage, &[Direction::South], AttackRange::adjacent());
        Self {
            pickaxe: Some(Pickaxe::new(1)),
            ..Self::new(EntityKind::Player, hp, attack)
        }
    }

    #[must_use]
    pub fn with_carry(mut self, carry: CarryModel) -> Self {
        self.carry = carry;
        self
    }

    #[must_use]
    pub fn with_ability(self, kind: AbilityKind, count: u32) -> Self {
        (0..count).fold(self, |entity, _| entity.add_ability(kind))
    }

    pub const fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player)
    }

    pub const fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    // ===== combat =====

    /// Attacks granted per turn, including ability bonuses.
    pub fn attack_budget(&self) -> u32 {
        let bonus: u32 = self
            .abilities
            .iter()
            .map(|stack| stack.kind.rules().extra_attacks)
            .sum();
        self.attack.attacks_per_turn + bonus
    }

    pub fn can_attack(&self) -> bool {
        self.attack.is_charged() && self.attack_budget() > self.attack.attacks_this_turn
    }

    pub fn blocks_damage(&self, from: Direction) -> i32 {
        self.abilities
            .iter()
            .map(|stack| stack.kind.blocks_damage(from))
            .sum()
    }

    /// Applies an incoming hit. Shielding may absorb it entirely; hp may go
    /// negative.
    #[must_use]
    pub fn was_attacked(&self, damage: i32, from: Direction) -> Self {
        let taken = (damage - self.blocks_damage(from)).max(0);
        Self {
            hp: self.hp - taken,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn did_attack(&self) -> Self {
        Self {
            attack: self.attack.did_attack(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn reset_attacks(&self) -> Self {
        Self {
            attack: self.attack.reset_attack(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn increment_attack_turns(&self) -> Self {
        Self {
            attack: self.attack.increment_turns(),
            ..self.clone()
        }
    }

    // ===== health =====

    #[must_use]
    pub fn heal(&self, amount: i32) -> Self {
        Self {
            hp: (self.hp + amount).min(self.original_hp),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn revive(&self) -> Self {
        Self {
            hp: self.original_hp,
            ..self.clone()
        }
    }

    // ===== abilities =====

    pub fn ability_count(&self, kind: AbilityKind) -> u32 {
        self.abilities
            .iter()
            .find(|stack| stack.kind == kind)
            .map_or(0, |stack| stack.count)
    }

    #[must_use]
    pub fn add_ability(&self, kind: AbilityKind) -> Self {
        let mut next = self.clone();
        match next.abilities.iter_mut().find(|stack| stack.kind == kind) {
            Some(stack) => stack.count += 1,
            None => next.abilities.push(AbilityStack { kind, count: 1 }),
        }
        next
    }

    /// Drops the whole stack of `kind`.
    #[must_use]
    pub fn remove_ability(&self, kind: AbilityKind) -> Self {
        let mut next = self.clone();
        next.abilities.retain(|stack| stack.kind != kind);
        next
    }

    /// Consumes one use of a consumable ability; passives stay.
    #[must_use]
    pub fn use_ability(&self, kind: AbilityKind) -> Self {
        if !kind.rules().consumable {
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(stack) = next.abilities.iter_mut().find(|stack| stack.kind == kind) {
            stack.count = stack.count.saturating_sub(1);
        }
        next.abilities.retain(|stack| stack.count > 0);
        next
    }

    // ===== store =====

    pub fn can_afford(&self, cost: u32, currency: ItemKind) -> bool {
        self.carry.total(currency) >= cost
    }

    #[must_use]
    pub fn earn(&self, amount: u32, currency: ItemKind) -> Self {
        Self {
            carry: self.carry.earn(amount, currency),
            ..self.clone()
        }
    }

    pub fn pay(&self, amount: u32, currency: ItemKind) -> Option<Self> {
        let carry = self.carry.pay(amount, currency)?;
        Some(Self {
            carry,
            ..self.clone()
        })
    }

    /// Pays for and adds one ability; `None` if it is unaffordable.
    pub fn buy_ability(&self, kind: AbilityKind) -> Option<Self> {
        let rules = kind.rules();
        Some(self.pay(rules.cost, rules.currency)?.add_ability(kind))
    }

    /// Sells one use of an ability back for its price.
    pub fn sell_ability(&self, kind: AbilityKind) -> Option<Self> {
        if self.ability_count(kind) == 0 {
            return None;
        }
        let rules = kind.rules();
        let mut next = self.earn(rules.cost, rules.currency);
        if let Some(stack) = next.abilities.iter_mut().find(|stack| stack.kind == kind) {
            stack.count -= 1;
        }
        next.abilities.retain(|stack| stack.count > 0);
        Some(next)
    }

    /// Pays for a store offer and applies its effect.
    pub fn buy(&self, offer: &StoreOffer) -> Option<Self> {
        Some(self.pay(offer.cost, offer.currency)?.apply_effect(offer.effect))
    }

    #[must_use]
    pub fn apply_effect(&self, effect: EffectModel) -> Self {
        let mut next = self.clone();
        match effect {
            EffectModel::FullHeal => next.hp = next.original_hp,
            EffectModel::PlusTwoMaxHealth => {
                next.original_hp += 2;
                next.hp += 2;
            }
            EffectModel::Dodge(amount) => next.dodge = next.dodge.saturating_add(amount).min(100),
            EffectModel::Luck(amount) => next.luck = next.luck.saturating_add(amount).min(100),
            EffectModel::Gems(amount) => next.carry = next.carry.earn(amount, ItemKind::Gem),
            EffectModel::RuneSlot => {
                next.pickaxe = Some(next.pickaxe.take().unwrap_or_else(|| Pickaxe::new(0)).add_slot());
            }
            EffectModel::Rune(kind) => {
                let pickaxe = next.pickaxe.take().unwrap_or_else(|| Pickaxe::new(1));
                next.pickaxe = Some(pickaxe.socket(Rune::new(kind)));
            }
        }
        next.effects.push(effect);
        next
    }

    // ===== runes =====

    pub fn rune(&self, kind: RuneKind) -> Option<&Rune> {
        self.pickaxe.as_ref().and_then(|pickaxe| pickaxe.rune(kind))
    }

    #[must_use]
    pub fn progress_runes(&self, color: Color, group_size: usize) -> Self {
        Self {
            pickaxe: self
                .pickaxe
                .as_ref()
                .map(|pickaxe| pickaxe.record_group(color, group_size)),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn reset_rune(&self, kind: RuneKind) -> Self {
        Self {
            pickaxe: self.pickaxe.as_ref().map(|pickaxe| pickaxe.reset(kind)),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_is_capped_at_original_hp() {
        let player = EntityState::player(5, 1).was_attacked(3, Direction::South);
        assert_eq!(player.hp, 2);
        assert_eq!(player.heal(10).hp, 5);
        assert_eq!(player.heal(1).hp, 3);
    }

    #[test]
    fn hp_can_go_negative() {
        let player = EntityState::player(1, 1).was_attacked(3, Direction::East);
        assert_eq!(player.hp, -2);
        assert!(player.is_dead());
        assert_eq!(player.revive().hp, 1);
    }

    #[test]
    fn helmet_absorbs_attacks_from_above() {
        let player = EntityState::player(3, 1).add_ability(AbilityKind::Helmet);
        assert_eq!(player.was_attacked(1, Direction::North).hp, 3);
        assert_eq!(player.was_attacked(2, Direction::North).hp, 2);
        assert_eq!(player.was_attacked(1, Direction::West).hp, 2);
    }

    #[test]
    fn attack_budget_includes_bonus() {
        let player = EntityState::player(3, 1);
        assert!(player.can_attack());
        let player = player.did_attack();
        assert!(!player.can_attack());
        let player = player.add_ability(AbilityKind::DoubleAttack);
        assert!(player.can_attack());
        assert!(!player.did_attack().can_attack());
        assert!(player.reset_attacks().can_attack());
    }

    #[test]
    fn abilities_stack_and_consume() {
        let player = EntityState::player(3, 1)
            .add_ability(AbilityKind::Dynamite)
            .add_ability(AbilityKind::Dynamite);
        assert_eq!(player.ability_count(AbilityKind::Dynamite), 2);
        let player = player.use_ability(AbilityKind::Dynamite);
        assert_eq!(player.ability_count(AbilityKind::Dynamite), 1);
        let player = player.use_ability(AbilityKind::Dynamite);
        assert!(player.abilities.is_empty());
    }

    #[test]
    fn passives_survive_use() {
        let player = EntityState::player(3, 1).add_ability(AbilityKind::Helmet);
        assert_eq!(player.use_ability(AbilityKind::Helmet).ability_count(AbilityKind::Helmet), 1);
        assert!(player.remove_ability(AbilityKind::Helmet).abilities.is_empty());
    }

    #[test]
    fn buying_requires_funds() {
        let player = EntityState::player(3, 1).with_carry(CarryModel::new(60, 0));
        assert!(player.can_afford(58, ItemKind::Gold));
        let bought = player.buy_ability(AbilityKind::Dynamite).expect("affordable");
        assert_eq!(bought.carry.gold, 2);
        assert!(bought.buy_ability(AbilityKind::Dynamite).is_none());
        let sold = bought.sell_ability(AbilityKind::Dynamite).expect("owned");
        assert_eq!(sold.carry.gold, 60);
        assert!(sold.sell_ability(AbilityKind::Dynamite).is_none());
    }

    #[test]
    fn store_effects_apply() {
        let player = EntityState::player(3, 1).with_carry(CarryModel::new(0, 5));
        let offer = StoreOffer::new(EffectModel::PlusTwoMaxHealth, 1, 3);
        let player = player.buy(&offer).expect("affordable");
        assert_eq!((player.hp, player.original_hp), (5, 5));
        assert_eq!(player.carry.gems, 2);
        assert!(player.buy(&offer).is_none());

        let player = player
            .apply_effect(EffectModel::RuneSlot)
            .apply_effect(EffectModel::Rune(RuneKind::GetSwifty))
            .apply_effect(EffectModel::Rune(RuneKind::RainEmbers));
        let pickaxe = player.pickaxe.as_ref().expect("pickaxe");
        assert_eq!(pickaxe.rune_slots, 2);
        assert_eq!(pickaxe.runes.len(), 2);
        assert_eq!(player.effects.len(), 4);
    }
}
