use crate::tile::ItemKind;

/// Currency an entity carries. Gold and gems are the only currencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarryModel {
    pub gold: u32,
    pub gems: u32,
}

impl CarryModel {
    pub const fn new(gold: u32, gems: u32) -> Self {
        Self { gold, gems }
    }

    pub const fn total(&self, currency: ItemKind) -> u32 {
        match currency {
            ItemKind::Gold => self.gold,
            ItemKind::Gem => self.gems,
        }
    }

    #[must_use]
    pub const fn earn(&self, amount: u32, currency: ItemKind) -> Self {
        match currency {
            ItemKind::Gold => Self::new(self.gold.saturating_add(amount), self.gems),
            ItemKind::Gem => Self::new(self.gold, self.gems.saturating_add(amount)),
        }
    }

    /// Spends `amount`; `None` when the balance is insufficient.
    pub const fn pay(&self, amount: u32, currency: ItemKind) -> Option<Self> {
        match currency {
            ItemKind::Gold => match self.gold.checked_sub(amount) {
                Some(gold) => Some(Self::new(gold, self.gems)),
                None => None,
            },
            ItemKind::Gem => match self.gems.checked_sub(amount) {
                Some(gems) => Some(Self::new(self.gold, gems)),
                None => None,
            },
        }
    }
}
