//! Level objectives and their progress.
//!
//! Goals advance only by observing transformations. Completed goals pay out
//! one reward per check, and the exit unlocks once after enough goals are
//! complete.

use crate::input::InputType;
use crate::tile::{Color, Item, ItemKind};
use crate::transformation::Transformation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalTarget {
    Rock(Color),
    Gem,
    Monster,
    Pillar,
    RuneUse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelGoal {
    pub target: GoalTarget,
    pub amount: u32,
    /// Only meaningful when `grouped` is set.
    pub minimum_group_size: usize,
    pub grouped: bool,
    pub reward: Item,
}

impl LevelGoal {
    pub const fn new(target: GoalTarget, amount: u32, reward: Item) -> Self {
        Self {
            target,
            amount,
            minimum_group_size: 0,
            grouped: false,
            reward,
        }
    }

    /// Only groups of at least `minimum` tiles count.
    #[must_use]
    pub const fn in_groups_of(mut self, minimum: usize) -> Self {
        self.minimum_group_size = minimum;
        self.grouped = true;
        self
    }

    /// Progress this transformation contributes.
    pub fn progress_from(&self, transformation: &Transformation) -> u32 {
        match (self.target, &transformation.input) {
            (GoalTarget::Rock(color), InputType::Touch { .. }) => transformation
                .matched
                .filter(|group| group.color == color)
                .filter(|group| !self.grouped || group.size >= self.minimum_group_size)
                .map_or(0, |group| group.size as u32),
            (GoalTarget::Monster, InputType::MonsterDies { .. }) => 1,
            (GoalTarget::Gem, InputType::CollectItem { item, .. }) if item.kind == ItemKind::Gem => {
                item.amount
            }
            (GoalTarget::Pillar, _) => transformation.pillars_destroyed as u32,
            (GoalTarget::RuneUse, InputType::RuneUsed { .. }) => 1,
            _ => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalTracking {
    pub goal: LevelGoal,
    pub current: u32,
    pub has_been_rewarded: bool,
}

impl GoalTracking {
    pub const fn new(goal: LevelGoal) -> Self {
        Self {
            goal,
            current: 0,
            has_been_rewarded: false,
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.current >= self.goal.amount
    }

    pub const fn remaining(&self) -> u32 {
        self.goal.amount.saturating_sub(self.current)
    }

    fn observe(&mut self, transformation: &Transformation) {
        if self.is_complete() {
            return;
        }
        let gained = self.goal.progress_from(transformation);
        self.current = self.current.saturating_add(gained).min(self.goal.amount);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelGoalTracker {
    tracking: Vec<GoalTracking>,
    goals_needed: usize,
    exit_unlocked: bool,
}

impl LevelGoalTracker {
    pub fn new(goals: &[LevelGoal], goals_needed: usize) -> Self {
        Self {
            tracking: goals.iter().copied().map(GoalTracking::new).collect(),
            goals_needed,
            exit_unlocked: false,
        }
    }

    pub fn tracking(&self) -> &[GoalTracking] {
        &self.tracking
    }

    pub const fn goals_needed(&self) -> usize {
        self.goals_needed
    }

    pub const fn is_exit_unlocked(&self) -> bool {
        self.exit_unlocked
    }

    pub fn completed(&self) -> usize {
        self.tracking.iter().filter(|goal| goal.is_complete()).count()
    }

    pub fn observe(&mut self, transformation: &Transformation) {
        for goal in &mut self.tracking {
            goal.observe(transformation);
        }
    }

    /// Next payout, if any: one `PlayerAwarded` per call, then a single
    /// `UnlockExit` once enough goals are complete.
    pub fn check_for_completed_goals(&mut self) -> Option<InputType> {
        if let Some(goal) = self
            .tracking
            .iter_mut()
            .find(|goal| goal.is_complete() && !goal.has_been_rewarded)
        {
            goal.has_been_rewarded = true;
            return Some(InputType::PlayerAwarded {
                reward: goal.goal.reward,
            });
        }

        if !self.exit_unlocked && self.goals_needed > 0 && self.completed() >= self.goals_needed {
            self.exit_unlocked = true;
            return Some(InputType::UnlockExit);
        }
        None
    }
}
