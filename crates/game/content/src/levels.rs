//! The built-in campaign.
//!
//! Seven depths of growing boards and nastier monster mixes, plus tutorial
//! boards. Choices that vary between runs (pillar colors, which goals are
//! offered, the color a rock goal asks for) are drawn from the run seed, so
//! a seed always yields the same campaign.

use downfall_core::config::GameConfig;
use downfall_core::entity::{EffectModel, EntityKind, RuneKind, StoreOffer};
use downfall_core::env::{
    Difficulty, LevelConfig, MonsterRatio, PillarPlacement, RollContext, RunRng, TileSource,
    WeightedRock, compute_seed, monster_ratios,
};
use downfall_core::goals::{GoalTarget, LevelGoal};
use downfall_core::tile::{Color, Item, PillarData, TileCoord};

const BOARD_SIZES: [usize; 7] = [7, 8, 9, 9, 10, 11, 11];
const MAX_MONSTER_RATIOS: [u32; 7] = [5, 8, 8, 10, 10, 12, 15];
const STARTING_MONSTERS: [usize; 7] = [2, 3, 6, 6, 7, 8, 8];
const MAX_SPAWN_GEMS: [u32; 7] = [3, 3, 3, 4, 4, 5, 5];
const MONSTER_CHANCE: u32 = 10;
const TUTORIAL_BOARD_SIZE: usize = 4;

/// Deterministic campaign for one difficulty and seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardLevels {
    difficulty: Difficulty,
    seed: u64,
}

impl StandardLevels {
    pub const DEPTHS: u32 = BOARD_SIZES.len() as u32;

    pub const fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self { difficulty, seed }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.difficulty, config.default_seed)
    }

    pub fn campaign(&self) -> Vec<LevelConfig> {
        (0..Self::DEPTHS).filter_map(|depth| self.level(depth)).collect()
    }

    /// The level at `depth` (0-based), or `None` past the last depth.
    pub fn level(&self, depth: u32) -> Option<LevelConfig> {
        let idx = depth as usize;
        let size = *BOARD_SIZES.get(idx)?;
        let mut rng = RunRng::new(compute_seed(self.seed, u64::from(depth), RollContext::Setup));

        let mut level = LevelConfig::new(size)
            .with_tiles(rocks(depth))
            .with_monsters(monsters(depth), MAX_MONSTER_RATIOS[idx], MONSTER_CHANCE)
            .with_pillars(pillars(depth, size, &mut rng))
            .with_goals(goals(depth, &mut rng), LevelConfig::DEFAULT_GOALS_TO_UNLOCK_EXIT)
            .with_max_turns(turn_limit(depth, self.difficulty));
        level.depth = depth;
        level.difficulty = self.difficulty;
        level.starting_monsters = STARTING_MONSTERS[idx];
        level.max_spawn_gems = MAX_SPAWN_GEMS[idx];
        level.gem_chance = LevelConfig::DEFAULT_GEM_CHANCE;
        level.store_offers = store_offers(depth);
        level.gold_multiplier = self.difficulty.gold_multiplier();
        Some(level)
    }

    /// A small monster-free board with nothing to unlock.
    pub fn tutorial(&self) -> LevelConfig {
        let mut level = LevelConfig::new(TUTORIAL_BOARD_SIZE);
        level.difficulty = self.difficulty;
        level.tutorial = true;
        level
    }
}

fn rocks(depth: u32) -> TileSource {
    let weighted = |weights: &[(Color, u32)]| {
        TileSource::Weighted(
            weights
                .iter()
                .map(|&(color, weight)| WeightedRock { color, weight })
                .collect(),
        )
    };
    match depth {
        0..=3 => TileSource::default(),
        4 => weighted(&[(Color::Red, 30), (Color::Blue, 30), (Color::Purple, 30), (Color::Brown, 10)]),
        5 => weighted(&[(Color::Red, 28), (Color::Blue, 28), (Color::Purple, 28), (Color::Brown, 15)]),
        _ => TileSource::Uniform(vec![Color::Red, Color::Blue, Color::Purple, Color::Brown]),
    }
}

fn monsters(depth: u32) -> Vec<MonsterRatio> {
    use EntityKind::{Alamo, Bat, Dragon, Rat, Sally};
    match depth {
        0 | 1 => monster_ratios(&[(Rat, 40), (Alamo, 40), (Bat, 20)]),
        2 => monster_ratios(&[(Rat, 30), (Alamo, 30), (Dragon, 25), (Bat, 15)]),
        3 | 4 => monster_ratios(&[(Alamo, 30), (Dragon, 30), (Bat, 20), (Sally, 20)]),
        _ => monster_ratios(&[(Alamo, 25), (Dragon, 25), (Bat, 20), (Sally, 30)]),
    }
}

fn pick<T: Copy>(rng: &mut RunRng, options: &[T]) -> Option<T> {
    let idx = rng.index(RollContext::Setup, options.len())?;
    options.get(idx).copied()
}

fn pillar(rng: &mut RunRng, excluded: &[Color]) -> PillarData {
    let colors: Vec<Color> = [Color::Blue, Color::Red, Color::Purple, Color::Brown, Color::Green]
        .into_iter()
        .filter(|color| !excluded.contains(color))
        .collect();
    PillarData {
        color: pick(rng, &colors).unwrap_or(Color::Blue),
        health: GameConfig::DEFAULT_PILLAR_HEALTH,
    }
}

fn pillars(depth: u32, size: usize, rng: &mut RunRng) -> Vec<PillarPlacement> {
    let n = size as i32;
    let at = |row: i32, col: i32, pillar: PillarData| PillarPlacement {
        coord: TileCoord::new(row, col),
        pillar,
    };
    match depth {
        0 => Vec::new(),
        1 => {
            let excluded = [Color::Purple, Color::Brown, Color::Green];
            vec![
                at(n / 2, n / 2, pillar(rng, &excluded)),
                at(n / 2 - 1, n / 2 - 1, pillar(rng, &excluded)),
            ]
        }
        2 => {
            let excluded = [Color::Brown, Color::Green];
            vec![
                at(2, 2, pillar(rng, &excluded)),
                at(n - 3, n - 3, pillar(rng, &excluded)),
            ]
        }
        3 => {
            let wall = pillar(rng, &[Color::Brown, Color::Green]);
            (n - 6..=n - 4).map(|col| at(4, col, wall)).collect()
        }
        4 => {
            let excluded = [Color::Brown, Color::Green];
            let low = pillar(rng, &excluded);
            let high = pillar(rng, &excluded);
            vec![
                at(0, 0, low),
                at(0, 1, low),
                at(1, 0, low),
                at(n - 1, n - 2, high),
                at(n - 1, n - 1, high),
                at(n - 2, n - 1, high),
            ]
        }
        _ => {
            let insets: &[i32] = if depth == 5 { &[3] } else { &[2, 4] };
            let mut placements = Vec::new();
            for &inset in insets {
                let far = n - inset - 1;
                for (row, col) in [(far, inset), (far, far), (inset, far), (inset, inset)] {
                    placements.push(at(row, col, pillar(rng, &[Color::Green])));
                }
            }
            placements
        }
    }
}

fn goals(depth: u32, rng: &mut RunRng) -> Vec<LevelGoal> {
    let reward = Item::gem(1);
    let mut rock_goal = |amount: u32, minimum: usize| {
        let color = pick(rng, &[Color::Blue, Color::Purple, Color::Red]).unwrap_or(Color::Blue);
        let goal = LevelGoal::new(GoalTarget::Rock(color), amount, reward);
        if minimum > 1 { goal.in_groups_of(minimum) } else { goal }
    };
    let goal = |target, amount| LevelGoal::new(target, amount, reward);

    let candidates = match depth {
        0 => vec![goal(GoalTarget::Gem, 1), rock_goal(25, 1), goal(GoalTarget::Monster, 2)],
        1 => vec![goal(GoalTarget::Gem, 2), rock_goal(35, 1), goal(GoalTarget::Monster, 3)],
        2 => vec![
            goal(GoalTarget::Gem, 3),
            goal(GoalTarget::Pillar, 6),
            rock_goal(8, 4),
            goal(GoalTarget::Monster, 5),
        ],
        3 => vec![
            goal(GoalTarget::Gem, 4),
            rock_goal(10, 4),
            goal(GoalTarget::Monster, 7),
            goal(GoalTarget::Pillar, 9),
            goal(GoalTarget::RuneUse, 2),
        ],
        4 => vec![
            goal(GoalTarget::RuneUse, 3),
            rock_goal(8, 5),
            goal(GoalTarget::Monster, 10),
            goal(GoalTarget::Pillar, 12),
            goal(GoalTarget::Gem, 4),
        ],
        5 => vec![
            rock_goal(5, 6),
            goal(GoalTarget::Gem, 5),
            goal(GoalTarget::Monster, 12),
            goal(GoalTarget::Pillar, 12),
            goal(GoalTarget::RuneUse, 4),
        ],
        _ => vec![
            rock_goal(8, 5),
            goal(GoalTarget::Gem, 5),
            goal(GoalTarget::Monster, 15),
            goal(GoalTarget::Pillar, 24),
            goal(GoalTarget::RuneUse, 5),
        ],
    };
    let keep = if depth < 2 { 2 } else { 3 };
    choose(candidates, keep, rng)
}

/// `count` distinct entries, in draw order.
fn choose<T>(mut pool: Vec<T>, count: usize, rng: &mut RunRng) -> Vec<T> {
    let mut chosen = Vec::with_capacity(count);
    while chosen.len() < count {
        let Some(idx) = rng.index(RollContext::Setup, pool.len()) else {
            break;
        };
        chosen.push(pool.swap_remove(idx));
    }
    chosen
}

fn turn_limit(depth: u32, difficulty: Difficulty) -> u32 {
    match (depth, difficulty) {
        (0, Difficulty::Easy) => 50,
        (0, Difficulty::Normal) => 45,
        (0, Difficulty::Hard) => 40,
        (1, Difficulty::Easy) => 60,
        (1, Difficulty::Normal) => 50,
        (1, Difficulty::Hard) => 45,
        (2, Difficulty::Easy) => 70,
        (2, Difficulty::Normal) => 55,
        (2, Difficulty::Hard) => 50,
        _ => 0,
    }
}

fn offer(effect: EffectModel, tier: u8) -> StoreOffer {
    let cost = match tier {
        1 => 3,
        2 => 5,
        _ => 8,
    };
    StoreOffer::new(effect, tier, cost)
}

fn store_offers(depth: u32) -> Vec<StoreOffer> {
    let runes = |tier| {
        [RuneKind::GetSwifty, RuneKind::RainEmbers, RuneKind::TransformRock]
            .map(|rune| offer(EffectModel::Rune(rune), tier))
    };
    if depth == 0 {
        return runes(1).to_vec();
    }

    let mut offers = vec![
        offer(EffectModel::FullHeal, 1),
        offer(EffectModel::PlusTwoMaxHealth, 1),
        offer(EffectModel::Dodge(5), 2),
        offer(EffectModel::Luck(5), 2),
        offer(EffectModel::Gems(3), 2),
    ];
    match depth {
        3 => offers.extend([offer(EffectModel::RuneSlot, 3), offer(EffectModel::Gems(5), 3)]),
        4 => offers.extend(runes(3)),
        5 => offers.extend([offer(EffectModel::RuneSlot, 3), offer(EffectModel::Gems(10), 3)]),
        6 => {
            offers.extend(runes(3));
            offers.push(offer(EffectModel::Gems(10), 3));
        }
        _ => {}
    }
    offers
}
