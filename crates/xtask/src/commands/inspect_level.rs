//! Inspect a level configuration
//!
//! Loads a level from the data directory (or the standard campaign),
//! prints its settings and the board it generates for the chosen seed.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use downfall_core::env::TileSource;
use downfall_core::{Board, LevelConfig};

use crate::utils::{LevelArgs, render_board};

/// Print a level's configuration and its starting board
#[derive(Parser)]
pub struct InspectLevel {
    #[command(flatten)]
    level: LevelArgs,

    /// List the level files in the data directory and exit
    #[arg(long)]
    list: bool,
}

impl InspectLevel {
    pub fn execute(self) -> Result<()> {
        if self.list {
            let factory = self.level.factory();
            println!(
                "{} {}",
                style("Levels in").bold().cyan(),
                factory.data_dir().display()
            );
            for name in factory.level_names()? {
                println!("  {name}");
            }
            return Ok(());
        }

        let loaded = self.level.load()?;
        print_summary(&loaded.level);

        let board = Board::build(
            &loaded.level,
            loaded.catalog.clone(),
            loaded.player(),
            loaded.seed,
        )
        .context("Failed to build the level's board")?;

        println!("{}", style("Board:").bold().yellow());
        for line in render_board(&board).lines() {
            println!("  {line}");
        }
        println!();
        println!(
            "{} {}",
            style("Seed:").bold().cyan(),
            loaded.seed
        );
        println!(
            "{} {}",
            style("State root:").bold().cyan(),
            hex::encode(board.state_root())
        );
        Ok(())
    }
}

fn print_summary(level: &LevelConfig) {
    println!("{}", style("=== Level Summary ===").bold().green());
    println!();

    println!("{}", style("Layout:").bold().yellow());
    println!("  Depth: {}", level.depth);
    println!("  Size: {0}x{0}", level.board_size);
    println!("  Difficulty: {}", level.difficulty);
    match &level.tiles {
        TileSource::Uniform(colors) => println!("  Rocks: uniform over {colors:?}"),
        TileSource::Weighted(entries) => {
            let weights = entries
                .iter()
                .map(|entry| format!("{} {}", entry.color, entry.weight))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  Rocks: weighted ({weights})");
        }
    }
    println!("  Pillars: {}", level.pillars.len());
    if level.max_turns == 0 {
        println!("  Turn limit: none");
    } else {
        println!("  Turn limit: {}", level.max_turns);
    }
    println!();

    println!("{}", style("Monsters:").bold().yellow());
    println!(
        "  Density cap: {}%, spawn chance {}%, starting {}",
        level.max_monster_ratio, level.monster_chance, level.starting_monsters
    );
    for ratio in &level.monster_ratios {
        println!(
            "  {:<10} d100 {:>3}..{:<3}",
            ratio.kind.to_string(),
            ratio.range.lower,
            ratio.range.upper
        );
    }
    println!();

    println!(
        "{} ({} needed to open the exit)",
        style("Goals:").bold().yellow(),
        level.goals_to_unlock_exit
    );
    for goal in &level.goals {
        let grouping = if goal.grouped {
            format!(" in groups of {}+", goal.minimum_group_size)
        } else {
            String::new()
        };
        println!(
            "  {} x{}{} -> {} {}",
            goal.target, goal.amount, grouping, goal.reward.amount, goal.reward.kind
        );
    }
    println!();

    if !level.store_offers.is_empty() {
        println!("{}", style("Store:").bold().yellow());
        for offer in &level.store_offers {
            println!(
                "  tier {} {:?} for {} {}",
                offer.tier, offer.effect, offer.cost, offer.currency
            );
        }
        println!();
    }
}
