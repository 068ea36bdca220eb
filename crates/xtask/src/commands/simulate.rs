//! Auto-play a level headlessly
//!
//! Drives a recorded simulation with a greedy move picker and prints what
//! happened, optionally saving the run for `xtask replay`.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tokio::sync::broadcast::Receiver;

use downfall_runtime::{GameOutcome, Simulation, SimulationConfig, SimulationEvent, Topic};

use crate::utils::{LevelArgs, next_move, render_board};

/// Auto-play a level and report the outcome
#[derive(Parser)]
pub struct Simulate {
    #[command(flatten)]
    level: LevelArgs,

    /// Maximum number of player moves
    #[arg(short, long, default_value_t = 60)]
    moves: usize,

    /// Write the run record as JSON to this path
    #[arg(short, long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per turn and the final board
    Summary,
    /// Every published event as a JSON line
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let loaded = self.level.load()?;
        let config = SimulationConfig::from_game_config(&loaded.config).with_auto_settle(true);
        let mut simulation = Simulation::new(
            loaded.level.clone(),
            loaded.catalog.clone(),
            loaded.player(),
            loaded.seed,
            config,
        )?;
        let mut events =
            [Topic::Board, Topic::Phase, Topic::Turn, Topic::Input].map(|topic| simulation.subscribe(topic));

        if matches!(self.format, OutputFormat::Summary) {
            println!(
                "{} depth {} ({}), seed {}",
                style("Simulating").bold().cyan(),
                loaded.level.depth,
                loaded.level.difficulty,
                loaded.seed
            );
            println!();
        }

        let mut moves = 0;
        while moves < self.moves && !simulation.is_over() {
            let input = next_move(simulation.board());
            simulation
                .apply(input)
                .with_context(|| format!("Move {moves} failed"))?;
            moves += 1;

            match self.format {
                OutputFormat::Summary => print_turn(&simulation, moves),
                OutputFormat::Json => drain_json(&mut events)?,
            }
        }

        if matches!(self.format, OutputFormat::Summary) {
            print_outcome(&simulation, &mut events);
        }

        if let Some(path) = &self.record {
            let record = simulation
                .record()
                .context("Simulation did not record a run")?;
            let json =
                serde_json::to_string_pretty(&record).context("Failed to serialize run record")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write run record: {}", path.display()))?;
            eprintln!(
                "{} {} ({} inputs)",
                style("Recorded").bold().green(),
                path.display(),
                record.inputs.len()
            );
        }

        Ok(())
    }
}

fn print_turn(simulation: &Simulation, moves: usize) {
    let player = simulation.board().player();
    println!(
        "  move {:>3}  turn {:>3}  hp {:>3}  gold {:>4}  gems {:>2}  goals {}/{}",
        moves,
        simulation.turn(),
        player.map_or(0, |player| player.hp),
        player.map_or(0, |player| player.carry.gold),
        player.map_or(0, |player| player.carry.gems),
        simulation.goals().completed(),
        simulation.goals().tracking().len(),
    );
}

fn print_outcome(simulation: &Simulation, events: &mut [Receiver<SimulationEvent>]) {
    let outcome = drain(events).into_iter().find_map(|event| match event {
        SimulationEvent::GameOver(outcome) => Some(outcome),
        _ => None,
    });

    println!();
    println!("{}", style("=== Final Board ===").bold().green());
    println!("{}", render_board(simulation.board()));
    println!();
    match outcome {
        Some(GameOutcome::Won) => println!("{}", style("Level cleared").bold().green()),
        Some(GameOutcome::Lost(reason)) => {
            println!("{} {}", style("Level lost:").bold().red(), reason)
        }
        None => println!(
            "{} in phase {}",
            style("Stopped").bold().yellow(),
            simulation.phase()
        ),
    }
    println!(
        "{} {}",
        style("State root:").bold().cyan(),
        hex::encode(simulation.state_root())
    );
}

fn drain(events: &mut [Receiver<SimulationEvent>]) -> Vec<SimulationEvent> {
    events
        .iter_mut()
        .flat_map(|receiver| std::iter::from_fn(move || receiver.try_recv().ok()))
        .collect()
}

fn drain_json(events: &mut [Receiver<SimulationEvent>]) -> Result<()> {
    for event in drain(events) {
        let line = serde_json::to_string(&event).context("Failed to serialize event")?;
        println!("{line}");
    }
    Ok(())
}
