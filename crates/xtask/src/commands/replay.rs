//! Replay a recorded run
//!
//! Rebuilds the level from a `RunRecord` JSON file, re-applies its inputs
//! and checks the final state root.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use downfall_content::ContentFactory;
use downfall_runtime::{RunRecord, SimulationConfig, verify};

use crate::utils::default_data_dir;

/// Replay a recorded run and verify its state root
#[derive(Parser)]
pub struct Replay {
    /// Run record written by `xtask simulate --record`
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Content directory holding the roster the run was played with
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// The run was recorded without auto-settle
    #[arg(long)]
    manual_settle: bool,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read run record: {}", self.path.display()))?;
        let record: RunRecord = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse run record: {}", self.path.display()))?;

        let factory = ContentFactory::new(self.data_dir.unwrap_or_else(default_data_dir));
        let catalog = factory.load_entities()?;
        let config = SimulationConfig::default().with_auto_settle(!self.manual_settle);

        println!(
            "{} {}",
            style("Run Record:").bold().cyan(),
            self.path.display()
        );
        println!(
            "{} depth {}, seed {}, {} inputs",
            style("Run:").bold().cyan(),
            record.depth,
            record.seed,
            record.inputs.len()
        );

        let simulation = verify(&record, catalog, config)?;

        println!(
            "{} {} (phase {}, turn {})",
            style("Verified").bold().green(),
            record.state_root,
            simulation.phase(),
            simulation.turn()
        );
        Ok(())
    }
}
