//! Deterministic replay of recorded runs.
//!
//! Rebuilding the board from the record's seed and re-applying its host
//! inputs must land on the same state root; anything else means the rules
//! changed or the record was tampered with.

use downfall_core::EntityCatalog;
use tracing::{info, warn};

use crate::error::{Result, RuntimeError};
use crate::repository::{RunRecord, RunRepository};
use crate::simulation::{Simulation, SimulationConfig};

/// Rebuilds the level and re-applies every recorded input.
///
/// Use the same [`SimulationConfig::auto_settle`] the run was recorded with:
/// a run recorded without auto-settle carries its own `AnimationsFinished`
/// inputs.
pub fn replay(
    record: &RunRecord,
    catalog: EntityCatalog,
    config: SimulationConfig,
) -> Result<Simulation> {
    let mut simulation = Simulation::new(
        record.level.clone(),
        catalog,
        record.player.clone(),
        record.seed,
        config,
    )?;
    for input in &record.inputs {
        simulation.apply(input.kind.clone())?;
    }
    Ok(simulation)
}

/// Replays `record` and checks it ends on the recorded state root.
pub fn verify(
    record: &RunRecord,
    catalog: EntityCatalog,
    config: SimulationConfig,
) -> Result<Simulation> {
    let simulation = replay(record, catalog, config)?;
    let actual = hex::encode(simulation.state_root());
    if actual != record.state_root {
        warn!(
            target: "runtime::replay",
            expected = %record.state_root,
            %actual,
            "Replay diverged"
        );
        return Err(RuntimeError::ReplayDiverged {
            expected: record.state_root.clone(),
            actual,
        });
    }
    info!(
        target: "runtime::replay",
        inputs = record.inputs.len(),
        state_root = %actual,
        "Replay verified"
    );
    Ok(simulation)
}

/// Loads a stored run and verifies it.
pub fn verify_stored(
    repository: &dyn RunRepository,
    run_id: &str,
    catalog: EntityCatalog,
    config: SimulationConfig,
) -> Result<Simulation> {
    let record = repository
        .load(run_id)?
        .ok_or_else(|| RuntimeError::MissingRun(run_id.to_owned()))?;
    verify(&record, catalog, config)
}
