//! Repository contract for saving and loading runs.

use super::{Result, RunRecord};

/// Storage for [`RunRecord`]s keyed by a host-chosen run id.
pub trait RunRepository: Send + Sync {
    /// Save a run, replacing any earlier record under the same id
    fn save(&self, run_id: &str, record: &RunRecord) -> Result<()>;

    /// Load a run by id
    fn load(&self, run_id: &str) -> Result<Option<RunRecord>>;

    /// Delete a run
    fn delete(&self, run_id: &str) -> Result<()>;

    /// List all stored run ids, sorted
    fn list_runs(&self) -> Result<Vec<String>>;

    /// Check if a run exists
    fn exists(&self, run_id: &str) -> bool {
        matches!(self.load(run_id), Ok(Some(_)))
    }
}
