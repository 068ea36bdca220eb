//! In-memory RunRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{RepositoryError, Result, RunRecord, RunRepository};

/// In-memory implementation of RunRepository.
#[derive(Default)]
pub struct InMemoryRunRepository {
    runs: RwLock<HashMap<String, RunRecord>>,
}

impl InMemoryRunRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunRepository for InMemoryRunRepository {
    fn save(&self, run_id: &str, record: &RunRecord) -> Result<()> {
        if run_id.is_empty() {
            return Err(RepositoryError::EmptyRunId);
        }
        let mut runs = self
            .runs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        runs.insert(run_id.to_owned(), record.clone());
        Ok(())
    }

    fn load(&self, run_id: &str) -> Result<Option<RunRecord>> {
        let runs = self
            .runs
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(runs.get(run_id).cloned())
    }

    fn delete(&self, run_id: &str) -> Result<()> {
        let mut runs = self
            .runs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        runs.remove(run_id);
        Ok(())
    }

    fn list_runs(&self) -> Result<Vec<String>> {
        let runs = self
            .runs
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = runs.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn exists(&self, run_id: &str) -> bool {
        self.runs
            .read()
            .map(|runs| runs.contains_key(run_id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use downfall_core::{EntityState, LevelConfig};

    fn record(seed: u64) -> RunRecord {
        RunRecord::new(seed, LevelConfig::new(5), EntityState::player(3, 1))
    }

    #[test]
    fn save_load_delete() {
        let repo = InMemoryRunRepository::new();
        repo.save("b", &record(2)).unwrap();
        repo.save("a", &record(1)).unwrap();
        assert_eq!(repo.list_runs().unwrap(), vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(repo.load("a").unwrap().map(|run| run.seed), Some(1));

        repo.save("a", &record(7)).unwrap();
        assert_eq!(repo.load("a").unwrap().map(|run| run.seed), Some(7));

        repo.delete("a").unwrap();
        assert!(!repo.exists("a"));
        assert!(repo.load("a").unwrap().is_none());
        assert!(matches!(repo.save("", &record(1)), Err(RepositoryError::EmptyRunId)));
    }
}
