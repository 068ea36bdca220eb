//! Repository layer for finished and in-progress runs.
//!
//! A [`RunRecord`] is everything needed to rebuild a level exactly: the
//! seed, the level and starting player, and the host inputs in the order
//! they were applied. How records reach disk is left to the host.

mod error;
mod memory;
mod record;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::InMemoryRunRepository;
pub use record::RunRecord;
pub use traits::RunRepository;
