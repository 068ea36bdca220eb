//! Runtime orchestration for the deterministic Downfall rules.
//!
//! `downfall-core` answers single questions (apply this input, what does the
//! referee say, which phase comes next). This crate strings those answers
//! into a running level: a FIFO input queue gated by [`GamePhase`], automatic
//! settling, turn and goal bookkeeping, and a topic-based [`EventBus`] that
//! renderers subscribe to.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the queue-driven orchestrator
//! - [`events`] provides the topic-based event bus
//! - [`repository`] stores run records
//! - [`replay`] rebuilds recorded runs and checks their state roots
//!
//! [`GamePhase`]: downfall_core::GamePhase
pub mod error;
pub mod events;
pub mod replay;
pub mod repository;
pub mod simulation;

pub use error::{Result, RuntimeError};
pub use events::{EventBus, GameOutcome, SimulationEvent, Topic};
pub use replay::{replay, verify, verify_stored};
pub use repository::{InMemoryRunRepository, RepositoryError, RunRecord, RunRepository};
pub use simulation::{Simulation, SimulationConfig};
