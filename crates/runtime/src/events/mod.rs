//! Topic-based event bus for simulation events.
//!
//! Renderers, recorders and tests subscribe only to the topics they need;
//! the simulation publishes without knowing who listens.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::{GameOutcome, SimulationEvent};
