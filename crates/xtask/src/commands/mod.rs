//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect_level;
mod replay;
mod simulate;

pub use inspect_level::InspectLevel;
pub use replay::Replay;
pub use simulate::Simulate;
