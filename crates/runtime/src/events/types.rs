//! Event payloads published by the simulation.

use downfall_core::{GamePhase, InputType, LoseReason, Transformation};
use serde::{Deserialize, Serialize};

/// How a level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost(LoseReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// The board applied an input. Renderers animate from this.
    Transformation(Box<Transformation>),

    PhaseChanged { from: GamePhase, to: GamePhase },

    /// A move used up a turn. `remaining` is `None` on levels without a
    /// turn limit.
    TurnAdvanced { turn: u32, remaining: Option<u32> },

    GameOver(GameOutcome),

    /// The input was not accepted in the phase it arrived in.
    InputDropped { input: InputType, phase: GamePhase },
}
