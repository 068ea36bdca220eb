//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::SimulationEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Board transformations
    Board,
    /// Phase changes and game over
    Phase,
    /// Turn counter
    Turn,
    /// Inputs rejected by the phase gate
    Input,
}

impl SimulationEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SimulationEvent::Transformation(_) => Topic::Board,
            SimulationEvent::PhaseChanged { .. } | SimulationEvent::GameOver(_) => Topic::Phase,
            SimulationEvent::TurnAdvanced { .. } => Topic::Turn,
            SimulationEvent::InputDropped { .. } => Topic::Input,
        }
    }
}

/// Topic-based event bus
///
/// Every topic gets its own broadcast channel up front, so publishing and
/// subscribing never need a lock. Sending and `try_recv` are synchronous;
/// no async executor is involved. Subscribers that fall more than
/// `capacity` events behind see `Lagged` on their next receive.
#[derive(Clone)]
pub struct EventBus {
    board: broadcast::Sender<SimulationEvent>,
    phase: broadcast::Sender<SimulationEvent>,
    turn: broadcast::Sender<SimulationEvent>,
    input: broadcast::Sender<SimulationEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(downfall_core::GameConfig::DEFAULT_EVENT_BUFFER)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            board: broadcast::channel(capacity).0,
            phase: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
            input: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<SimulationEvent> {
        match topic {
            Topic::Board => &self.board,
            Topic::Phase => &self.phase,
            Topic::Turn => &self.turn,
            Topic::Input => &self.input,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: SimulationEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SimulationEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<SimulationEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
