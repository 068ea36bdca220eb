//! Queue-driven simulation that owns one level's authoritative board.
//!
//! Hosts push semantic inputs; every [`Simulation::tick`] pops one, checks
//! it against the current [`GamePhase`], applies it to the [`Board`] and
//! publishes the resulting [`Transformation`]. Rule consequences (settling,
//! the referee's verdict, turn bookkeeping, goal rewards) are queued ahead of
//! any pending host input, so a move always finishes resolving before the
//! next one is looked at.

use std::collections::VecDeque;

use downfall_core::{
    Board, EntityCatalog, EntityState, GameConfig, GamePhase, Input, InputType, LevelConfig,
    LevelGoalTracker, LoseReason, Referee, TurnWatcher,
};
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, GameOutcome, SimulationEvent, Topic};
use crate::repository::RunRecord;

/// Simulation configuration derived from [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Settle transformations immediately instead of waiting for the
    /// renderer to send `AnimationsFinished`.
    pub auto_settle: bool,
    pub event_buffer: usize,
    /// Upper bound on inputs processed by one `run_until_idle` call.
    pub max_steps: usize,
}

impl SimulationConfig {
    pub const DEFAULT_MAX_STEPS: usize = 4096;

    pub fn from_game_config(config: &GameConfig) -> Self {
        Self {
            auto_settle: config.auto_settle,
            event_buffer: config.event_buffer,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    #[must_use]
    pub fn with_auto_settle(mut self, auto_settle: bool) -> Self {
        self.auto_settle = auto_settle;
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::from_game_config(&GameConfig::default())
    }
}

impl From<&GameConfig> for SimulationConfig {
    fn from(config: &GameConfig) -> Self {
        Self::from_game_config(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Host,
    Rules,
}

pub struct Simulation {
    config: SimulationConfig,
    board: Board,
    level: LevelConfig,
    phase: GamePhase,
    queue: VecDeque<(Input, Origin)>,
    next_seq: u64,
    turn: u32,
    watcher: TurnWatcher,
    goals: LevelGoalTracker,
    bus: EventBus,
    run: Option<RunRecord>,
}

impl Simulation {
    /// Builds a fresh level from `seed` and starts recording the run.
    pub fn new(
        level: LevelConfig,
        catalog: EntityCatalog,
        player: EntityState,
        seed: u64,
        config: SimulationConfig,
    ) -> Result<Self> {
        let board = Board::build(&level, catalog, player.clone(), seed)?;
        let run = RunRecord::new(seed, level.clone(), player);
        let mut simulation = Self::with_board(board, level, config);
        simulation.run = Some(run);
        Ok(simulation)
    }

    /// Wraps an already-built board. Runs started this way are not
    /// recorded, since the board cannot be rebuilt from a seed.
    pub fn with_board(board: Board, level: LevelConfig, config: SimulationConfig) -> Self {
        info!(
            target: "runtime::simulation",
            depth = level.depth,
            size = board.size(),
            goals = level.goals.len(),
            max_turns = level.max_turns,
            "Simulation initialized"
        );
        Self {
            bus: EventBus::with_capacity(config.event_buffer),
            goals: LevelGoalTracker::new(&level.goals, level.goals_to_unlock_exit),
            config,
            board,
            level,
            phase: GamePhase::default(),
            queue: VecDeque::new(),
            next_seq: 0,
            turn: 0,
            watcher: TurnWatcher::new(),
            run: None,
        }
    }

    // ===== accessors =====

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    pub const fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Turns left before the level is lost, on levels with a limit.
    pub fn turns_remaining(&self) -> Option<u32> {
        (self.level.max_turns > 0).then(|| self.level.max_turns.saturating_sub(self.turn))
    }

    pub fn goals(&self) -> &LevelGoalTracker {
        &self.goals
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<SimulationEvent> {
        self.bus.subscribe(topic)
    }

    pub fn state_root(&self) -> [u8; 32] {
        self.board.state_root()
    }

    /// Snapshot of the run so far, if this simulation records one.
    pub fn record(&self) -> Option<RunRecord> {
        self.run.as_ref().map(|run| RunRecord {
            goal_tracking: self.goals.tracking().to_vec(),
            state_root: hex::encode(self.state_root()),
            ..run.clone()
        })
    }

    // ===== queue =====

    /// Queues a host input if the current phase accepts it.
    pub fn push(&mut self, input: InputType) -> bool {
        if !self.phase.should_append(&input) {
            self.drop_input(&input);
            return false;
        }
        let seq = self.next_seq();
        self.queue.push_back((Input::new(seq, input), Origin::Host));
        true
    }

    /// Pushes `input` and processes everything that follows from it.
    pub fn apply(&mut self, input: InputType) -> Result<bool> {
        let accepted = self.push(input);
        self.run_until_idle()?;
        Ok(accepted)
    }

    /// Processes one queued input. Returns `false` when the queue is empty.
    pub fn tick(&mut self) -> Result<bool> {
        let Some((input, origin)) = self.queue.pop_front() else {
            return Ok(false);
        };
        self.dispatch(input, origin)?;
        Ok(true)
    }

    /// Ticks until the queue drains. Returns the number of inputs processed.
    pub fn run_until_idle(&mut self) -> Result<usize> {
        let mut steps = 0;
        while self.tick()? {
            steps += 1;
            if steps >= self.config.max_steps && !self.queue.is_empty() {
                warn!(
                    target: "runtime::simulation",
                    steps,
                    pending = self.queue.len(),
                    "Input chain did not settle, halting"
                );
                self.queue.clear();
                return Err(RuntimeError::Runaway { steps });
            }
        }
        Ok(steps)
    }

    // ===== dispatch =====

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn queue_rule(&mut self, input: InputType) {
        let seq = self.next_seq();
        self.queue.push_front((Input::new(seq, input), Origin::Rules));
    }

    fn drop_input(&self, input: &InputType) {
        warn!(
            target: "runtime::simulation",
            input = input.name(),
            phase = self.phase.as_str(),
            "Input dropped"
        );
        self.bus.publish(SimulationEvent::InputDropped {
            input: input.clone(),
            phase: self.phase,
        });
    }

    fn dispatch(&mut self, input: Input, origin: Origin) -> Result<()> {
        let phase = self.phase;
        if !phase.should_append(&input.kind) {
            self.drop_input(&input.kind);
            return Ok(());
        }
        debug!(
            target: "runtime::simulation",
            seq = input.seq,
            input = input.kind.name(),
            phase = phase.as_str(),
            "Dispatching input"
        );

        let applied = match self.board.handle(&input.kind) {
            Ok(applied) => applied,
            Err(error) => {
                warn!(
                    target: "runtime::simulation",
                    seq = input.seq,
                    input = input.kind.name(),
                    %error,
                    "Board rejected input, halting"
                );
                self.queue.clear();
                return Err(error.into());
            }
        };

        if origin == Origin::Host {
            if let Some(run) = &mut self.run {
                run.inputs.push(input.clone());
            }
        }

        match applied {
            Some(transformation) => {
                self.goals.observe(&transformation);
                self.watcher.observe(&transformation);
                self.bus
                    .publish(SimulationEvent::Transformation(Box::new(transformation)));
            }
            None if input.kind.is_player_move() => {
                debug!(
                    target: "runtime::simulation",
                    input = input.kind.name(),
                    "Move had no effect"
                );
                return Ok(());
            }
            None => {}
        }

        self.enter(phase.transition(&input.kind), &input.kind);
        self.follow_up(&input.kind);
        Ok(())
    }

    fn enter(&mut self, next: GamePhase, cause: &InputType) {
        if next == self.phase {
            return;
        }
        info!(
            target: "runtime::simulation",
            from = self.phase.as_str(),
            to = next.as_str(),
            cause = cause.name(),
            "Phase changed"
        );
        self.bus.publish(SimulationEvent::PhaseChanged {
            from: self.phase,
            to: next,
        });
        self.phase = next;

        if next.is_terminal() {
            let outcome = match cause {
                InputType::GameLose { reason } => GameOutcome::Lost(*reason),
                _ => GameOutcome::Won,
            };
            info!(target: "runtime::simulation", ?outcome, turn = self.turn, "Game over");
            self.bus.publish(SimulationEvent::GameOver(outcome));
            self.queue.clear();
        }
    }

    fn follow_up(&mut self, input: &InputType) {
        match input {
            InputType::AnimationsFinished => {
                let verdict = match Referee::enforce_rules(self.board.tiles()) {
                    Some(verdict) => verdict,
                    None => InputType::ReffingFinished {
                        new_turn: self.watcher.take(),
                    },
                };
                self.queue_rule(verdict);
            }
            InputType::ReffingFinished { new_turn: true } => {
                self.turn += 1;
                let remaining = self.turns_remaining();
                info!(target: "runtime::simulation", turn = self.turn, ?remaining, "Turn advanced");
                self.bus.publish(SimulationEvent::TurnAdvanced {
                    turn: self.turn,
                    remaining,
                });
                self.queue_rule(InputType::NewTurn);
            }
            InputType::ReffingFinished { new_turn: false } => self.check_goals(),
            InputType::NewTurn => {
                if self.turns_remaining() == Some(0) {
                    warn!(target: "runtime::simulation", turn = self.turn, "Out of turns");
                    self.queue_rule(InputType::GameLose {
                        reason: LoseReason::OutOfTurns,
                    });
                } else {
                    self.check_goals();
                }
            }
            _ => {}
        }

        if self.phase == GamePhase::Computing && self.config.auto_settle {
            self.queue_rule(InputType::AnimationsFinished);
        }
    }

    fn check_goals(&mut self) {
        if let Some(reward) = self.goals.check_for_completed_goals() {
            debug!(
                target: "runtime::simulation",
                input = reward.name(),
                completed = self.goals.completed(),
                "Goal payout"
            );
            self.queue_rule(reward);
        }
    }
}
