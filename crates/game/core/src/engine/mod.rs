//! Game phases and the rules for moving between them.
//!
//! The runtime owns the input queue; this module only answers two
//! questions for it: may an input enter the queue (or be dispatched) in the
//! current phase, and which phase follows once it has been applied.

mod turns;

pub use turns::TurnWatcher;

use crate::input::InputType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// Waiting for a player move.
    #[default]
    Playing,
    Paused,
    /// A transformation is being shown; only `AnimationsFinished` gets in.
    Computing,
    /// The referee decides the consequences of the last transformation.
    Reffing,
    Win,
    Lose,
}

impl GamePhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Computing => "computing",
            Self::Reffing => "reffing",
            Self::Win => "win",
            Self::Lose => "lose",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }

    /// Whether `input` is accepted in this phase. Checked both when the input
    /// is queued and again when it is dispatched.
    pub const fn should_append(self, input: &InputType) -> bool {
        match self {
            Self::Playing => matches!(
                input,
                InputType::Touch { .. }
                    | InputType::RotateLeft
                    | InputType::RotateRight
                    | InputType::ItemUsed { .. }
                    | InputType::RuneUsed { .. }
                    | InputType::UnlockExit
                    | InputType::PlayerAwarded { .. }
                    | InputType::NewTurn
                    | InputType::Pause
                    | InputType::GameLose { .. }
            ),
            Self::Computing => matches!(input, InputType::AnimationsFinished),
            Self::Reffing => matches!(
                input,
                InputType::ReffingFinished { .. }
                    | InputType::Attack { .. }
                    | InputType::AttackArea { .. }
                    | InputType::MonsterDies { .. }
                    | InputType::CollectItem { .. }
                    | InputType::GameWin
                    | InputType::GameLose { .. }
            ),
            Self::Paused => matches!(input, InputType::Play | InputType::SelectLevel),
            Self::Win | Self::Lose => false,
        }
    }

    /// Phase after `input` has been applied. Player moves only reach
    /// `Computing` when the board reported a transformation; callers keep the
    /// current phase for moves that changed nothing. Inspecting a monster
    /// never leaves the current phase.
    pub const fn transition(self, input: &InputType) -> Self {
        if input.is_inspection() {
            return self;
        }
        match (self, input) {
            (
                Self::Playing,
                InputType::Touch { .. }
                | InputType::RotateLeft
                | InputType::RotateRight
                | InputType::ItemUsed { .. }
                | InputType::RuneUsed { .. }
                | InputType::UnlockExit
                | InputType::PlayerAwarded { .. },
            ) => Self::Computing,
            (Self::Playing, InputType::Pause) => Self::Paused,
            (Self::Playing | Self::Reffing, InputType::GameLose { .. }) => Self::Lose,
            (Self::Computing, InputType::AnimationsFinished) => Self::Reffing,
            (Self::Reffing, InputType::ReffingFinished { .. }) => Self::Playing,
            (
                Self::Reffing,
                InputType::Attack { .. }
                | InputType::AttackArea { .. }
                | InputType::MonsterDies { .. }
                | InputType::CollectItem { .. },
            ) => Self::Computing,
            (Self::Reffing, InputType::GameWin) => Self::Win,
            (Self::Paused, InputType::Play | InputType::SelectLevel) => Self::Playing,
            (phase, _) => phase,
        }
    }
}
