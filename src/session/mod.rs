//! Turn scheduling: one shared move primitive ([`GameState::apply_move`])
//! behind three entry points.
//!
//! - [`Match::play_step`] / [`Match::play_game`]: interactive play, strict
//!   about invalid moves and finished games.
//! - [`TrainEnv::train_step`]: single-step environment for an external
//!   learner; one call covers the agent's move and the opponent's reply.
//! - [`Match::evaluate_run`]: many complete games with aggregate statistics.

mod evaluate;
mod play;
mod train;

use serde::{Deserialize, Serialize};

use crate::game::{Axis, GameError, GameState, Observation, Symbol, COLS};

pub use evaluate::{EvalConfig, EvalStats};
pub use play::{EpisodeResult, Match};
pub use train::TrainEnv;

/// Number of discrete actions (one per column).
pub const ACTION_SPACE: usize = COLS;

/// Move-order slot a player occupies in an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// 1 for the first mover, 2 for the second.
    pub fn number(self) -> u8 {
        match self {
            Seat::First => 1,
            Seat::Second => 2,
        }
    }
}

/// Terminal outcome values plus the train-mode penalties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalRewards {
    pub win: f32,
    pub loss: f32,
    pub draw: f32,
    /// Train mode: action outside the valid set (no move is made)
    pub invalid_action: f32,
    /// Train mode: step called on a finished episode
    pub after_terminal: f32,
}

impl Default for TerminalRewards {
    fn default() -> Self {
        TerminalRewards {
            win: 10.0,
            loss: -10.0,
            draw: 0.0,
            invalid_action: -0.1,
            after_terminal: -10.0,
        }
    }
}

/// Side information returned with every step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepInfo {
    /// Symbol to move next (the last mover if the game is over)
    pub current_player: Symbol,
    /// Axis of the winning line, once the game is won
    pub win_axis: Option<Axis>,
    /// Train mode: which seat the learning agent holds this episode
    pub agent_seat: Option<Seat>,
    /// Train mode: the action was refused and nothing moved
    pub invalid_action: bool,
}

/// Result of one `step` call, in the order a training harness expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

/// The contract front ends and training harnesses drive: reset, step, list
/// the legal columns, and read the winner/terminal flag off [`GameState`].
pub trait Environment {
    fn reset(&mut self) -> (Observation, StepInfo);

    fn step(&mut self, action: usize) -> Result<Step, GameError>;

    fn valid_actions(&self) -> Vec<usize> {
        self.state().valid_actions()
    }

    fn state(&self) -> &GameState;

    fn action_space(&self) -> usize {
        ACTION_SPACE
    }
}
