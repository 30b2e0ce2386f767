use std::path::Path;

use crate::error::AgentError;
use crate::game::Observation;

/// A single step of experience handed to learning players.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub episode: usize,
    pub state: Observation,
    pub action: usize,
    pub reward: f32,
    pub next_state: Observation,
    pub done: bool,
}

/// Universal interface for everything that can take a seat: humans, random
/// movers, scripted replays, and learned policies.
pub trait Agent {
    /// Choose a column. `observation` is seen from this player's side
    /// (`1` own pieces, `-1` opponent's). An answer outside `valid_actions`
    /// is allowed; the scheduler decides what to do with it.
    fn next_move(
        &mut self,
        valid_actions: &[usize],
        observation: &Observation,
    ) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Learn from one step. Stateless players ignore it.
    fn learn(&mut self, _transition: &Transition) {}

    /// Load a persisted model. The path is opaque to the game core.
    fn load_model(&mut self, _path: &Path) -> Result<(), AgentError> {
        Ok(())
    }

    /// Persist the current model. The path is opaque to the game core.
    fn save_model(&self, _path: &Path) -> Result<(), AgentError> {
        Ok(())
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn next_move(
        &mut self,
        valid_actions: &[usize],
        observation: &Observation,
    ) -> Result<usize, AgentError> {
        (**self).next_move(valid_actions, observation)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn learn(&mut self, transition: &Transition) {
        (**self).learn(transition)
    }

    fn load_model(&mut self, path: &Path) -> Result<(), AgentError> {
        (**self).load_model(path)
    }

    fn save_model(&self, path: &Path) -> Result<(), AgentError> {
        (**self).save_model(path)
    }
}
