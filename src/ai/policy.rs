use std::error::Error;
use std::path::{Path, PathBuf};

use super::agent::{Agent, Transition};
use crate::error::AgentError;
use crate::game::Observation;

/// A learned model living outside the game core: a Q-network, a policy
/// gradient learner, anything that maps observations to columns.
pub trait Policy {
    /// Pick a column for `observation`.
    fn act(&mut self, observation: &Observation, valid_actions: &[usize]) -> usize;

    /// Feed one step of experience to the learner.
    fn observe(&mut self, _transition: &Transition) {}

    /// Load weights from an opaque artifact.
    fn load(&mut self, path: &Path) -> Result<(), Box<dyn Error>>;

    /// Save weights to an opaque artifact.
    fn save(&self, path: &Path) -> Result<(), Box<dyn Error>>;
}

/// Seats an external [`Policy`] at the table.
pub struct PolicyAgent<P> {
    policy: P,
    name: String,
    model_path: Option<PathBuf>,
}

impl<P: Policy> PolicyAgent<P> {
    pub fn new(policy: P, name: impl Into<String>) -> Self {
        PolicyAgent {
            policy,
            name: name.into(),
            model_path: None,
        }
    }

    /// Build the agent and load its weights from `path` up front.
    pub fn from_model(policy: P, name: impl Into<String>, path: &Path) -> Result<Self, AgentError> {
        let mut agent = Self::new(policy, name);
        agent.load_model(path)?;
        Ok(agent)
    }

    /// Path of the last model loaded or saved
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: Policy> Agent for PolicyAgent<P> {
    fn next_move(
        &mut self,
        valid_actions: &[usize],
        observation: &Observation,
    ) -> Result<usize, AgentError> {
        Ok(self.policy.act(observation, valid_actions))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn learn(&mut self, transition: &Transition) {
        self.policy.observe(transition);
    }

    fn load_model(&mut self, path: &Path) -> Result<(), AgentError> {
        self.policy
            .load(path)
            .map_err(|e| AgentError::Model(format!("loading {}: {e}", path.display())))?;
        self.model_path = Some(path.to_path_buf());
        Ok(())
    }

    fn save_model(&self, path: &Path) -> Result<(), AgentError> {
        self.policy
            .save(path)
            .map_err(|e| AgentError::Model(format!("saving {}: {e}", path.display())))
    }
}
