use std::collections::VecDeque;

use super::agent::Agent;
use crate::error::AgentError;
use crate::game::Observation;

/// Replays a fixed list of columns, legal or not. Runs out with
/// [`AgentError::InputClosed`].
pub struct ScriptedAgent {
    moves: VecDeque<usize>,
}

impl ScriptedAgent {
    pub fn new(moves: impl IntoIterator<Item = usize>) -> Self {
        ScriptedAgent {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Agent for ScriptedAgent {
    fn next_move(
        &mut self,
        _valid_actions: &[usize],
        _observation: &Observation,
    ) -> Result<usize, AgentError> {
        self.moves.pop_front().ok_or(AgentError::InputClosed)
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
