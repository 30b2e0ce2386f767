use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;
use crate::error::AgentError;
use crate::game::Observation;

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn next_move(
        &mut self,
        valid_actions: &[usize],
        _observation: &Observation,
    ) -> Result<usize, AgentError> {
        if valid_actions.is_empty() {
            return Err(AgentError::Model("no legal actions available".into()));
        }
        let idx = self.rng.random_range(0..valid_actions.len());
        Ok(valid_actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Symbol};

    #[test]
    fn test_random_agent_selects_legal_action() {
        let mut agent = RandomAgent::with_seed(7);
        let mut state = GameState::new(Symbol::A);
        for _ in 0..6 {
            state.apply_move(3).unwrap();
        }
        let legal = state.valid_actions();
        let obs = state.observation(Symbol::A);

        for _ in 0..100 {
            let action = agent.next_move(&legal, &obs).unwrap();
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agents = [RandomAgent::with_seed(1), RandomAgent::with_seed(2)];
        let mut state = GameState::new(Symbol::A);

        while !state.is_terminal() {
            let me = state.current_player();
            let action = agents[me.index()]
                .next_move(&state.valid_actions(), &state.observation(me))
                .unwrap();
            state.apply_move(action).unwrap();
        }

        assert!(state.outcome().is_some());
    }

    #[test]
    fn test_random_agent_rejects_empty_actions() {
        let mut agent = RandomAgent::with_seed(0);
        assert!(agent.next_move(&[], &[[0; 7]; 6]).is_err());
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
