use super::agent::Agent;
use crate::error::AgentError;
use crate::game::{Board, Observation, Symbol};
use crate::reward::{RewardShaper, RewardWeights};

/// One-ply greedy player: scores every legal column with the reward shaper
/// and takes the best, leftmost on ties.
pub struct GreedyAgent {
    shaper: RewardShaper,
}

impl GreedyAgent {
    pub fn new(weights: RewardWeights) -> Self {
        GreedyAgent {
            shaper: RewardShaper::new(weights),
        }
    }

    /// Shaped score of dropping into each of `valid_actions`.
    pub fn scores(&self, valid_actions: &[usize], observation: &Observation) -> Vec<(usize, f32)> {
        // Observations are relative, so the mover is always A here.
        let board = Board::from_observation(observation, Symbol::A);
        valid_actions
            .iter()
            .filter_map(|&col| {
                let mut scratch = board;
                let row = scratch.place(col, Symbol::A).ok()?;
                let score = self.shaper.reward(col, row, Symbol::A, Symbol::B, &mut scratch);
                Some((col, score))
            })
            .collect()
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new(RewardWeights::default())
    }
}

impl Agent for GreedyAgent {
    fn next_move(
        &mut self,
        valid_actions: &[usize],
        observation: &Observation,
    ) -> Result<usize, AgentError> {
        self.scores(valid_actions, observation)
            .into_iter()
            .fold(None, |best: Option<(usize, f32)>, (col, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((col, score)),
            })
            .map(|(col, _)| col)
            .ok_or_else(|| AgentError::Model("no legal actions available".into()))
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn test_takes_the_win() {
        let mut state = GameState::new(Symbol::A);
        for opp in [0, 0, 0] {
            state.apply_move(4).unwrap();
            state.apply_move(opp).unwrap();
        }
        let mut agent = GreedyAgent::default();
        let action = agent
            .next_move(&state.valid_actions(), &state.observation(Symbol::A))
            .unwrap();
        assert_eq!(action, 4);
    }

    #[test]
    fn test_blocks_a_threat() {
        let mut state = GameState::new(Symbol::A);
        // B stacks three in column 6; A has no win of its own.
        for a in [0, 2, 0] {
            state.apply_move(a).unwrap();
            state.apply_move(6).unwrap();
        }
        let mut agent = GreedyAgent::default();
        let action = agent
            .next_move(&state.valid_actions(), &state.observation(Symbol::A))
            .unwrap();
        assert_eq!(action, 6);
    }

    #[test]
    fn test_win_outranks_block() {
        let mut state = GameState::new(Symbol::A);
        // B stacks three in column 6 while A scatters along row 0.
        for a in [0, 1, 3] {
            state.apply_move(a).unwrap();
            if a != 3 {
                state.apply_move(6).unwrap();
            }
        }
        state.apply_move(6).unwrap();
        assert_eq!(state.current_player(), Symbol::A);

        // A can also win on row 0 at column 2; the win outranks the block.
        let mut agent = GreedyAgent::default();
        let action = agent
            .next_move(&state.valid_actions(), &state.observation(Symbol::A))
            .unwrap();
        assert_eq!(action, 2);
    }

    #[test]
    fn test_prefers_center_on_empty_board() {
        let state = GameState::new(Symbol::A);
        let mut agent = GreedyAgent::default();
        let action = agent
            .next_move(&state.valid_actions(), &state.observation(Symbol::A))
            .unwrap();
        assert_eq!(action, 3);
    }

    #[test]
    fn test_no_actions_is_an_error() {
        let mut agent = GreedyAgent::default();
        assert!(agent.next_move(&[], &[[0; 7]; 6]).is_err());
    }
}
