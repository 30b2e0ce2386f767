use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::Agent;
use crate::game::{GameError, GameOutcome, GameState, Move, Observation, Symbol};
use crate::reward::{RewardShaper, RewardWeights};

use super::{Environment, Seat, Step, StepInfo, TerminalRewards};

/// Single-agent training environment: the learner steps, a built-in
/// opponent answers inside the same call.
///
/// The learner always holds [`Symbol::A`]; its seat is re-drawn on every
/// [`reset`](TrainEnv::reset) by picking who moves first.
pub struct TrainEnv {
    state: GameState,
    opponent: Box<dyn Agent>,
    shaper: RewardShaper,
    rewards: TerminalRewards,
    rng: StdRng,
    agent_seat: Seat,
}

impl TrainEnv {
    pub fn new(
        opponent: Box<dyn Agent>,
        weights: RewardWeights,
        rewards: TerminalRewards,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        TrainEnv {
            state: GameState::new(Self::AGENT),
            opponent,
            shaper: RewardShaper::new(weights),
            rewards,
            rng,
            agent_seat: Seat::First,
        }
    }

    /// Symbol the learning agent plays.
    pub const AGENT: Symbol = Symbol::A;

    pub fn agent_symbol(&self) -> Symbol {
        Self::AGENT
    }

    pub fn opponent_symbol(&self) -> Symbol {
        Self::AGENT.other()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seat drawn at the last reset
    pub fn agent_seat(&self) -> Seat {
        self.agent_seat
    }

    pub fn opponent(&self) -> &dyn Agent {
        self.opponent.as_ref()
    }

    /// Start a new episode with a fresh coin flip for the agent's seat. When
    /// the agent moves second, the opponent's opening is already on the
    /// returned board.
    pub fn reset(&mut self) -> (Observation, StepInfo) {
        self.agent_seat = if self.rng.random_bool(0.5) {
            Seat::First
        } else {
            Seat::Second
        };
        let starting = match self.agent_seat {
            Seat::First => Self::AGENT,
            Seat::Second => self.opponent_symbol(),
        };
        self.state.set_starting_player(starting);
        self.state.reset();
        log::trace!("train episode reset, agent seat {}", self.agent_seat.number());

        if self.agent_seat == Seat::Second {
            self.opponent_move();
        }
        (self.observation(), self.info(false))
    }

    /// One agent move plus the opponent's reply, rewards summed.
    ///
    /// Never fails: a call on a finished episode earns
    /// `rewards.after_terminal` and reports terminated again; an unplayable
    /// column earns `rewards.invalid_action` and nothing moves.
    pub fn train_step(&mut self, action: usize) -> Step {
        if self.state.is_terminal() {
            return self.step_result(self.rewards.after_terminal, false);
        }

        let applied = match self.state.apply_move(action) {
            Ok(applied) => applied,
            Err(e) => {
                log::debug!("agent action {action} refused: {e}");
                return self.step_result(self.rewards.invalid_action, true);
            }
        };

        let mut reward = self.shaper.reward(
            applied.column,
            applied.row,
            Self::AGENT,
            self.opponent_symbol(),
            self.state.board_mut(),
        );

        match self.state.outcome() {
            Some(GameOutcome::Winner(_)) => {}
            Some(GameOutcome::Draw) => reward += self.rewards.draw,
            None => {
                self.opponent_move();
                match self.state.outcome() {
                    Some(GameOutcome::Winner(_)) => reward += self.rewards.loss,
                    Some(GameOutcome::Draw) => reward += self.rewards.draw,
                    None => {}
                }
            }
        }

        self.step_result(reward, false)
    }

    /// Ask the opponent for a move; anything unplayable is replaced by a
    /// uniformly random valid column so the episode always advances.
    fn opponent_move(&mut self) -> Option<Move> {
        let valid = self.state.valid_actions();
        if valid.is_empty() {
            return None;
        }
        let observation = self.state.observation(self.opponent_symbol());

        let proposed = match self.opponent.next_move(&valid, &observation) {
            Ok(action) if valid.contains(&action) => Some(action),
            Ok(action) => {
                log::warn!("{} proposed unplayable column {action}", self.opponent.name());
                None
            }
            Err(e) => {
                log::warn!("{} failed to move: {e}", self.opponent.name());
                None
            }
        };
        let action = proposed.unwrap_or_else(|| valid[self.rng.random_range(0..valid.len())]);
        self.state.apply_move(action).ok()
    }

    fn observation(&self) -> Observation {
        self.state.observation(Self::AGENT)
    }

    fn info(&self, invalid_action: bool) -> StepInfo {
        StepInfo {
            current_player: self.state.current_player(),
            win_axis: self.state.win_axis(),
            agent_seat: Some(self.agent_seat),
            invalid_action,
        }
    }

    fn step_result(&self, reward: f32, invalid_action: bool) -> Step {
        Step {
            observation: self.observation(),
            reward,
            terminated: self.state.is_terminal(),
            truncated: false,
            info: self.info(invalid_action),
        }
    }
}

impl Environment for TrainEnv {
    fn reset(&mut self) -> (Observation, StepInfo) {
        TrainEnv::reset(self)
    }

    fn step(&mut self, action: usize) -> Result<Step, GameError> {
        Ok(self.train_step(action))
    }

    fn state(&self) -> &GameState {
        &self.state
    }
}
