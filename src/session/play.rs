use crate::ai::Agent;
use crate::config::GameConfig;
use crate::error::SessionError;
use crate::game::{Axis, GameError, GameOutcome, GameState, Observation, Symbol};

use super::{Environment, Step, StepInfo, TerminalRewards};

/// Summary of one finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeResult {
    pub winner: Option<Symbol>,
    pub win_axis: Option<Axis>,
    /// Moves placed on the board
    pub moves: usize,
    /// Reward of every step, from each mover's point of view
    pub rewards: Vec<f32>,
}

/// Two seated players and a board, for interactive play and evaluation.
pub struct Match {
    state: GameState,
    players: [Box<dyn Agent>; 2],
    rewards: TerminalRewards,
    config: GameConfig,
}

impl Match {
    /// `player_a` plays symbol A, `player_b` symbol B; `config.starting` moves first.
    pub fn new(
        config: GameConfig,
        rewards: TerminalRewards,
        player_a: Box<dyn Agent>,
        player_b: Box<dyn Agent>,
    ) -> Self {
        Match {
            state: GameState::new(config.starting),
            players: [player_a, player_b],
            rewards,
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self, symbol: Symbol) -> &dyn Agent {
        self.players[symbol.index()].as_ref()
    }

    /// Board drawn with the configured glyphs
    pub fn render(&self) -> String {
        self.state.render(self.config.glyphs())
    }

    /// Clear the board; the configured starting symbol moves first.
    pub fn reset(&mut self) -> (Observation, StepInfo) {
        self.state.reset();
        let current = self.state.current_player();
        (self.state.observation(current), self.info())
    }

    /// Apply `action` for whoever is to move.
    ///
    /// Fails with [`GameError::InvalidAction`] (nothing changes, the same
    /// player may try again) or [`GameError::GameOver`] once the game has
    /// ended. The reward is the mover's: win, draw, or zero.
    pub fn play_step(&mut self, action: usize) -> Result<Step, GameError> {
        let applied = self.state.apply_move(action)?;
        let reward = match self.state.outcome() {
            Some(GameOutcome::Winner(_)) => self.rewards.win,
            Some(GameOutcome::Draw) => self.rewards.draw,
            None => 0.0,
        };
        Ok(Step {
            observation: self.state.observation(applied.symbol),
            reward,
            terminated: self.state.is_terminal(),
            truncated: false,
            info: self.info(),
        })
    }

    /// Play one game to the end, asking each seated player for moves.
    ///
    /// An invalid move is logged and the same player is asked again, up to
    /// `max_invalid_retries` times in a row.
    pub fn play_game(&mut self) -> Result<EpisodeResult, SessionError> {
        self.reset();
        self.log_board();

        let mut rewards = Vec::new();
        while !self.state.is_terminal() {
            let symbol = self.state.current_player();
            let step = self.request_move(symbol)?;
            rewards.push(step.reward);
            self.log_board();
        }

        let result = EpisodeResult {
            winner: self.state.winner(),
            win_axis: self.state.win_axis(),
            moves: self.state.move_count(),
            rewards,
        };
        if !self.config.headless {
            match result.winner {
                Some(symbol) => log::info!(
                    "Player {} ({}) wins on the {} axis after {} moves",
                    self.config.glyphs()[symbol.index()],
                    self.player(symbol).name(),
                    result.win_axis.map_or("?", Axis::name),
                    result.moves
                ),
                None => log::info!("It's a draw after {} moves", result.moves),
            }
        }
        Ok(result)
    }

    fn request_move(&mut self, symbol: Symbol) -> Result<Step, SessionError> {
        let max_attempts = self.config.max_invalid_retries;
        let mut attempts = 0;
        loop {
            let valid = self.state.valid_actions();
            let observation = self.state.observation(symbol);
            let action = self.players[symbol.index()].next_move(&valid, &observation)?;
            match self.play_step(action) {
                Ok(step) => return Ok(step),
                Err(GameError::InvalidAction(e)) => {
                    attempts += 1;
                    log::warn!(
                        "{} ({:?}) made an invalid move: {e} [{attempts}/{max_attempts}]",
                        self.players[symbol.index()].name(),
                        symbol
                    );
                    if attempts >= max_attempts {
                        return Err(SessionError::RetriesExhausted { symbol, attempts });
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Human seats draw their own view, so the running board is debug-level.
    fn log_board(&self) {
        if !self.config.headless {
            log::debug!("\n{}", self.render());
        }
    }

    fn info(&self) -> StepInfo {
        StepInfo {
            current_player: self.state.current_player(),
            win_axis: self.state.win_axis(),
            agent_seat: None,
            invalid_action: false,
        }
    }
}

impl Environment for Match {
    fn reset(&mut self) -> (Observation, StepInfo) {
        Match::reset(self)
    }

    fn step(&mut self, action: usize) -> Result<Step, GameError> {
        self.play_step(action)
    }

    fn state(&self) -> &GameState {
        &self.state
    }
}
