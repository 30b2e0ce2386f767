use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::game::Symbol;

use super::Match;

const TABLE_WIDTH: usize = 40;

/// Evaluation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Games per evaluation run
    pub games: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig { games: 100 }
    }
}

/// Aggregate results of an evaluation run, counted from one symbol's side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvalStats {
    pub agent: Option<Symbol>,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl EvalStats {
    fn ratio(&self, count: usize) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        count as f32 / self.games as f32
    }

    pub fn win_ratio(&self) -> f32 {
        self.ratio(self.wins)
    }

    pub fn loss_ratio(&self) -> f32 {
        self.ratio(self.losses)
    }

    pub fn draw_ratio(&self) -> f32 {
        self.ratio(self.draws)
    }

    pub fn average_moves(&self) -> f32 {
        self.ratio(self.total_moves)
    }

    fn record(&mut self, winner: Option<Symbol>, moves: usize, agent: Symbol) {
        self.games += 1;
        self.total_moves += moves;
        match winner {
            None => self.draws += 1,
            Some(w) if w == agent => self.wins += 1,
            Some(_) => self.losses += 1,
        }
    }
}

impl fmt::Display for EvalStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = TABLE_WIDTH - 4;
        let rule = "-".repeat(TABLE_WIDTH);
        let title = match self.agent {
            Some(symbol) => format!("Evaluation as {symbol:?} ({} games)", self.games),
            None => format!("Evaluation ({} games)", self.games),
        };
        writeln!(f, "{rule}")?;
        writeln!(f, "| {title:<inner$} |")?;
        for (label, value) in [
            ("Win ratio", self.win_ratio()),
            ("Loss ratio", self.loss_ratio()),
            ("Draw ratio", self.draw_ratio()),
            ("Avg moves", self.average_moves()),
        ] {
            let cell = format!("{label:<12}| {value:.3}");
            writeln!(f, "| {cell:<inner$} |")?;
        }
        write!(f, "{rule}")
    }
}

impl Match {
    /// Play `games` full games between the seated players and count results
    /// from `agent`'s side. Seats stay fixed; the configured starting symbol
    /// opens every game.
    pub fn evaluate_run(&mut self, games: usize, agent: Symbol) -> Result<EvalStats, SessionError> {
        let mut stats = EvalStats {
            agent: Some(agent),
            ..EvalStats::default()
        };
        for game in 1..=games {
            let result = self.play_game()?;
            stats.record(result.winner, result.moves, agent);
            log::debug!(
                "evaluation game {game}/{games}: winner {:?} in {} moves",
                result.winner,
                result.moves
            );
        }
        log::info!(
            "evaluation finished: {} wins, {} losses, {} draws over {} games",
            stats.wins,
            stats.losses,
            stats.draws,
            stats.games
        );
        Ok(stats)
    }
}
