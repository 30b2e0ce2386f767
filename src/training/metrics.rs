use std::collections::VecDeque;

use crate::game::{Axis, Symbol};
use crate::session::Seat;

/// Result of a single training episode, from the learner's side.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub winner: Option<Symbol>,
    pub agent: Symbol,
    pub agent_seat: Seat,
    pub win_axis: Option<Axis>,
    /// Agent steps taken, invalid ones included
    pub steps: usize,
    /// Moves on the board at the end, both players
    pub game_length: usize,
    pub total_reward: f32,
    /// Episode hit the step cap before the game ended
    pub truncated: bool,
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episodes: VecDeque<EpisodeSummary>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
    axis_counts: [usize; 4],
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episodes: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
            axis_counts: [0; 4],
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, summary: EpisodeSummary) {
        self.total_episodes += 1;
        if let Some(axis) = summary.win_axis {
            self.axis_counts[axis_slot(axis)] += 1;
        }
        self.episodes.push_back(summary);
        if self.episodes.len() > self.capacity {
            self.episodes.pop_front();
        }
    }

    fn rate(&self, last_n: usize, pred: impl Fn(&EpisodeSummary) -> bool) -> f32 {
        let n = self.episodes.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.episodes.iter().rev().take(n).filter(|e| pred(e)).count();
        hits as f32 / n as f32
    }

    fn mean(&self, last_n: usize, value: impl Fn(&EpisodeSummary) -> f32) -> f32 {
        let n = self.episodes.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.episodes.iter().rev().take(n).map(value).sum();
        sum / n as f32
    }

    /// Learner win rate in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |e| e.winner == Some(e.agent))
    }

    /// Learner loss rate in the last N episodes.
    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |e| e.winner.is_some_and(|w| w != e.agent))
    }

    /// Draw rate in the last N episodes. Truncated episodes are not draws.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |e| e.winner.is_none() && !e.truncated)
    }

    /// Share of the last N episodes where the learner moved first.
    pub fn first_seat_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |e| e.agent_seat == Seat::First)
    }

    pub fn average_game_length(&self, last_n: usize) -> f32 {
        self.mean(last_n, |e| e.game_length as f32)
    }

    pub fn average_reward(&self, last_n: usize) -> f32 {
        self.mean(last_n, |e| e.total_reward)
    }

    /// Lifetime count of wins (either side) per axis.
    pub fn axis_counts(&self) -> [(Axis, usize); 4] {
        Axis::ALL.map(|axis| (axis, self.axis_counts[axis_slot(axis)]))
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn axis_slot(axis: Axis) -> usize {
    match axis {
        Axis::Vertical => 0,
        Axis::Horizontal => 1,
        Axis::DiagonalUp => 2,
        Axis::DiagonalDown => 3,
    }
}
