use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ai::{Agent, Transition};
use crate::error::SessionError;
use crate::session::TrainEnv;
use crate::training::metrics::{EpisodeSummary, TrainingMetrics};

/// Trainer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: usize,
    pub log_interval: usize,
    /// Ask the learner to persist its model every this many episodes
    pub save_interval: usize,
    pub model_dir: PathBuf,
    /// Agent steps before an episode is cut off as truncated
    pub max_steps_per_episode: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 10_000,
            log_interval: 100,
            save_interval: 1000,
            model_dir: PathBuf::from("models"),
            max_steps_per_episode: 100,
        }
    }
}

/// Episode loop for a learning player against the environment's opponent.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Run the full training loop. The learner sees every step through
    /// [`Agent::learn`]; a learner that cannot produce a move aborts the run.
    pub fn train(
        &self,
        env: &mut TrainEnv,
        learner: &mut dyn Agent,
    ) -> Result<TrainingMetrics, SessionError> {
        let mut metrics = TrainingMetrics::with_capacity(self.config.log_interval.max(1));
        let total = self.config.num_episodes;

        log::info!(
            "Starting training of {} against {} for {} episodes",
            learner.name(),
            env.opponent().name(),
            total
        );

        for episode in 1..=total {
            let summary = self.play_episode(episode, env, learner)?;
            metrics.record_episode(summary);

            if episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                log::info!(
                    "Episode {}/{} | win: {:.1}% | loss: {:.1}% | draw: {:.1}% | \
                     first: {:.1}% | avg_len: {:.1} | avg_reward: {:.2}",
                    episode,
                    total,
                    metrics.win_rate(window) * 100.0,
                    metrics.loss_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.first_seat_rate(window) * 100.0,
                    metrics.average_game_length(window),
                    metrics.average_reward(window),
                );
            }

            if episode % self.config.save_interval == 0 {
                self.save(learner, episode);
            }
        }

        let axes: Vec<String> = metrics
            .axis_counts()
            .iter()
            .map(|(axis, count)| format!("{}={count}", axis.name()))
            .collect();
        log::info!(
            "Training complete. Total episodes: {} | wins by axis: {}",
            metrics.total_episodes(),
            axes.join(", ")
        );
        Ok(metrics)
    }

    /// Play one episode, feeding each step to the learner.
    fn play_episode(
        &self,
        episode: usize,
        env: &mut TrainEnv,
        learner: &mut dyn Agent,
    ) -> Result<EpisodeSummary, SessionError> {
        let (mut observation, info) = env.reset();
        let agent_seat = info.agent_seat.unwrap_or_else(|| env.agent_seat());
        let mut total_reward = 0.0;
        let mut steps = 0;

        let truncated = loop {
            let valid = env.state().valid_actions();
            let action = learner.next_move(&valid, &observation)?;
            let step = env.train_step(action);
            steps += 1;
            total_reward += step.reward;
            let truncated = !step.terminated && steps >= self.config.max_steps_per_episode;

            learner.learn(&Transition {
                episode,
                state: observation,
                action,
                reward: step.reward,
                next_state: step.observation,
                done: step.terminated || truncated,
            });
            observation = step.observation;

            if step.terminated || truncated {
                break truncated;
            }
        };

        if truncated {
            log::debug!("episode {episode} truncated after {steps} steps");
        }

        Ok(EpisodeSummary {
            winner: env.state().winner(),
            agent: env.agent_symbol(),
            agent_seat,
            win_axis: env.state().win_axis(),
            steps,
            game_length: env.state().move_count(),
            total_reward,
            truncated,
        })
    }

    fn save(&self, learner: &dyn Agent, episode: usize) {
        let path = model_path(&self.config.model_dir, episode);
        if let Err(e) = std::fs::create_dir_all(&self.config.model_dir) {
            log::warn!("could not create {}: {e}", self.config.model_dir.display());
            return;
        }
        match learner.save_model(&path) {
            Ok(()) => log::info!("  >> Model saved: {}", path.display()),
            Err(e) => log::warn!("  >> Model save failed: {e}"),
        }
    }
}

/// Location handed to the learner for the save after `episode`.
pub fn model_path(model_dir: &Path, episode: usize) -> PathBuf {
    model_dir.join(format!("episode_{episode:06}"))
}
