use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::Symbol;
use crate::reward::RewardWeights;
use crate::session::{EvalConfig, TerminalRewards};
use crate::training::trainer::TrainerConfig;

/// Board-level settings shared by every mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Symbol that moves first after every reset
    pub starting: Symbol,
    pub glyph_a: char,
    pub glyph_b: char,
    /// Skip board rendering in logs
    pub headless: bool,
    /// Fixed RNG seed; drawn from the OS when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Invalid moves tolerated in a row before an interactive game gives up
    pub max_invalid_retries: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting: Symbol::A,
            glyph_a: Symbol::A.glyph(),
            glyph_b: Symbol::B.glyph(),
            headless: false,
            seed: None,
            max_invalid_retries: 10,
        }
    }
}

impl GameConfig {
    pub fn glyphs(&self) -> [char; 2] {
        [self.glyph_a, self.glyph_b]
    }

    /// Glyph pair ordered as (own, opponent) for `symbol`.
    pub fn glyphs_for(&self, symbol: Symbol) -> [char; 2] {
        let glyphs = self.glyphs();
        [glyphs[symbol.index()], glyphs[symbol.other().index()]]
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub rewards: TerminalRewards,
    pub shaping: RewardWeights,
    pub training: TrainerConfig,
    pub evaluation: EvalConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [a, b] = self.game.glyphs();
        for glyph in [a, b] {
            if glyph.is_whitespace() || glyph == '|' || glyph == '-' {
                return Err(ConfigError::Validation(format!(
                    "game glyph '{glyph}' would be unreadable on the board"
                )));
            }
        }
        if a == b {
            return Err(ConfigError::Validation(
                "game.glyph_a and game.glyph_b must differ".into(),
            ));
        }
        if self.game.max_invalid_retries == 0 {
            return Err(ConfigError::Validation(
                "game.max_invalid_retries must be > 0".into(),
            ));
        }

        if self.rewards.win <= self.rewards.draw || self.rewards.draw <= self.rewards.loss {
            return Err(ConfigError::Validation(
                "rewards must satisfy win > draw > loss".into(),
            ));
        }
        if self.rewards.invalid_action > 0.0 {
            return Err(ConfigError::Validation(
                "rewards.invalid_action must be <= 0".into(),
            ));
        }
        if self.rewards.after_terminal >= 0.0 {
            return Err(ConfigError::Validation(
                "rewards.after_terminal must be < 0".into(),
            ));
        }

        self.shaping.validate()?;

        if self.training.num_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.num_episodes must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if self.training.save_interval == 0 {
            return Err(ConfigError::Validation(
                "training.save_interval must be > 0".into(),
            ));
        }
        if self.training.max_steps_per_episode == 0 {
            return Err(ConfigError::Validation(
                "training.max_steps_per_episode must be > 0".into(),
            ));
        }
        if self.evaluation.games == 0 {
            return Err(ConfigError::Validation(
                "evaluation.games must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
