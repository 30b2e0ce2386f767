use std::path::PathBuf;

use crate::game::{GameError, Symbol};

/// Errors a player can raise when it cannot produce a move at all.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("input closed before a move was chosen")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model error: {0}")]
    Model(String),
}

/// Malformed human input. Only ever seen inside the prompt loop, which
/// reports it and asks again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("'{0}' is not a column number")]
    Parse(String),

    #[error("column {0} is not between 1 and 7")]
    OutOfRange(i64),
}

/// Errors that end a game loop (play, evaluate, or train).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("game error: {0}")]
    Game(#[from] GameError),

    #[error("player error: {0}")]
    Agent(#[from] AgentError),

    #[error("player {symbol:?} gave {attempts} invalid moves in a row")]
    RetriesExhausted { symbol: Symbol, attempts: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MoveError;

    #[test]
    fn test_input_error_display() {
        let err = InputError::Parse("abc".to_string());
        assert_eq!(err.to_string(), "'abc' is not a column number");
        assert_eq!(
            InputError::OutOfRange(9).to_string(),
            "column 9 is not between 1 and 7"
        );
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::from(GameError::InvalidAction(MoveError::ColumnFull(4)));
        assert_eq!(err.to_string(), "game error: invalid action: column 4 is full");

        let err = SessionError::RetriesExhausted {
            symbol: Symbol::B,
            attempts: 3,
        };
        assert_eq!(err.to_string(), "player B gave 3 invalid moves in a row");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.max_invalid_retries must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.max_invalid_retries must be > 0"
        );
    }
}
