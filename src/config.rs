//! Game configuration loaded from TOML.

use crate::games::tictactoe::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, Mode, Side};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Board edge length (3 or more).
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Computer opponent or two humans.
    #[serde(default)]
    mode: Mode,

    /// Side the (first) human plays; this side always opens.
    #[serde(default = "default_human_side")]
    human_side: Side,

    /// Seconds allowed per turn.
    #[serde(default = "default_turn_seconds")]
    turn_seconds: u32,

    /// Pause before the computer replies, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// Display name of the human (or of X in two-human mode).
    #[serde(default = "default_player_one_name")]
    #[setters(into)]
    player_one_name: String,

    /// Display name of the computer (or of O in two-human mode).
    #[serde(default = "default_player_two_name")]
    #[setters(into)]
    player_two_name: String,
}

fn default_board_size() -> usize {
    3
}

fn default_human_side() -> Side {
    Side::X
}

fn default_turn_seconds() -> u32 {
    10
}

fn default_opponent_delay_ms() -> u64 {
    300
}

fn default_player_one_name() -> String {
    "Player 1".to_string()
}

fn default_player_two_name() -> String {
    "Player 2".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            mode: Mode::default(),
            human_side: default_human_side(),
            turn_seconds: default_turn_seconds(),
            opponent_delay_ms: default_opponent_delay_ms(),
            player_one_name: default_player_one_name(),
            player_two_name: default_player_two_name(),
        }
    }
}

impl GameConfig {
    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(board_size = config.board_size, mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be within {}..={}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }
        if self.turn_seconds == 0 {
            return Err(ConfigError::new("turn_seconds must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
