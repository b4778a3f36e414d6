//! Configuration management with validation and defaults
//!
//! Nested sections with explicit defaults, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: GameRulesConfig,
    pub payout: PayoutConfig,
    pub server: ServerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: GameRulesConfig::default(),
            payout: PayoutConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Population and question-draw rules per game mode.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRulesConfig {
    /// A level must hold at least this many questions to host a game.
    pub min_level_questions: usize,
    pub question_cap_solo: usize,
    pub question_cap_duel: usize,
    pub question_cap_league: usize,
    pub league_min_players: usize,
    pub league_max_players: usize,
    pub match_code_length: usize,
}

impl Default for GameRulesConfig {
    fn default() -> Self {
        Self {
            min_level_questions: 5,
            question_cap_solo: 10,
            question_cap_duel: 10,
            question_cap_league: 15,
            league_min_players: 3,
            league_max_players: 50,
            match_code_length: 6,
        }
    }
}

/// Prize distribution parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutConfig {
    /// Platform fee as a percentage of the collected pool.
    pub platform_fee_percent: u64,
    /// Two completion times closer than this count as equal when ranking.
    pub tie_window_seconds: f64,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        Self {
            platform_fee_percent: 10,
            tie_window_seconds: 0.5,
        }
    }
}

/// HTTP server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub bind_port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            cors_allowed_origins: vec![],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl EngineConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.payout.platform_fee_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "platform_fee_percent must be 0..=100, got {}",
                self.payout.platform_fee_percent
            )));
        }
        if !(self.payout.tie_window_seconds.is_finite() && self.payout.tie_window_seconds >= 0.0) {
            return Err(ConfigError::Invalid(
                "tie_window_seconds must be a finite non-negative number".to_string(),
            ));
        }
        if self.rules.league_min_players < 3 {
            return Err(ConfigError::Invalid(format!(
                "league_min_players must be at least 3, got {}",
                self.rules.league_min_players
            )));
        }
        if self.rules.league_max_players < self.rules.league_min_players
            || self.rules.league_max_players > 50
        {
            return Err(ConfigError::Invalid(format!(
                "league_max_players must be within {}..=50, got {}",
                self.rules.league_min_players, self.rules.league_max_players
            )));
        }
        if self.rules.min_level_questions == 0 {
            return Err(ConfigError::Invalid(
                "min_level_questions must be positive".to_string(),
            ));
        }
        if self.rules.match_code_length < 4 {
            return Err(ConfigError::Invalid(format!(
                "match_code_length must be at least 4, got {}",
                self.rules.match_code_length
            )));
        }
        Ok(())
    }
}
