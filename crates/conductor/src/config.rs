//! Session settings, read from an optional TOML file.

use std::path::Path;
use std::time::Duration;

use chess_core::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::sonify::{Timing, DEFAULT_CAPTURE_STAGGER_MS, DEFAULT_TEMPO_BPM};

pub const DEFAULT_THINKING_DELAY_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which color the human plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConductorConfig {
    pub human_color: Side,
    pub thinking_delay_ms: u64,
    pub capture_stagger_ms: u32,
    pub tempo_bpm: u32,
    /// Chance the computer takes a capture when it has no check.
    pub capture_chance: f64,
    pub muted: bool,
    /// Fixed seed for the computer's choices; random when absent.
    pub seed: Option<u64>,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            human_color: Side::White,
            thinking_delay_ms: DEFAULT_THINKING_DELAY_MS,
            capture_stagger_ms: DEFAULT_CAPTURE_STAGGER_MS,
            tempo_bpm: DEFAULT_TEMPO_BPM,
            capture_chance: tiered_engine::DEFAULT_CAPTURE_CHANCE,
            muted: false,
            seed: None,
        }
    }
}

impl ConductorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ConductorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tempo_bpm == 0 {
            return Err(ConfigError::Invalid("tempo_bpm must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.capture_chance) {
            return Err(ConfigError::Invalid(format!(
                "capture_chance must be within [0, 1], got {}",
                self.capture_chance
            )));
        }
        Ok(())
    }

    pub fn human_color(&self) -> Color {
        self.human_color.into()
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn timing(&self) -> Timing {
        Timing {
            tempo_bpm: self.tempo_bpm,
            capture_stagger_ms: self.capture_stagger_ms,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
