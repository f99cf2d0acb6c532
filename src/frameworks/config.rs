use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("BLAST_JUMPER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn config_path() -> PathBuf {
    env::var("BLAST_JUMPER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("blast_jumper.toml"))
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const DETONATION_CHANNEL_CAPACITY: usize = 256;

// 20 host ticks per second.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Knockback settings read from the `[effect]` table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Search radius around a detonation, in blocks.
    pub radius: f64,
    /// Speed given to each affected object, in blocks per tick.
    pub power: f64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            power: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct BlastConfig {
    #[serde(default)]
    pub effect: EffectConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(&'static str),
}

impl BlastConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: BlastConfig = toml::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(self.effect.radius.is_finite() && self.effect.radius > 0.0) {
            return Err(ConfigError::Invalid("effect.radius must be a positive number"));
        }
        if !(self.effect.power.is_finite() && self.effect.power > 0.0) {
            return Err(ConfigError::Invalid("effect.power must be a positive number"));
        }
        Ok(self)
    }
}

/// Reads the effect config once at startup. A missing file falls back to defaults.
pub fn load_blast_config(path: &Path) -> Result<BlastConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => BlastConfig::from_toml_str(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "config file not found; using defaults");
            Ok(BlastConfig::default())
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}
