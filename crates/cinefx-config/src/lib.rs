//! Configuration for the cinefx terminal host.
//!
//! Stored as TOML in the platform config directory. A missing file means
//! defaults; a present but invalid file is an error.

use std::fs;
use std::path::{Path, PathBuf};

use cinefx_core::{EffectsConfig, Seconds, UniformRange};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading, saving or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redraw and input poll interval.
    pub frame_ms: u64,
    /// Fixed seed for reproducible effects. Unset means a fresh seed per run.
    pub seed: Option<u64>,
    /// Titles of the feature cards laid out on the page.
    pub cards: Vec<String>,
    pub effects: EffectsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_ms: 33,
            seed: None,
            cards: vec![
                "HD Streaming".to_string(),
                "Instant Downloads".to_string(),
                "Smart Search".to_string(),
                "Daily Updates".to_string(),
            ],
            effects: EffectsConfig::default(),
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cinefx").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)
    }

    /// Reject values the effects cannot run with.
    pub fn validate(&self) -> Result<()> {
        let fx = &self.effects;
        if self.frame_ms == 0 {
            return Err(invalid("frame_ms must be greater than zero"));
        }
        check_range("particles.size_px", fx.particles.size_px)?;
        check_range("particles.duration_s", fx.particles.duration_s)?;
        check_range("particles.delay_s", fx.particles.delay_s)?;
        if fx.particles.size_px.min < 0.0 || fx.particles.delay_s.min < 0.0 {
            return Err(invalid("particle size and delay cannot be negative"));
        }
        // A particle that retires the instant it is born would be replaced
        // forever within a single tick.
        if fx.particles.duration_s.min <= 0.0 {
            return Err(invalid("particles.duration_s must be positive"));
        }
        let shortest = Seconds(fx.particles.duration_s.min + fx.particles.delay_s.min);
        if shortest.as_millis() == 0 {
            return Err(invalid(
                "particles.duration_s plus delay_s must last at least 1 ms",
            ));
        }
        if fx.shooting_stars.interval_ms == 0 {
            return Err(invalid("shooting_stars.interval_ms must be greater than zero"));
        }
        if fx.shooting_stars.lifetime_ms == 0 {
            return Err(invalid("shooting_stars.lifetime_ms must be greater than zero"));
        }
        check_range("shooting_stars.left_vw", fx.shooting_stars.left_vw)?;
        check_range("shooting_stars.top_vh", fx.shooting_stars.top_vh)?;
        if fx.tilt.divisor == 0.0 || !fx.tilt.divisor.is_finite() {
            return Err(invalid("tilt.divisor must be a non-zero number"));
        }
        if fx.tilt.scale <= 0.0 || fx.tilt.perspective_px <= 0.0 {
            return Err(invalid("tilt.scale and tilt.perspective_px must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn check_range(name: &str, range: UniformRange) -> Result<()> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(invalid(format!(
            "{name} must have min <= max (got {}..{})",
            range.min, range.max
        )))
    }
}
