//! Tuning configuration.
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/musictheory/config.toml` (system)
//! 2. `~/.config/musictheory/config.toml` (user)
//! 3. `./musictheory.toml` (local override, or an explicit path)
//! 4. Environment variables (`MUSICTHEORY_*`)
//!
//! # Example Config
//!
//! ```toml
//! reference_hz = 442.0
//! default_octave = 4
//! convention = "scientific"
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::parser::DEFAULT_OCTAVE;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// How octave numbers line up with MIDI numbers and frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// Octaves count from A. MIDI is `69 + index + (octave - 5) * 12` and
    /// frequency is `reference * 2^((index + (octave - 4) * 12) / 12)`.
    #[default]
    Legacy,
    /// Scientific pitch notation: octaves change at C, A4 = MIDI 69.
    Scientific,
}

impl Convention {
    pub fn parse(s: &str) -> Option<Convention> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Some(Convention::Legacy),
            "scientific" | "spn" => Some(Convention::Scientific),
            _ => None,
        }
    }
}

/// Reference pitch and octave handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TheoryConfig {
    /// Frequency of A4 in Hz.
    pub reference_hz: f64,
    /// Octave used when a note name has no trailing digit (0-9).
    pub default_octave: u8,
    pub convention: Convention,
}

impl Default for TheoryConfig {
    fn default() -> Self {
        TheoryConfig {
            reference_hz: 440.0,
            default_octave: DEFAULT_OCTAVE,
            convention: Convention::Legacy,
        }
    }
}

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

impl TheoryConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration, with `config_path` replacing the local override.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = TheoryConfig::default();

        // Merge at the key level so a later file only overrides what it sets
        let mut merged = toml::Table::new();
        for path in config_files(config_path) {
            merged.extend(load_table(&path)?);
            info!(path = %path.display(), "loaded music theory config");
            sources.files.push(path);
        }

        if let Some(last) = sources.files.last() {
            config = toml::Value::Table(merged)
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::Parse {
                    path: last.clone(),
                    message: e.to_string(),
                })?;
        }

        apply_env_overrides(&mut config, &mut sources);
        config.validate()?;

        Ok((config, sources))
    }

    /// Parse config from a TOML string. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reject values the conversions cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.reference_hz.is_finite() || self.reference_hz <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "reference_hz",
                message: format!("must be a positive frequency, got {}", self.reference_hz),
            });
        }
        if self.default_octave > 9 {
            return Err(ConfigError::Invalid {
                field: "default_octave",
                message: format!("must be a single digit, got {}", self.default_octave),
            });
        }
        Ok(())
    }
}

const SYSTEM_CONFIG: &str = "/etc/musictheory/config.toml";
const LOCAL_CONFIG: &str = "musictheory.toml";

/// Config files to load, in order: system, user, then either the local
/// `musictheory.toml` or `explicit`.
///
/// Standard locations are skipped when absent. `explicit` is always
/// returned so that a missing file surfaces as [`ConfigError::FileRead`].
pub fn config_files(explicit: Option<&Path>) -> Vec<PathBuf> {
    let user = directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("musictheory").join("config.toml"));
    let last = match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(LOCAL_CONFIG),
    };

    let mut files: Vec<PathBuf> = [Some(PathBuf::from(SYSTEM_CONFIG)), user]
        .into_iter()
        .flatten()
        .filter(|path| path.exists())
        .collect();

    if explicit.is_some() || last.exists() {
        files.push(last);
    }
    files
}

/// Load config from a TOML file.
pub fn load_from_file(path: &Path) -> Result<TheoryConfig, ConfigError> {
    toml::Value::Table(load_table(path)?)
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Read a TOML file as a raw table.
fn load_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply `MUSICTHEORY_*` environment variable overrides to config.
pub fn apply_env_overrides(config: &mut TheoryConfig, sources: &mut ConfigSources) {
    apply_overrides(config, sources, |key| env::var(key).ok());
}

/// Apply overrides from any key lookup. Unparseable values are skipped.
pub fn apply_overrides<F>(config: &mut TheoryConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("MUSICTHEORY_REFERENCE_HZ") {
        match v.trim().parse() {
            Ok(hz) => {
                config.reference_hz = hz;
                sources.env_overrides.push("MUSICTHEORY_REFERENCE_HZ".to_string());
            }
            Err(_) => warn!(value = %v, "ignoring unparseable MUSICTHEORY_REFERENCE_HZ"),
        }
    }
    if let Some(v) = lookup("MUSICTHEORY_DEFAULT_OCTAVE") {
        match v.trim().parse() {
            Ok(octave) => {
                config.default_octave = octave;
                sources.env_overrides.push("MUSICTHEORY_DEFAULT_OCTAVE".to_string());
            }
            Err(_) => warn!(value = %v, "ignoring unparseable MUSICTHEORY_DEFAULT_OCTAVE"),
        }
    }
    if let Some(v) = lookup("MUSICTHEORY_CONVENTION") {
        match Convention::parse(&v) {
            Some(convention) => {
                config.convention = convention;
                sources.env_overrides.push("MUSICTHEORY_CONVENTION".to_string());
            }
            None => warn!(value = %v, "ignoring unknown MUSICTHEORY_CONVENTION"),
        }
    }
}
