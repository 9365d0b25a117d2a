//! # Config - merge and generator settings
//!
//! Typed settings shared by the engine and the CLI. Every value has a
//! default and can be overridden through environment variables:
//!
//! ```text
//! SEGMERGE_STRATEGY   merge strategy: naive | dedup   (default: "dedup")
//! SEGMERGE_VALIDATE   check segment key order          (default: "false")
//! SEGMERGE_SEGMENTS   generated segment count          (default: 15)
//! SEGMERGE_KEYS       generated key pool size          (default: 100)
//! SEGMERGE_KEY_LEN    generated key length             (default: 5)
//! SEGMERGE_WINDOW     max keys per generated segment   (default: 15)
//! SEGMERGE_SEED       generator RNG seed               (default: random)
//! ```
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_STRATEGY: &str = "SEGMERGE_STRATEGY";
pub const ENV_VALIDATE: &str = "SEGMERGE_VALIDATE";
pub const ENV_SEGMENTS: &str = "SEGMERGE_SEGMENTS";
pub const ENV_KEYS: &str = "SEGMERGE_KEYS";
pub const ENV_KEY_LEN: &str = "SEGMERGE_KEY_LEN";
pub const ENV_WINDOW: &str = "SEGMERGE_WINDOW";
pub const ENV_SEED: &str = "SEGMERGE_SEED";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown merge strategy {0:?} (expected \"naive\" or \"dedup\")")]
    UnknownStrategy(String),

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Which merge algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every record goes through the queue; duplicates dropped on output.
    Naive,
    /// One queue node per distinct key; shadowed records skipped on input.
    #[default]
    Deduplicated,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Naive, Strategy::Deduplicated];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Deduplicated => "dedup",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(Strategy::Naive),
            "dedup" | "deduplicated" | "optimized" => Ok(Strategy::Deduplicated),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Settings for a single merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeConfig {
    pub strategy: Strategy,
    /// Fail fast on segments that are not strictly ascending.
    pub validate_order: bool,
}

impl MergeConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            validate_order: false,
        }
    }

    pub fn with_validation(mut self, validate_order: bool) -> Self {
        self.validate_order = validate_order;
        self
    }

    /// Reads `SEGMERGE_STRATEGY` and `SEGMERGE_VALIDATE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            strategy: match lookup(ENV_STRATEGY) {
                Some(s) => s.parse()?,
                None => defaults.strategy,
            },
            validate_order: parse_or(&lookup, ENV_VALIDATE, defaults.validate_order)?,
        })
    }
}

/// Shape of the synthetic segments produced for benchmarks and demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub segments: usize,
    /// Number of distinct keys to draw segment windows from.
    pub key_pool: usize,
    pub key_len: usize,
    /// Upper bound on keys per segment.
    pub max_window: usize,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            segments: 15,
            key_pool: 100,
            key_len: 5,
            max_window: 15,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Reads the `SEGMERGE_*` generator variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let seed = match lookup(ENV_SEED) {
            Some(v) => Some(parse_value(ENV_SEED, &v)?),
            None => d.seed,
        };
        Ok(Self {
            segments: parse_or(&lookup, ENV_SEGMENTS, d.segments)?,
            key_pool: parse_or(&lookup, ENV_KEYS, d.key_pool)?,
            key_len: parse_or(&lookup, ENV_KEY_LEN, d.key_len)?,
            max_window: parse_or(&lookup, ENV_WINDOW, d.max_window)?,
            seed,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(v) => parse_value(name, &v),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}
