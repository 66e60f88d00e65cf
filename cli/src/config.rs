use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use interpreter::{Encoding, FizzBuzzRange, RuntimeError};

/// Settings for `fizzbuzz run`, loaded from a TOML file.
///
/// ```toml
/// start = 1
/// end = 100
/// encoding = "continuation"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub start: Option<u64>,

    #[serde(default)]
    pub end: Option<u64>,

    #[serde(default)]
    pub encoding: Option<Encoding>,
}

/// The `--encoding` flag: one encoding, or `all` to print every encoding's
/// sequence in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingChoice {
    One(Encoding),
    All,
}

impl FromStr for EncodingChoice {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(EncodingChoice::All)
        } else {
            s.parse().map(EncodingChoice::One)
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, message: String },
    Parse { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "cannot read config '{}': {}", path, message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "invalid config '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: display.clone(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&source).map_err(|message| ConfigError::Parse {
            path: display,
            message,
        })?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml(source: &str) -> Result<Self, String> {
        toml::from_str(source).map_err(|e| e.to_string())
    }

    /// Apply command-line overrides on top of the file values and defaults.
    /// Returns the range and the encodings to run, in order.
    pub fn resolve(
        &self,
        start: Option<u64>,
        end: Option<u64>,
        encoding: Option<EncodingChoice>,
    ) -> Result<(FizzBuzzRange, Vec<Encoding>), RuntimeError> {
        let start = start
            .or(self.start)
            .unwrap_or(FizzBuzzRange::DEFAULT_START);
        let end = end.or(self.end).unwrap_or(FizzBuzzRange::DEFAULT_END);
        let encodings = match encoding {
            Some(EncodingChoice::All) => Encoding::ALL.to_vec(),
            Some(EncodingChoice::One(encoding)) => vec![encoding],
            None => vec![self.encoding.unwrap_or_default()],
        };
        Ok((FizzBuzzRange::new(start, end)?, encodings))
    }
}
