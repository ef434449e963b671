//! Configuration loading and management.
//!
//! Layers, lowest precedence first: built-in defaults, the `key=value`
//! config file (`~/.wakatime.conf`), then `WAKATIME_*` environment variables.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Serialized};
use figment::value::{Dict, Map, Value};
use figment::{Figment, Metadata, Profile, Provider};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key used when `--key` is not given.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_as_string"
    )]
    pub api_key: Option<String>,
    /// Endpoint events are posted to.
    pub api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: wt_api::DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, reading `config_path` instead of the default file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_path.map(Path::to_path_buf).or_else(default_config_path) {
            figment = figment.merge(KeyValueFile::new(path));
        }

        figment = figment.merge(Env::prefixed("WAKATIME_").only(&["api_key", "api_url"]));

        figment.extract()
    }
}

/// Scalar value as figment parses it from the environment.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Signed(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Accepts `WAKATIME_API_KEY=12345` or `=true` as text.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| value.to_string()))
}

/// Returns `~/.wakatime.conf`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wakatime.conf"))
}

/// Figment provider for the line-oriented `key=value` config file.
///
/// Only `api_key` is read. A missing or unreadable file contributes nothing.
#[derive(Debug, Clone)]
pub struct KeyValueFile {
    path: PathBuf,
}

impl KeyValueFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not read from config file"
                );
                None
            }
        }
    }
}

impl Provider for KeyValueFile {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("config file {}", self.path.display()))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        if let Some(api_key) = self.read().as_deref().and_then(parse_api_key) {
            dict.insert("api_key".to_string(), Value::from(api_key));
        }
        Ok(Profile::Default.collect(dict))
    }
}

/// Extracts `api_key` from `key=value` lines; the last occurrence wins.
pub fn parse_api_key(contents: &str) -> Option<String> {
    contents
        .lines()
        .filter_map(|line| line.split_once('='))
        .filter(|(key, _)| key.trim() == "api_key")
        .map(|(_, value)| value.trim().to_string())
        .next_back()
}
