//! Configuration loading.
//!
//! Configuration is read from TOML with the following resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.fitzone/config.toml` (user)
//! 3. `/etc/fitzone/config.toml` (system)
//! 4. built-in defaults
//!
//! The API key is loaded separately with mandatory permission checks:
//! 1. `~/.fitzone/secrets.toml` (user, must be 0600 or 0400)
//! 2. `/etc/fitzone/secrets.toml` (system, same rule)
//! 3. `GOOGLE_API_KEY` environment variable

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::knowledge::KnowledgeBase;
use crate::limiter::RateLimitConfig;
use crate::providers::GenerationConfig;
use crate::providers::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::trainer::TrainerBuilder;
use crate::{FitzoneError, Result};

/// Key value shipped in sample configs; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Environment variable consulted when no secrets file holds a key.
pub const API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";

/// Whether `key` looks like a real credential.
pub fn api_key_is_usable(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}

/// Assistant configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Sliding-window quota per identity.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Questions allowed per window (default: 10).
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    /// Window length in seconds (default: 60).
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_requests() -> usize {
    10
}

fn default_window_secs() -> u64 {
    60
}

/// Response cache sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Answer lifetime in seconds (default: 300).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Maximum cached answers (default: 1000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_max_entries() -> u64 {
    1_000
}

/// Generation endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds (default: 20).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_temperature() -> f64 {
    0.8
}

fn default_max_output_tokens() -> u32 {
    600
}

/// Knowledge source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeConfig {
    /// File replacing the built-in gym facts.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Secrets file contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub google: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations, falling back to
    /// defaults when no file exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FitzoneError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            FitzoneError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(FitzoneError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".fitzone").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/fitzone/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig::new()
            .max_requests(self.limits.max_requests)
            .window(Duration::from_secs(self.limits.window_secs))
    }

    pub fn response_cache(&self) -> CacheConfig {
        CacheConfig::new()
            .max_entries(self.cache.max_entries)
            .ttl(Duration::from_secs(self.cache.ttl_secs))
    }

    /// Turn this config plus an optional key into a trainer builder.
    ///
    /// Reads the knowledge file if one is configured.
    pub fn trainer_builder(&self, api_key: Option<String>) -> Result<TrainerBuilder> {
        let knowledge = match &self.knowledge.path {
            Some(path) => KnowledgeBase::from_file(path)?,
            None => KnowledgeBase::fitzone(),
        };

        let mut builder = TrainerBuilder::new()
            .base_url(&self.upstream.base_url)
            .model(&self.upstream.model)
            .timeout(Duration::from_secs(self.upstream.timeout_secs))
            .generation_config(GenerationConfig {
                temperature: self.upstream.temperature,
                max_output_tokens: self.upstream.max_output_tokens,
            })
            .rate_limit(self.rate_limit())
            .cache(self.response_cache())
            .knowledge(knowledge);

        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        Ok(builder)
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Returns empty secrets if no file exists (the env var may still
    /// supply a key).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".fitzone").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/fitzone/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Read a secrets file after checking its permissions.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            FitzoneError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            FitzoneError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            FitzoneError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            return Err(FitzoneError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// Gemini API key from the secrets file, else from `GOOGLE_API_KEY`.
    ///
    /// Placeholder or blank values are returned as-is; the trainer decides
    /// whether they are usable.
    pub fn api_key(&self) -> Option<String> {
        self.google
            .as_ref()
            .map(|s| s.api_key.clone())
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok())
    }
}
