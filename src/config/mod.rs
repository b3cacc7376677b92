//
//  upcloud-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads API credentials and client settings from a TOML file stored in the
//! platform-specific configuration directory, with environment overrides.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/upctl/config.toml`
//! - **macOS**: `~/Library/Application Support/com.upcloud.upctl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\upcloud\upctl\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! username = "api-user"
//! password = "secret"
//! api_url = "https://api.upcloud.com/1.3"
//! timeout = 60
//! poll_interval = 5
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `UPCLOUD_USERNAME` | `username` |
//! | `UPCLOUD_PASSWORD` | `password` |
//! | `UPCLOUD_API_URL` | `api_url` |
//!
//! Environment values win over the file.

mod file;

pub use file::*;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::client::{Credentials, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};

/// Environment variable holding the API username.
pub const ENV_USERNAME: &str = "UPCLOUD_USERNAME";
/// Environment variable holding the API password.
pub const ENV_PASSWORD: &str = "UPCLOUD_PASSWORD";
/// Environment variable holding the API root URL.
pub const ENV_API_URL: &str = "UPCLOUD_API_URL";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`].
pub const CONFIG_KEYS: &[&str] = &["username", "password", "api_url", "timeout", "poll_interval"];

/// Returned by [`Config::credentials`] when no API credentials are configured.
#[derive(Debug, thiserror::Error)]
#[error("UpCloud credentials not configured. Set UPCLOUD_USERNAME and UPCLOUD_PASSWORD, or add them to the config file")]
pub struct MissingCredentials;

/// Client configuration.
///
/// All fields use serde defaults, so a partial or empty file is valid.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `username` | `None` |
/// | `password` | `None` |
/// | `api_url` | `https://api.upcloud.com/1.3` |
/// | `timeout` | `60` (seconds) |
/// | `poll_interval` | `5` (seconds) |
///
/// # Examples
///
/// ```rust
/// use upcloud_api::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.api_url, "https://api.upcloud.com/1.3");
/// assert!(config.credentials().is_err());
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// API username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// API root URL.
    pub api_url: String,

    /// Per-request transport timeout, in seconds.
    pub timeout: u64,

    /// Delay between wait-loop polls, in seconds.
    pub poll_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT.as_secs(),
            poll_interval: DEFAULT_POLL_INTERVAL.as_secs(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Config {
    /// Loads the configuration from the default location and applies the
    /// environment overrides.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the configuration directory cannot be determined.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    /// Loads the configuration from `path` without environment overrides.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use upcloud_api::config::Config;
    ///
    /// let config = Config::load_from(std::path::Path::new("/etc/upctl.toml"))?;
    /// println!("API: {}", config.api_url);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
    }

    /// Writes the configuration to `path` as pretty TOML.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path of the default configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "upcloud", "upctl")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Applies `UPCLOUD_USERNAME`, `UPCLOUD_PASSWORD` and `UPCLOUD_API_URL`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary lookup; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(api_url) = lookup(ENV_API_URL) {
            self.api_url = api_url;
        }
    }

    /// Per-request transport timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Delay between wait-loop polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Checks the settings a client is built from.
    ///
    /// # Errors
    ///
    /// Fails when `timeout` or `poll_interval` is zero: the first would time
    /// out every request at once, the second would poll without pause.
    pub fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            bail!("timeout must be at least 1 second");
        }
        if self.poll_interval == 0 {
            bail!("poll_interval must be at least 1 second");
        }
        Ok(())
    }

    /// Returns the value stored under `key`, or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Fails for keys outside [`CONFIG_KEYS`].
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "username" => self.username.clone(),
            "password" => self.password.clone(),
            "api_url" => Some(self.api_url.clone()),
            "timeout" => Some(self.timeout.to_string()),
            "poll_interval" => Some(self.poll_interval.to_string()),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys, an invalid `api_url`, and durations that are
    /// not a positive number of seconds.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "username" => self.username = Some(value.to_string()),
            "password" => self.password = Some(value.to_string()),
            "api_url" => {
                Url::parse(value).with_context(|| format!("invalid api_url {}", value))?;
                self.api_url = value.to_string();
            }
            "timeout" => self.timeout = positive_seconds(key, value)?,
            "poll_interval" => self.poll_interval = positive_seconds(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Resets `key` to its default.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let defaults = Self::default();
        match key {
            "username" => self.username = None,
            "password" => self.password = None,
            "api_url" => self.api_url = defaults.api_url,
            "timeout" => self.timeout = defaults.timeout,
            "poll_interval" => self.poll_interval = defaults.poll_interval,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Returns the configured credentials.
    ///
    /// # Errors
    ///
    /// Fails when either the username or the password is missing.
    pub fn credentials(&self) -> Result<Credentials> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Credentials::new(username, password))
            }
            _ => Err(MissingCredentials.into()),
        }
    }
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown configuration key '{}'. Valid keys: {}",
        key,
        CONFIG_KEYS.join(", ")
    )
}

fn positive_seconds(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => bail!("{} must be a whole number of seconds greater than zero", key),
    }
}
