//! Configuration module for eapictl
//!
//! Handles loading and merging connection profiles from multiple sources:
//! - Default values
//! - System configuration (/etc/eapictl/eapi.toml)
//! - User configuration (~/.eapictl.toml, ~/.config/eapictl/eapi.toml)
//! - Project configuration (./eapi.toml)
//! - Environment variables

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::connection::eapi::{EapiTransport, EAPI_DEFAULT_TIMEOUT};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings applied to every connection unless overridden
    pub defaults: Defaults,

    /// Named connection profiles, in file order
    pub connections: IndexMap<String, ConnectionProfile>,
}

/// Default connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// eAPI transport
    pub transport: EapiTransport,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Port override for every connection
    pub port: Option<u16>,

    /// Validate TLS certificates
    pub validate_certs: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            transport: EapiTransport::Https,
            timeout: EAPI_DEFAULT_TIMEOUT,
            port: None,
            validate_certs: true,
        }
    }
}

/// A configuration file as written, before merging.
///
/// Every default is optional so a later file can set any value, including
/// the built-in one, over an earlier file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    defaults: DefaultsFile,
    connections: IndexMap<String, ConnectionProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DefaultsFile {
    transport: Option<EapiTransport>,
    timeout: Option<u64>,
    port: Option<u16>,
    validate_certs: Option<bool>,
}

/// One device to connect to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionProfile {
    /// Host name or address (defaults to the profile name)
    pub host: Option<String>,
    /// Port
    pub port: Option<u16>,
    /// eAPI transport
    pub transport: Option<EapiTransport>,
    /// eAPI username
    pub username: Option<String>,
    /// eAPI password
    pub password: Option<String>,
    /// Password answered to `enable`
    pub enable_password: Option<String>,
    /// Request timeout in seconds
    pub timeout: Option<u64>,
    /// Validate TLS certificates
    pub validate_certs: Option<bool>,
}

impl ConnectionProfile {
    /// The configured host, or `name` when none is set.
    pub fn host_or(&self, name: &str) -> String {
        self.host.clone().unwrap_or_else(|| name.to_string())
    }

    /// Field-wise merge; values set in `other` win.
    fn merge(&self, other: ConnectionProfile) -> ConnectionProfile {
        ConnectionProfile {
            host: other.host.or_else(|| self.host.clone()),
            port: other.port.or(self.port),
            transport: other.transport.or(self.transport),
            username: other.username.or_else(|| self.username.clone()),
            password: other.password.or_else(|| self.password.clone()),
            enable_password: other
                .enable_password
                .or_else(|| self.enable_password.clone()),
            timeout: other.timeout.or(self.timeout),
            validate_certs: other.validate_certs.or(self.validate_certs),
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }

        let mut paths = vec![PathBuf::from("/etc/eapictl/eapi.toml")];

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".eapictl.toml"));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("eapictl").join("eapi.toml"));
        }

        paths.push(PathBuf::from("eapi.toml"));

        if let Ok(env_config) = std::env::var("EAPICTL_CONFIG") {
            paths.insert(0, PathBuf::from(env_config));
        }

        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: ConfigFile = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
            _ => {
                // Try TOML first, then YAML
                toml::from_str(&content)
                    .or_else(|_| serde_yaml::from_str(&content))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
        };

        Ok(self.merge(file_config))
    }

    /// Merge a parsed file into this config; keys the file sets win
    fn merge(&self, other: ConfigFile) -> Config {
        let defaults = Defaults {
            transport: other.defaults.transport.unwrap_or(self.defaults.transport),
            timeout: other.defaults.timeout.unwrap_or(self.defaults.timeout),
            port: other.defaults.port.or(self.defaults.port),
            validate_certs: other
                .defaults
                .validate_certs
                .unwrap_or(self.defaults.validate_certs),
        };

        let mut connections = self.connections.clone();
        for (name, profile) in other.connections {
            let merged = match connections.get(&name) {
                Some(existing) => existing.merge(profile),
                None => profile,
            };
            connections.insert(name, merged);
        }

        Config {
            defaults,
            connections,
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // EAPICTL_TIMEOUT
        if let Ok(timeout) = std::env::var("EAPICTL_TIMEOUT") {
            if let Ok(n) = timeout.parse() {
                self.defaults.timeout = n;
            }
        }

        // EAPICTL_TRANSPORT
        if let Ok(transport) = std::env::var("EAPICTL_TRANSPORT") {
            if let Ok(t) = transport.parse() {
                self.defaults.transport = t;
            }
        }

        // EAPICTL_USERNAME / EAPICTL_PASSWORD fill profiles that lack them
        let username = std::env::var("EAPICTL_USERNAME").ok();
        let password = std::env::var("EAPICTL_PASSWORD").ok();
        for profile in self.connections.values_mut() {
            if profile.username.is_none() {
                profile.username = username.clone();
            }
            if profile.password.is_none() {
                profile.password = password.clone();
            }
        }
    }

    /// Look up a connection profile by name
    pub fn connection(&self, name: &str) -> Option<&ConnectionProfile> {
        self.connections.get(name)
    }

    /// Names of every configured connection, in file order
    pub fn connection_names(&self) -> Vec<&str> {
        self.connections.keys().map(String::as_str).collect()
    }

    /// Load from a specific file only, without environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Config::default().merge_from_file(path.as_ref())
    }
}
