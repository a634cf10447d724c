//! Configuration management for damagedetect.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::IpAddr;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name.
const CONFIG_DIR_NAME: &str = "damagedetect";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "DAMAGEDETECT_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `DAMAGEDETECT_`, `__` between
///    section and key, e.g. `DAMAGEDETECT_SERVER__PORT=8080`)
/// 2. TOML config file at `~/.config/damagedetect/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Static site metadata.
    pub site: SiteConfig,
    /// Where status payloads come from.
    pub feed: FeedConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_address: String,
    /// Port to listen on. 0 picks a free port.
    pub port: u16,
}

/// Static site metadata rendered into every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Product name.
    pub name: String,
    /// One-line description, used as the page meta description.
    pub description: String,
    /// Primary navigation.
    pub nav_items: Vec<NavItem>,
    /// Secondary (menu) navigation.
    pub nav_menu_items: Vec<NavItem>,
    /// External links.
    pub links: SiteLinks,
}

/// A navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Link text.
    pub label: String,
    /// Same-origin path, starting with `/`.
    pub href: String,
}

/// External links shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteLinks {
    /// Source repository.
    pub github: String,
    /// Documentation.
    pub docs: String,
    /// Community chat.
    pub discord: String,
}

/// Which status feed backs the endpoints and pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// Canned payloads compiled into the binary.
    #[default]
    Builtin,
    /// Canned payloads read from JSON files in `feed.directory`.
    Directory,
}

/// Status feed configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed implementation to use.
    pub source: FeedSource,
    /// Directory holding the payload files when `source = "directory"`.
    pub directory: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "DamageDetect".to_string(),
            description: "Fly safe with aircraft damage detection as part of your line \
                          maintenance with DamageDetect."
                .to_string(),
            nav_items: vec![
                NavItem::new("Home", "/"),
                NavItem::new("Dashboard", "/dashboard"),
                NavItem::new("Drones", "/drones"),
            ],
            nav_menu_items: vec![
                NavItem::new("Profile", "/profile"),
                NavItem::new("Dashboard", "/dashboard"),
            ],
            links: SiteLinks::default(),
        }
    }
}

impl Default for SiteLinks {
    fn default() -> Self {
        Self {
            github: "https://github.com/samsaq/Elevating_Aerospace_Artemis_Drone_Bandwith_Optimization"
                .to_string(),
            docs: "https://nextui.org".to_string(),
            discord: "https://discord.gg/2bFZDA5K".to_string(),
        }
    }
}

impl NavItem {
    /// Create a navigation entry.
    #[must_use]
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.parse::<IpAddr>().is_err() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "bind_address must be an IP address, got '{}'",
                    self.server.bind_address
                ),
            });
        }

        if self.site.name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "site name must not be empty".to_string(),
            });
        }

        for item in self.site.nav_items.iter().chain(&self.site.nav_menu_items) {
            if !item.href.starts_with('/') {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "nav item '{}' must link to a local path, got '{}'",
                        item.label, item.href
                    ),
                });
            }
        }

        if self.feed.source == FeedSource::Directory && self.feed.directory.is_none() {
            return Err(Error::ConfigValidation {
                message: "feed.directory is required when feed.source = \"directory\""
                    .to_string(),
            });
        }

        Ok(())
    }

    /// The `host:port` the server listens on.
    #[must_use]
    pub fn listen_address(&self) -> String {
        match self.server.bind_address.parse::<IpAddr>() {
            Ok(IpAddr::V6(addr)) => format!("[{addr}]:{}", self.server.port),
            _ => format!("{}:{}", self.server.bind_address, self.server.port),
        }
    }
}
