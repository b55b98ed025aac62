//! Configuration for the lookup proxy.

use anyhow::{Context, Result};
use lookup_core::{ConfigError, LookupKind, ProviderTable};
use serde::Deserialize;
use std::time::Duration;

/// Proxy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound HTTP configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Provider URL template overrides
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Per-request timeout. Unset means the HTTP client default.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// User-Agent sent to providers and image hosts
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Per-kind URL templates; each must contain `{input}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    pub phone_basic: Option<String>,
    pub phone_truecaller: Option<String>,
    pub bank_bin: Option<String>,
    pub bank_ifsc: Option<String>,
    pub instagram_profile: Option<String>,
    pub instagram_posts: Option<String>,
    pub national_id_family: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

// Default implementations
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    9002
}

fn default_user_agent() -> String {
    concat!("lookup-proxy/", env!("CARGO_PKG_VERSION")).into()
}

fn default_log_level() -> String {
    "info".into()
}

impl ProvidersConfig {
    fn template(&self, kind: LookupKind) -> Option<&str> {
        match kind {
            LookupKind::PhoneBasic => self.phone_basic.as_deref(),
            LookupKind::PhoneTruecaller => self.phone_truecaller.as_deref(),
            LookupKind::BankBin => self.bank_bin.as_deref(),
            LookupKind::BankIfsc => self.bank_ifsc.as_deref(),
            LookupKind::InstagramProfile => self.instagram_profile.as_deref(),
            LookupKind::InstagramPosts => self.instagram_posts.as_deref(),
            LookupKind::NationalIdFamily => self.national_id_family.as_deref(),
        }
    }

    /// Default provider table with the configured overrides applied.
    pub fn table(&self) -> Result<ProviderTable, ConfigError> {
        LookupKind::ALL
            .into_iter()
            .try_fold(ProviderTable::new(), |table, kind| match self.template(kind) {
                Some(template) => table.with_template(kind, template),
                None => Ok(table),
            })
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
