//! Server configuration.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

static DEFAULT_CALENDAR_URL: &str = "https://ois2.ut.ee/api/timetable/personal/link/{id}/et";

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4096
}

fn default_calendar_url() -> String {
    DEFAULT_CALENDAR_URL.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Server configuration, read from icsift.toml in the working directory
/// and `ICSIFT_*` environment variables. Every field has a default so the
/// service runs with no config file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upstream calendar URL template; `{id}` is replaced with the
    /// (percent-encoded) calendar id from the request.
    #[serde(default = "default_calendar_url")]
    pub calendar_url: String,

    /// Timeout for each upstream fetch, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Overall per-request deadline, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("icsift").required(false))
            .add_source(Environment::with_prefix("ICSIFT"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Configuration is not valid")?;

        Ok(config)
    }

    /// Upstream feed URL for a calendar id.
    pub fn upstream_url(&self, id: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
        self.calendar_url.replace("{id}", &encoded)
    }
}
