use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub http: Client,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self> {
        // One client for all requests; the timeout bounds both the calendar
        // and the config fetch.
        let http = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(AppState { config, http })
    }
}
