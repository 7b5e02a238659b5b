//! Remote filter configuration documents.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{FilterError, FilterResult};

/// A remotely hosted JSON document describing a calendar feed and the
/// named filter groups that can be applied to it.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// The upstream ICS feed this config applies to.
    pub calendar_url: String,

    #[serde(default)]
    pub groups: HashMap<String, Group>,
}

/// One named filter group.
///
/// `mode` stays a plain string so that an unknown mode can be reported
/// with the offending name instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub mode: String,

    #[serde(default)]
    pub values: Vec<String>,
}

impl FilterConfig {
    /// Parse a filter config from raw JSON bytes.
    pub fn from_json(bytes: &[u8]) -> FilterResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| FilterError::ConfigInvalid(e.to_string()))
    }
}
