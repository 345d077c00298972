//! Configuration module for cfddns
//!
//! Environment variables are the sole configuration channel; the tool is
//! meant to be run from a scheduler with its environment set by a unit
//! file or crontab. Everything is resolved once at startup into an
//! explicit `Config` value that is passed by reference into each
//! component; there are no ambient globals.
//!
//! The zone/record mapping is a single JSON document in `CLOUDFLARE_ZONES`:
//!
//! ```json
//! [
//!   {
//!     "id": "0123456789abcdef0123456789abcdef",
//!     "records": [
//!       { "id": "372e67954025e0ba6aaa6d586b9e0b59", "name": "example.com" },
//!       { "id": "5ca05b5b7f7bfa6aaa6d586b9e0b5f8a", "name": "api.example.com" }
//!     ]
//!   }
//! ]
//! ```
//!
//! Array order is processing order, both for zones and for records within
//! a zone.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use zeroize::Zeroizing;

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_EMAIL, ENV_TIMEOUT, ENV_VERBOSE, ENV_ZONES,
    MAX_TIMEOUT_SECS, MAX_ZONE_ID_LENGTH, MIN_TIMEOUT_SECS, MIN_ZONE_ID_LENGTH,
};
use crate::error::{Error, Result};
use crate::validation::validate_record_name;

//==============================================================================
// Types
//==============================================================================

/// A DNS record to reconcile: the provider-assigned identifier plus the
/// record's DNS name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordConfig {
    pub id: String,
    pub name: String,
}

/// A zone and the ordered records to reconcile within it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneConfig {
    pub id: String,
    pub records: Vec<RecordConfig>,
}

/// Configuration for a cfddns run
///
/// The account email and API credential are wrapped in `Zeroizing` so they
/// are cleared from memory when the config is dropped.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cloudflare account email (required alongside a global API key)
    pub email: Zeroizing<String>,
    /// Opaque API credential; its kind (global key vs token) is detected
    /// when the API client is constructed
    pub api_credential: Zeroizing<String>,
    /// Zones to reconcile, in processing order
    pub zones: Vec<ZoneConfig>,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Enable verbose logging
    pub verbose: bool,
}

//==============================================================================
// Loading
//==============================================================================

impl Config {
    /// Loads and validates configuration from the environment.
    ///
    /// Any missing or malformed value is a fatal startup error; no network
    /// call happens before this returns `Ok`.
    pub fn load() -> Result<Self> {
        let email = require_env(ENV_EMAIL)?;
        let api_credential = require_env(ENV_API_KEY)?;
        let zones_json = require_env(ENV_ZONES)?;

        let zones: Vec<ZoneConfig> = serde_json::from_str(&zones_json)
            .map_err(|e| Error::config(format!("invalid {ENV_ZONES} JSON: {e}")))?;

        let mut timeout_secs = DEFAULT_TIMEOUT_SECS;
        if let Ok(v) = env::var(ENV_TIMEOUT) {
            if !v.is_empty() {
                timeout_secs = v
                    .trim()
                    .parse()
                    .map_err(|_| Error::config(format!("invalid {ENV_TIMEOUT} value: {v}")))?;
            }
        }

        let mut verbose = false;
        if let Ok(v) = env::var(ENV_VERBOSE) {
            if !v.is_empty() {
                verbose = parse_bool_env(&v)
                    .ok_or_else(|| Error::config(format!("invalid {ENV_VERBOSE} value: {v}")))?;
            }
        }

        let config = Self {
            email: Zeroizing::new(email),
            api_credential: Zeroizing::new(api_credential),
            zones,
            timeout: Duration::from_secs(timeout_secs),
            verbose,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.email.is_empty() {
            return Err(Error::config(format!("missing {ENV_EMAIL}")));
        }
        if self.api_credential.is_empty() {
            return Err(Error::config(format!("missing {ENV_API_KEY}")));
        }
        if self.zones.is_empty() {
            return Err(Error::config(format!(
                "{ENV_ZONES} must list at least one zone"
            )));
        }

        for zone in &self.zones {
            // Zone IDs are alphanumeric, typically 32 characters
            if !zone.id.chars().all(|c| c.is_alphanumeric()) || zone.id.is_empty() {
                return Err(Error::config(format!(
                    "zone id must be alphanumeric, got: {}",
                    zone.id
                )));
            }
            if zone.id.len() < MIN_ZONE_ID_LENGTH || zone.id.len() > MAX_ZONE_ID_LENGTH {
                return Err(Error::config(format!(
                    "zone id has invalid length ({} chars, expected {}-{})",
                    zone.id.len(),
                    MIN_ZONE_ID_LENGTH,
                    MAX_ZONE_ID_LENGTH
                )));
            }
            if zone.records.is_empty() {
                return Err(Error::config(format!(
                    "zone {} lists no records",
                    zone.id
                )));
            }
            for record in &zone.records {
                if record.id.is_empty() || !record.id.chars().all(|c| c.is_alphanumeric()) {
                    return Err(Error::config(format!(
                        "record id for {} must be alphanumeric, got: {}",
                        record.name, record.id
                    )));
                }
                validate_record_name(&record.name)?;
            }
        }

        let timeout_secs = self.timeout.as_secs();
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(Error::config(format!(
                "{ENV_TIMEOUT} must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds, got {timeout_secs}"
            )));
        }

        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config(format!("missing {key}"))),
    }
}

/// Parses a boolean from an environment variable value.
///
/// Accepts "1"/"true"/"yes"/"on" and "0"/"false"/"no"/"off".
fn parse_bool_env(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//==============================================================================
// Tests
//==============================================================================
