//! Error taxonomy for cfddns
//!
//! Fatal conditions (configuration, credential detection, public-IP
//! resolution) terminate the run; per-record network and parse errors are
//! caught at the reconciler boundary and turned into outcome values.
//! A provider-side `success: false` is never an error here, it is reported
//! as a reconciliation outcome.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration; fatal before any network call
    #[error("configuration error: {0}")]
    Config(String),

    /// The API credential matches neither the global-key nor the token
    /// format; no request carrying it is ever sent
    #[error("credential matches no known Cloudflare format (expected a 37-char hex global key or a 40-char API token)")]
    InvalidCredential,

    /// Transport failure or non-2xx status from an external service
    #[error("network error: {0}")]
    Network(String),

    /// Response body lacked an expected field or had the wrong shape
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
