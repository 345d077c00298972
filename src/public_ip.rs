//! Public IPv4 resolution via an IP-echo service
//!
//! One GET per run, no caching across runs. A failure here is fatal for
//! the whole run: without a trustworthy public IP there is nothing to
//! reconcile.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::constants::{PUBLIC_IP_ENDPOINT, USER_AGENT};
use crate::error::{Error, Result};
use crate::validation::is_publishable_ipv4;

#[derive(Debug, Deserialize)]
struct EchoResponse {
    ip: String,
}

/// Resolves the caller's current public IPv4 address
pub struct PublicIpResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl PublicIpResolver {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::network(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: PUBLIC_IP_ENDPOINT.to_string(),
        })
    }

    /// Points the resolver at a different echo endpoint (tests)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fetches the current public IPv4 address as a dotted-quad string.
    ///
    /// The string is returned verbatim; record comparison is exact string
    /// equality, so no normalization happens here. It must still parse as
    /// a publishable IPv4 address or the response counts as malformed.
    pub async fn resolve(&self) -> Result<String> {
        debug!("GET {}", self.endpoint);
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::network(format!("public IP request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "public IP service returned {status}"
            )));
        }

        let body: EchoResponse = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("public IP response lacked an `ip` field: {e}")))?;

        if !is_publishable_ipv4(&body.ip) {
            return Err(Error::parse(format!(
                "public IP service returned a value that is not a publishable IPv4 address: {}",
                body.ip
            )));
        }

        Ok(body.ip)
    }
}
