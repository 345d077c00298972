//! Cloudflare API client for DNS record operations
//!
//! Uses reqwest with rustls for HTTP requests. Two operations only: read
//! a record's current content, and overwrite a record with a new address.
//! Authentication headers are fixed at construction from the detected
//! credential kind.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use urlencoding::encode;

use crate::constants::{
    CLOUDFLARE_API_BASE, DNS_PROXIED, DNS_RECORD_TYPE_A, DNS_TTL_AUTO, USER_AGENT,
};
use crate::credential::auth_headers;
use crate::error::{Error, Result};

//==============================================================================
// Types
//==============================================================================

/// Result of a record write: Cloudflare's own success indicator plus the
/// full response envelope for diagnostics.
///
/// `success: false` is a normal, reportable outcome and is never raised
/// as an error by the client.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub success: bool,
    pub body: Value,
}

//==============================================================================
// Client
//==============================================================================

#[derive(Debug)]
pub struct CloudflareClient {
    client: reqwest::Client,
    api_base: String,
}

impl CloudflareClient {
    /// Builds a client for the given account credentials.
    ///
    /// Detects the credential kind and bakes the matching auth headers
    /// into the client; a credential that matches no known format fails
    /// here with `InvalidCredential`, before any request is sent.
    pub fn new(email: &str, credential: &str, timeout: Duration) -> Result<Self> {
        let headers = auth_headers(email, credential)?;
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::network(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: CLOUDFLARE_API_BASE.to_string(),
        })
    }

    /// Points the client at a different API base URL (tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn record_url(&self, zone_id: &str, record_id: &str) -> String {
        format!(
            "{}/zones/{}/dns_records/{}",
            self.api_base,
            encode(zone_id),
            encode(record_id)
        )
    }

    /// Fetches a record's current content string.
    pub async fn read_record(&self, zone_id: &str, record_id: &str) -> Result<String> {
        let url = self.record_url(zone_id, record_id);

        debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network(format!("GET request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "record read returned {status} for record {record_id}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("record read response was not JSON: {e}")))?;

        body.get("result")
            .and_then(|r| r.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::parse(format!(
                    "record read response for {record_id} lacked result.content"
                ))
            })
    }

    /// Overwrites a record with a new IPv4 address.
    ///
    /// The payload shape is fixed: an "A" record with `ttl: 1` (Cloudflare's
    /// sentinel for automatic TTL, not a one-second duration) and
    /// `proxied: true` (always routed through the edge proxy). Only `name`
    /// and `content` vary with the call.
    pub async fn write_record(
        &self,
        zone_id: &str,
        record_id: &str,
        name: &str,
        ip: &str,
    ) -> Result<WriteOutcome> {
        #[derive(Serialize)]
        struct Payload<'a> {
            #[serde(rename = "type")]
            rt: &'static str,
            name: &'a str,
            content: &'a str,
            ttl: u64,
            proxied: bool,
        }

        let url = self.record_url(zone_id, record_id);
        let payload = Payload {
            rt: DNS_RECORD_TYPE_A,
            name,
            content: ip,
            ttl: DNS_TTL_AUTO,
            proxied: DNS_PROXIED,
        };

        debug!("PUT {}", url);
        let resp = self
            .client
            .put(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::network(format!("PUT request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::network(format!(
                "record write returned {status} for record {record_id}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("record write response was not JSON: {e}")))?;

        let success = body
            .get("success")
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                Error::parse(format!(
                    "record write response for {record_id} lacked a success flag"
                ))
            })?;

        Ok(WriteOutcome { success, body })
    }
}

//==============================================================================
// Tests
//==============================================================================
