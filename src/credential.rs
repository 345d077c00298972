//! Credential-kind detection and auth header construction
//!
//! Cloudflare accepts two credential shapes with different header layouts:
//! a legacy global API key (sent alongside the account email) and a scoped
//! API token (sent as a bearer authorization). The configured credential is
//! an opaque string; its kind is detected from the vendor's exact format
//! rules. Detection is a pure, total function with a fixed check order.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::constants::{API_TOKEN_LENGTH, API_TOKEN_PREFIX_LENGTH, GLOBAL_KEY_LENGTH};
use crate::error::{Error, Result};

//==============================================================================
// Types
//==============================================================================

/// The authentication scheme a credential string represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// Legacy global API key: X-Auth-Email + X-Auth-Key headers
    GlobalKey,
    /// Scoped API token: Authorization bearer header
    Token,
    /// Matches neither format; unusable for any authenticated call
    Unknown,
}

//==============================================================================
// Classification
//==============================================================================

/// Detects the kind of a Cloudflare API credential.
///
/// Format rules, checked in fixed order:
/// 1. Global key: exactly 37 characters, all lowercase hex (`0-9a-f`).
/// 2. Token: exactly 40 characters; every character from the 5th onward
///    is ASCII alphanumeric, `-`, or `_` (the first four are
///    unconstrained).
/// 3. Anything else is `Unknown`.
///
/// Lengths count characters, not bytes, so a multi-byte character in the
/// token's unconstrained prefix still counts as one position. The length
/// and alphabet predicates encode Cloudflare's actual formats and must
/// not be loosened into "looks like a key" heuristics.
pub fn classify(credential: &str) -> CredentialKind {
    if credential.chars().count() == GLOBAL_KEY_LENGTH
        && credential.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    {
        return CredentialKind::GlobalKey;
    }
    if credential.chars().count() == API_TOKEN_LENGTH
        && credential
            .chars()
            .skip(API_TOKEN_PREFIX_LENGTH)
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return CredentialKind::Token;
    }
    CredentialKind::Unknown
}

//==============================================================================
// Header Construction
//==============================================================================

/// Builds the authentication headers for a credential.
///
/// Secret-bearing values are marked sensitive so they are elided from
/// debug output. Fails with `InvalidCredential` when the credential
/// classifies as `Unknown`; no request carrying it is ever issued.
pub fn auth_headers(email: &str, credential: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    match classify(credential) {
        CredentialKind::GlobalKey => {
            let email_value = HeaderValue::from_str(email)
                .map_err(|_| Error::config("account email contains characters invalid in a header"))?;
            // classify() guarantees the key is lowercase hex, always a valid header value
            let mut key_value = HeaderValue::from_str(credential)
                .map_err(|_| Error::InvalidCredential)?;
            key_value.set_sensitive(true);
            headers.insert("X-Auth-Email", email_value);
            headers.insert("X-Auth-Key", key_value);
        }
        CredentialKind::Token => {
            let mut bearer = HeaderValue::from_str(&format!("Bearer {credential}"))
                .map_err(|_| Error::InvalidCredential)?;
            bearer.set_sensitive(true);
            headers.insert(AUTHORIZATION, bearer);
        }
        CredentialKind::Unknown => return Err(Error::InvalidCredential),
    }

    Ok(headers)
}

//==============================================================================
// Tests
//==============================================================================
