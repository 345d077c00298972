//! Validation utilities for cfddns
//!
//! Record names are validated at startup so a typo in the configuration
//! fails before any network call; resolved public IPs are checked before
//! they are pushed into DNS.

use std::net::Ipv4Addr;

use crate::constants::{MAX_LABEL_LENGTH, MAX_RECORD_NAME_LENGTH};
use crate::error::{Error, Result};

/// Validates a DNS record name per RFC 1035 and common DNS conventions.
///
/// Accepted forms: `@` for the zone apex, standard and subdomain names,
/// `_`-prefixed labels (ACME style), complete wildcard labels, and FQDN
/// notation with a trailing dot. Labels are limited to 63 characters, the
/// whole name to 253, labels cannot start or end with a hyphen, and only
/// letters, digits, `-` and `_` are allowed.
pub fn validate_record_name(record_name: &str) -> Result<()> {
    let trimmed = record_name.trim();
    if trimmed.is_empty() {
        return Err(Error::config("record name cannot be empty"));
    }
    if trimmed == "@" {
        return Ok(());
    }
    if trimmed.contains(' ') {
        return Err(Error::config("record name cannot contain spaces"));
    }

    let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if name.is_empty() {
        return Err(Error::config("record name cannot be empty"));
    }
    if name.len() > MAX_RECORD_NAME_LENGTH {
        return Err(Error::config(format!(
            "record name too long (max {} characters, got {})",
            MAX_RECORD_NAME_LENGTH,
            name.len()
        )));
    }
    if name.starts_with('.') {
        return Err(Error::config("record name cannot start with a dot"));
    }
    if name.contains("..") {
        return Err(Error::config("record name cannot contain consecutive dots"));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(Error::config("record name contains empty label"));
        }
        if label == "*" {
            continue;
        }
        if label.len() > MAX_LABEL_LENGTH {
            return Err(Error::config(format!(
                "record name label too long (max {} characters, got {})",
                MAX_LABEL_LENGTH,
                label.len()
            )));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(
                "record name label cannot start or end with hyphen",
            ));
        }
        for ch in label.chars() {
            if !ch.is_alphanumeric() && ch != '-' && ch != '_' {
                return Err(Error::config(format!(
                    "record name contains invalid character: '{ch}' (allowed: letters, digits, '-', '_', or wildcard labels)"
                )));
            }
        }
    }

    Ok(())
}

/// Returns true when `ip` is a syntactically valid IPv4 address that makes
/// sense as a public A-record target.
///
/// Rejects the unspecified address, loopback, link-local (169.254/16),
/// multicast and the limited broadcast address. RFC 1918 private ranges
/// are accepted: split-horizon setups legitimately publish them.
pub fn is_publishable_ipv4(ip: &str) -> bool {
    let addr = match ip.parse::<Ipv4Addr>() {
        Ok(a) => a,
        Err(_) => return false,
    };

    if addr.is_unspecified() || addr.is_loopback() || addr.is_broadcast() {
        return false;
    }
    if addr.is_link_local() || addr.is_multicast() {
        return false;
    }

    true
}
