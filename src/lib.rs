//! cfddns - keep Cloudflare "A" records pointed at the current public IPv4
//!
//! Thin, sequential client meant to be run from cron or a systemd timer:
//! - resolve the public IPv4 address from an echo service
//! - for each configured (zone, record) pair, read the record at
//!   Cloudflare and rewrite it when its content differs
//! - report one timestamped line per record outcome
//!
//! No persistence, no retries, no concurrency; every run reconstructs its
//! whole view from the environment and live API reads.

pub mod cloudflare;
pub mod config;
pub mod constants;
pub mod credential;
pub mod error;
pub mod public_ip;
pub mod reconcile;
pub mod validation;

pub use cloudflare::CloudflareClient;
pub use config::Config;
pub use error::{Error, Result};
pub use public_ip::PublicIpResolver;
pub use reconcile::{Outcome, Reconciler, RecordReport};
