//! Record reconciliation
//!
//! For each configured (zone, record) pair: read the record's current
//! content, compare it to the resolved public IP with exact string
//! equality, and write the new address when they differ. Every record
//! produces exactly one report; an error on one record never stops the
//! records after it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info};

use crate::cloudflare::CloudflareClient;
use crate::config::{RecordConfig, ZoneConfig};
use crate::error::{Error, Result};

//==============================================================================
// Outcomes
//==============================================================================

/// The result of reconciling one record
#[derive(Debug)]
pub enum Outcome {
    /// Record content already matched the public IP; no write was issued
    Unchanged,
    /// Record was rewritten and Cloudflare confirmed the change
    Updated { previous: String, current: String },
    /// Cloudflare answered the write with `success: false`; the full
    /// response body is kept for diagnostics
    Rejected { response: Value },
    /// A network or parse error occurred for this record; later records
    /// were still attempted
    Failed { error: Error },
}

/// One report per configured record, in processing order
#[derive(Debug)]
pub struct RecordReport {
    pub zone_id: String,
    pub record_name: String,
    pub at: DateTime<Utc>,
    pub outcome: Outcome,
}

impl RecordReport {
    /// True for outcomes that leave the record in the desired state
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Unchanged | Outcome::Updated { .. })
    }
}

impl fmt::Display for RecordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Unchanged => write!(f, "IP for {} unchanged", self.record_name),
            Outcome::Updated { previous, current } => write!(
                f,
                "updated {} from {} to {}",
                self.record_name, previous, current
            ),
            Outcome::Rejected { response } => {
                write!(f, "failed to update {}: {}", self.record_name, response)
            }
            Outcome::Failed { error } => {
                write!(f, "failed to reconcile {}: {}", self.record_name, error)
            }
        }
    }
}

//==============================================================================
// Reconciler
//==============================================================================

pub struct Reconciler<'a> {
    client: &'a CloudflareClient,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a CloudflareClient) -> Self {
        Self { client }
    }

    /// Reconciles a single record against the resolved public IP.
    ///
    /// Network and parse errors propagate; the caller decides whether they
    /// abort the run or only this record.
    pub async fn reconcile_record(
        &self,
        zone_id: &str,
        record: &RecordConfig,
        public_ip: &str,
    ) -> Result<Outcome> {
        let current = self.client.read_record(zone_id, &record.id).await?;

        // Exact string equality, no normalization
        if current == public_ip {
            return Ok(Outcome::Unchanged);
        }

        let write = self
            .client
            .write_record(zone_id, &record.id, &record.name, public_ip)
            .await?;

        if write.success {
            Ok(Outcome::Updated {
                previous: current,
                current: public_ip.to_string(),
            })
        } else {
            Ok(Outcome::Rejected {
                response: write.body,
            })
        }
    }

    /// Reconciles every configured record, zones and records both in
    /// configuration order, and logs one timestamped line per outcome.
    ///
    /// Per-record errors are absorbed into `Outcome::Failed` here; only
    /// the caller's earlier steps (config, public IP) abort a run.
    pub async fn run(&self, zones: &[ZoneConfig], public_ip: &str) -> Vec<RecordReport> {
        let mut reports = Vec::new();

        for zone in zones {
            for record in &zone.records {
                let outcome = match self.reconcile_record(&zone.id, record, public_ip).await {
                    Ok(outcome) => outcome,
                    Err(error) => Outcome::Failed { error },
                };
                let report = RecordReport {
                    zone_id: zone.id.clone(),
                    record_name: record.name.clone(),
                    at: Utc::now(),
                    outcome,
                };
                if report.is_ok() {
                    info!("{report}");
                } else {
                    error!("{report}");
                }
                reports.push(report);
            }
        }

        reports
    }
}

//==============================================================================
// Tests
//==============================================================================
