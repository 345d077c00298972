//! cfddns - Cloudflare dynamic-DNS updater for A records
//!
//! Single-shot: load config from the environment, resolve the public
//! IPv4 address, reconcile every configured record, exit. Re-run it from
//! cron or a systemd timer; there is no internal loop.

use anyhow::{Context as _, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cfddns::{CloudflareClient, Config, PublicIpResolver, Reconciler};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("Config load failed")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if config.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = CloudflareClient::new(
        config.email.as_str(),
        config.api_credential.as_str(),
        config.timeout,
    )
    .context("Cloudflare client failed")?;

    let resolver = PublicIpResolver::new(config.timeout).context("Public IP resolver failed")?;
    let public_ip = resolver
        .resolve()
        .await
        .context("Public IP resolution failed")?;
    info!("public IPv4 is {public_ip}");

    // Per-record failures are logged inside the run and never change the
    // exit code; only the fatal steps above do.
    let reconciler = Reconciler::new(&client);
    reconciler.run(&config.zones, &public_ip).await;

    Ok(())
}
