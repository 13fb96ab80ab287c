//! Backend health check.

use anyhow::{Context, Result};
use uadm_core::config::Config;

pub async fn run(config: &Config, base_url: String) -> Result<()> {
    let api = super::client(config, base_url);
    let health = api
        .health()
        .await
        .with_context(|| format!("query {}/health", api.base_url()))?;

    let database = health.database.as_deref().unwrap_or("unknown");
    println!("status: {}", health.status);
    println!("database: {database}");

    if !health.is_healthy() {
        let reason = health.error.as_deref().unwrap_or("no error reported");
        anyhow::bail!("Backend is unhealthy: {reason}");
    }
    Ok(())
}
