//! `ems-probe`: check the portal API is reachable and CORS is configured.

use ems_diagnostics::{BackendProbe, EndpointStatus, ProbeConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ems_observability::init();

    let config = ProbeConfig::from_env()?;
    let origin = config.origin.clone();
    let probe = BackendProbe::new(config)?;

    let summary = probe.run().await;

    let failed: Vec<&str> = summary
        .endpoints
        .iter()
        .filter(|r| !matches!(r.status, EndpointStatus::Success { .. }))
        .map(|r| r.endpoint.as_str())
        .collect();
    if !failed.is_empty() {
        tracing::warn!(?failed, "some endpoints did not respond successfully");
    }
    if !summary.cors.allows_origin(&origin) {
        tracing::warn!(origin = %origin, "backend does not allow the front-end origin");
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
