//! Chain data provider seam
//!
//! The diagnostics path only needs three independent probes from the data
//! provider; they are abstracted behind a trait so tests can substitute a
//! failing or degraded provider.

use crate::Result;
use crate::types::{Network, NetworkHealth};
use async_trait::async_trait;
use chrono::Utc;

/// Health probes offered by a chain data provider. Each probe is an
/// independent network call; failures are isolated per call.
#[async_trait]
pub trait ChainProbe: Send + Sync {
    /// Provider liveness probe
    async fn health(&self) -> Result<serde_json::Value>;

    /// Most recently minted block
    async fn latest_block(&self) -> Result<serde_json::Value>;

    /// Current epoch summary
    async fn latest_epoch(&self) -> Result<serde_json::Value>;
}

/// Gather all probes concurrently and report each outcome independently.
/// A failed probe is reported as `None`; it never cancels the others or
/// aborts the snapshot.
pub async fn network_health(
    probe: &dyn ChainProbe,
    network: Network,
    network_magic: u64,
) -> NetworkHealth {
    let (health, latest_block, latest_epoch) =
        tokio::join!(probe.health(), probe.latest_block(), probe.latest_epoch());

    NetworkHealth {
        network,
        network_magic,
        health: health.ok(),
        latest_block: latest_block.ok(),
        latest_epoch: latest_epoch.ok(),
        timestamp: Utc::now(),
    }
}
