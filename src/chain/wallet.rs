//! Wallet/transaction-building client handle and its connector seam
//!
//! The wallet client is the expensive external handle managed by the
//! single-flight cell. Exactly one instance exists per process once
//! initialization succeeds; operations borrow it, they never replace it.

use crate::config::CardanoConfig;
use crate::types::Network;
use crate::{Result, dependency_error};
use async_trait::async_trait;
use std::time::Duration;

/// Opaque handle to an initialized wallet/transaction-building session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletClient {
    network: Network,
    endpoint: String,
}

impl WalletClient {
    pub fn new(network: Network, endpoint: impl Into<String>) -> Self {
        Self {
            network,
            endpoint: endpoint.into(),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Builds a wallet client from network, endpoint and credential.
/// Implementations may fail or hang; callers bound the wait.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self) -> Result<WalletClient>;
}

/// Real connector: a round-trip against the provider endpoint proves the
/// URL and credential work before the handle is handed out.
pub struct ProviderWalletConnector {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    network: Network,
}

impl ProviderWalletConnector {
    pub fn new(config: &CardanoConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| crate::Error::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.blockfrost_url.trim_end_matches('/').to_string(),
            project_id: config.blockfrost_project_id.clone(),
            network: config.network,
        })
    }
}

#[async_trait]
impl WalletConnector for ProviderWalletConnector {
    async fn connect(&self) -> Result<WalletClient> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("project_id", &self.project_id)
            .send()
            .await
            .map_err(|e| dependency_error!("wallet provider unreachable: {e}"))?;

        if !response.status().is_success() {
            return Err(dependency_error!(
                "wallet provider returned status {}",
                response.status()
            ));
        }

        Ok(WalletClient::new(self.network, self.base_url.clone()))
    }
}
