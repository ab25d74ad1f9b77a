//! Blockfrost data provider client
//!
//! Thin JSON client over the Blockfrost API covering the queries the
//! service proxies: chain tip, genesis and epoch parameters, address
//! assets and UTXOs, and transaction submission/lookup. Construction
//! fails fast when the project id credential is missing.

use crate::chain::provider::ChainProbe;
use crate::config::CardanoConfig;
use crate::types::Network;
use crate::{Error, Result, provider_error};
use async_trait::async_trait;
use std::time::Duration;

/// Request timeout for individual provider calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON client for the Blockfrost API
pub struct BlockfrostClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    network: Network,
    network_magic: u64,
}

impl BlockfrostClient {
    /// Build a client from configuration; the project id is required
    pub fn new(config: &CardanoConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.blockfrost_url.trim_end_matches('/').to_string(),
            project_id: config.blockfrost_project_id.clone(),
            network: config.network,
            network_magic: config.network_magic,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn network_magic(&self) -> u64 {
        self.network_magic
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .get(self.endpoint(path))
            .header("project_id", &self.project_id)
            .send()
            .await
            .map_err(|e| provider_error!("GET {path} failed: {e}"))?;

        if !response.status().is_success() {
            return Err(provider_error!(
                "GET {path} returned status {}",
                response.status()
            ));
        }

        response
            .json()
            .await
            .map_err(|e| provider_error!("GET {path} returned invalid JSON: {e}"))
    }

    /// Genesis parameters of the selected network
    pub async fn genesis_parameters(&self) -> Result<serde_json::Value> {
        self.get_json("genesis").await
    }

    /// Protocol parameters for an epoch; `None` means the latest epoch
    pub async fn epoch_parameters(&self, epoch: Option<u64>) -> Result<serde_json::Value> {
        match epoch {
            Some(number) => self.get_json(&format!("epochs/{number}/parameters")).await,
            None => self.get_json("epochs/latest/parameters").await,
        }
    }

    /// Asset summary for an address
    pub async fn address_info(&self, address: &str) -> Result<serde_json::Value> {
        if address.trim().is_empty() {
            return Err(Error::validation("address is required to query account assets"));
        }
        self.get_json(&format!("addresses/{address}")).await
    }

    /// UTXOs held by an address, optionally paginated
    pub async fn address_utxos(
        &self,
        address: &str,
        page: Option<u32>,
        count: Option<u32>,
    ) -> Result<serde_json::Value> {
        if address.trim().is_empty() {
            return Err(Error::validation("address is required to list UTXOs"));
        }

        let mut path = format!("addresses/{address}/utxos");
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(format!("page={page}"));
        }
        if let Some(count) = count {
            query.push(format!("count={count}"));
        }
        if !query.is_empty() {
            path = format!("{path}?{}", query.join("&"));
        }

        self.get_json(&path).await
    }

    /// Submit a CBOR-encoded transaction, returning its hash
    pub async fn submit_transaction(&self, cbor: &[u8]) -> Result<serde_json::Value> {
        if cbor.is_empty() {
            return Err(Error::validation("transaction CBOR is required"));
        }

        let response = self
            .http
            .post(self.endpoint("tx/submit"))
            .header("project_id", &self.project_id)
            .header("Content-Type", "application/cbor")
            .body(cbor.to_vec())
            .send()
            .await
            .map_err(|e| provider_error!("POST tx/submit failed: {e}"))?;

        if !response.status().is_success() {
            return Err(provider_error!(
                "POST tx/submit returned status {}",
                response.status()
            ));
        }

        response
            .json()
            .await
            .map_err(|e| provider_error!("POST tx/submit returned invalid JSON: {e}"))
    }

    /// Transaction details by hash
    pub async fn transaction(&self, tx_hash: &str) -> Result<serde_json::Value> {
        if tx_hash.trim().is_empty() {
            return Err(Error::validation("transaction hash is required"));
        }
        self.get_json(&format!("txs/{tx_hash}")).await
    }

    /// Inputs and outputs of a transaction
    pub async fn transaction_utxos(&self, tx_hash: &str) -> Result<serde_json::Value> {
        if tx_hash.trim().is_empty() {
            return Err(Error::validation("transaction hash is required"));
        }
        self.get_json(&format!("txs/{tx_hash}/utxos")).await
    }
}

#[async_trait]
impl ChainProbe for BlockfrostClient {
    async fn health(&self) -> Result<serde_json::Value> {
        self.get_json("health").await
    }

    async fn latest_block(&self) -> Result<serde_json::Value> {
        self.get_json("blocks/latest").await
    }

    async fn latest_epoch(&self) -> Result<serde_json::Value> {
        self.get_json("epochs/latest").await
    }
}
