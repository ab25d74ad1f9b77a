//! Core types for the Inverstra service: networks, operation requests and
//! the structured result objects every facade call returns.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Cardano network presets supported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Preview,
    Preprod,
    Mainnet,
}

impl Network {
    /// Default network magic number for this preset
    pub fn magic(&self) -> u64 {
        match self {
            Network::Preview => 2,
            Network::Preprod => 1,
            Network::Mainnet => 764_824_073,
        }
    }

    /// Default Blockfrost API base URL for this preset
    pub fn blockfrost_url(&self) -> &'static str {
        match self {
            Network::Preview => "https://cardano-preview.blockfrost.io/api/v0",
            Network::Preprod => "https://cardano-preprod.blockfrost.io/api/v0",
            Network::Mainnet => "https://cardano-mainnet.blockfrost.io/api/v0",
        }
    }

    /// Lowercase network name as used in configuration and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Preview => "preview",
            Network::Preprod => "preprod",
            Network::Mainnet => "mainnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "preview" => Ok(Network::Preview),
            "preprod" => Ok(Network::Preprod),
            "mainnet" => Ok(Network::Mainnet),
            other => Err(Error::validation(format!("unknown network '{other}'"))),
        }
    }
}

/// Request to create a prediction transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePredictionRequest {
    /// Bech32 wallet address of the creator
    pub wallet_address: String,

    /// Prediction datum to be attached on-chain (opaque to the core)
    pub datum: serde_json::Value,

    /// Optional reference script identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_ref: Option<String>,
}

/// Request to vote on an existing prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub wallet_address: String,

    /// True for a supporting vote, false for an opposing one
    pub support: bool,

    pub prediction_id: Uuid,
}

/// Request to finalise (settle) a prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinaliseRequest {
    pub wallet_address: String,
    pub prediction_id: Uuid,
}

/// Outcome classification carried by every facade response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    /// The operation completed in full
    #[serde(rename = "success")]
    Success,

    /// The operation was accepted but deferred to a fallback collaborator
    #[serde(rename = "pending")]
    Pending,

    /// The transaction builder for this operation does not exist yet
    #[serde(rename = "pending-implementation")]
    PendingImplementation,

    /// The operation failed; `error` carries the underlying message
    #[serde(rename = "error")]
    Error,
}

/// JSON-serializable result object returned by every facade operation.
///
/// Callers always receive one of these, never a raw error: the `status`
/// field distinguishes success, pending and failure outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub status: OperationStatus,
    pub message: String,
    pub network: Network,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransactionResponse {
    /// Deferred-to-fallback response for the create path
    pub fn pending(network: Network, message: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::Pending,
            message: message.into(),
            network,
            note: Some(note.into()),
            error: None,
        }
    }

    /// Honest placeholder for builders that are not written yet
    pub fn pending_implementation(network: Network, message: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::PendingImplementation,
            message: message.into(),
            network,
            note: None,
            error: None,
        }
    }

    /// Failure response carrying the underlying error message
    pub fn error(network: Network, message: impl Into<String>, error: &Error) -> Self {
        Self {
            status: OperationStatus::Error,
            message: message.into(),
            network,
            note: None,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregated provider health snapshot.
///
/// Each probe is fetched independently; a failed probe is reported as
/// `None` without affecting the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkHealth {
    pub network: Network,
    pub network_magic: u64,
    pub health: Option<serde_json::Value>,
    pub latest_block: Option<serde_json::Value>,
    pub latest_epoch: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// Diagnostics snapshot: provider health plus the recent event trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDiagnostics {
    pub health: NetworkHealth,
    pub recent_events: Vec<crate::chain::EventLogEntry>,
}
