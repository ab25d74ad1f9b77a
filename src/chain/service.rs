//! Cardano transaction service facade
//!
//! Entry point the HTTP layer calls into: create / vote / finalise
//! operations, wallet client bootstrap and network diagnostics. The
//! service is an explicit object constructed once at process startup and
//! passed by reference to its callers; it holds no global state.
//!
//! Transaction building itself is not implemented: every operation that
//! would build one returns an honest `pending-implementation` result so
//! callers can distinguish "not yet supported" from "failed".

use crate::chain::blockfrost::BlockfrostClient;
use crate::chain::event_log::{DEFAULT_RECENT_LIMIT, EventLog, EventLogEntry};
use crate::chain::provider::{ChainProbe, network_health};
use crate::chain::single_flight::SingleFlight;
use crate::chain::wallet::{ProviderWalletConnector, WalletClient, WalletConnector};
use crate::config::CardanoConfig;
use crate::types::{
    CreatePredictionRequest, FinaliseRequest, NetworkDiagnostics, TransactionResponse, VoteRequest,
};
use crate::{Result, dependency_error};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Hard bound on one wallet client construction attempt
const WALLET_INIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shorter bound for the user-facing create path: the caller proceeds
/// with the fallback rather than waiting for a cold client
const CREATE_WAIT_TIMEOUT: Duration = Duration::from_secs(3);

/// Facade over the wallet client initializer, the bounded event log and
/// the (future) transaction builders
pub struct CardanoTransactionService {
    config: CardanoConfig,
    provider: Arc<dyn ChainProbe>,
    connector: Arc<dyn WalletConnector>,
    wallet: SingleFlight<WalletClient>,
    events: Arc<EventLog>,
    init_timeout: Duration,
    create_wait: Duration,
}

impl CardanoTransactionService {
    /// Create a service with explicit collaborators (tests inject mocks)
    pub fn new(
        config: CardanoConfig,
        provider: Arc<dyn ChainProbe>,
        connector: Arc<dyn WalletConnector>,
    ) -> Self {
        let events = Arc::new(EventLog::new(config.echo_events()));
        Self {
            config,
            provider,
            connector,
            wallet: SingleFlight::new(),
            events,
            init_timeout: WALLET_INIT_TIMEOUT,
            create_wait: CREATE_WAIT_TIMEOUT,
        }
    }

    /// Create a service wired to the real Blockfrost collaborators
    pub fn from_config(config: CardanoConfig) -> Result<Self> {
        let provider = Arc::new(BlockfrostClient::new(&config)?);
        let connector = Arc::new(ProviderWalletConnector::new(&config)?);
        Ok(Self::new(config, provider, connector))
    }

    /// Override the wallet timeouts (tests shorten them)
    pub fn with_timeouts(mut self, init_timeout: Duration, create_wait: Duration) -> Self {
        self.init_timeout = init_timeout;
        self.create_wait = create_wait;
        self
    }

    /// Return the shared wallet client, initializing it on first use.
    ///
    /// At most one construction runs at a time; concurrent callers share
    /// its outcome. A failed or timed-out attempt is logged and the next
    /// call starts fresh.
    pub async fn ensure_wallet(&self) -> Result<Arc<WalletClient>> {
        let connector = Arc::clone(&self.connector);
        let events = Arc::clone(&self.events);
        let network = self.config.network;
        let init_timeout = self.init_timeout;

        self.wallet
            .get_or_init(move || async move {
                match tokio::time::timeout(init_timeout, connector.connect()).await {
                    Ok(Ok(client)) => {
                        events.record(
                            "wallet_initialized",
                            json!({ "network": network.as_str() }),
                        );
                        Ok(client)
                    }
                    Ok(Err(err)) => {
                        events.record(
                            "wallet_initialization_failed",
                            json!({ "error": err.to_string() }),
                        );
                        Err(err)
                    }
                    Err(_) => {
                        let err = dependency_error!(
                            "wallet client initialization timed out after {}s",
                            init_timeout.as_secs()
                        );
                        events.record(
                            "wallet_initialization_failed",
                            json!({ "error": err.to_string() }),
                        );
                        Err(err)
                    }
                }
            })
            .await
    }

    /// Create a prediction transaction.
    ///
    /// Degrades gracefully: when the wallet client is unavailable within
    /// the short wait, the request is still accepted because the document
    /// store collaborator persists it. Never blocks past the wait bound
    /// and never returns an error-class result.
    pub async fn create_prediction(
        &self,
        request: CreatePredictionRequest,
    ) -> TransactionResponse {
        self.events.record(
            "create_prediction_requested",
            json!({
                "wallet_address": request.wallet_address,
                "datum": request.datum,
                "script_ref": request.script_ref,
            }),
        );

        match tokio::time::timeout(self.create_wait, self.ensure_wallet()).await {
            Ok(Ok(_wallet)) => TransactionResponse::pending_implementation(
                self.config.network,
                "Prediction transaction builder not implemented yet",
            ),
            Ok(Err(err)) => {
                self.record_wallet_unavailable("create_prediction", &err.to_string());
                self.create_fallback_response()
            }
            Err(_) => {
                self.record_wallet_unavailable(
                    "create_prediction",
                    "wallet client wait timed out",
                );
                self.create_fallback_response()
            }
        }
    }

    /// Vote on a prediction. Requires the wallet client; initialization
    /// failure is surfaced as an error-class result, never a raw error.
    pub async fn vote(&self, request: VoteRequest) -> TransactionResponse {
        self.events.record(
            "vote_requested",
            json!({
                "wallet_address": request.wallet_address,
                "support": request.support,
                "prediction_id": request.prediction_id,
            }),
        );

        match self.ensure_wallet().await {
            Ok(_wallet) => TransactionResponse::pending_implementation(
                self.config.network,
                "Vote transaction builder not implemented yet",
            ),
            Err(err) => TransactionResponse::error(
                self.config.network,
                "Wallet client initialisation failed",
                &err,
            ),
        }
    }

    /// Finalise (settle) a prediction. Same dependency policy as `vote`.
    pub async fn finalise(&self, request: FinaliseRequest) -> TransactionResponse {
        self.events.record(
            "finalise_requested",
            json!({
                "wallet_address": request.wallet_address,
                "prediction_id": request.prediction_id,
            }),
        );

        match self.ensure_wallet().await {
            Ok(_wallet) => TransactionResponse::pending_implementation(
                self.config.network,
                "Finalise transaction builder not implemented yet",
            ),
            Err(err) => TransactionResponse::error(
                self.config.network,
                "Wallet client initialisation failed",
                &err,
            ),
        }
    }

    /// Diagnostics snapshot: provider health probes plus the recent event
    /// trail. Always returns, even when every probe fails.
    pub async fn network_diagnostics(&self) -> NetworkDiagnostics {
        let health = network_health(
            self.provider.as_ref(),
            self.config.network,
            self.config.network_magic,
        )
        .await;

        NetworkDiagnostics {
            health,
            recent_events: self.events.recent(DEFAULT_RECENT_LIMIT),
        }
    }

    /// Most recent event-log entries, oldest of the window first
    pub fn recent_events(&self, limit: usize) -> Vec<EventLogEntry> {
        self.events.recent(limit)
    }

    /// Live copy stream of new event-log entries (fire-and-forget)
    pub fn subscribe_events(&self, buffer: usize) -> mpsc::Receiver<EventLogEntry> {
        self.events.subscribe(buffer)
    }

    /// Cached wallet client, if initialization already succeeded
    pub fn wallet_if_ready(&self) -> Option<Arc<WalletClient>> {
        self.wallet.ready()
    }

    pub fn config(&self) -> &CardanoConfig {
        &self.config
    }

    fn record_wallet_unavailable(&self, operation: &str, reason: &str) {
        self.events.record(
            "wallet_unavailable",
            json!({ "operation": operation, "error": reason }),
        );
    }

    fn create_fallback_response(&self) -> TransactionResponse {
        TransactionResponse::pending(
            self.config.network,
            "Prediction queued for creation",
            "Document store fallback active; Cardano transaction building pending implementation",
        )
    }
}
