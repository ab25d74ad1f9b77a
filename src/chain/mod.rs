//! Chain-facing components of the service core

pub mod blockfrost;
pub mod event_log;
pub mod provider;
pub mod service;
pub mod single_flight;
pub mod wallet;

// Re-export the chain surface
pub use blockfrost::BlockfrostClient;
pub use event_log::{DEFAULT_RECENT_LIMIT, EVENT_LOG_CAPACITY, EventLog, EventLogEntry};
pub use provider::{ChainProbe, network_health};
pub use service::CardanoTransactionService;
pub use single_flight::SingleFlight;
pub use wallet::{ProviderWalletConnector, WalletClient, WalletConnector};
