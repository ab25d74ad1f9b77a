//! Inverstra Cardano service core
//!
//! Backend core for the Inverstra prediction platform: lazy single-flight
//! wallet client bootstrap, a bounded diagnostic event log, network
//! diagnostics against the Blockfrost data provider, and the transaction
//! facade (create / vote / finalise). Transaction building itself is an
//! explicit pending-implementation placeholder.

pub mod chain;
pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used types
pub use errors::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the service core with proper logging
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inverstra=info".into()),
        )
        .init();

    tracing::info!("🔗 Inverstra service core v{} initialized", VERSION);
    Ok(())
}
