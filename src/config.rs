//! Configuration for the Inverstra service core
//!
//! Loads the Cardano network selection and Blockfrost credentials from
//! environment variables, read once at process start.

use crate::types::Network;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Cardano and provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardanoConfig {
    /// Selected network preset
    pub network: Network,

    /// Network magic number (defaults to the preset's magic)
    pub network_magic: u64,

    /// Blockfrost API base URL (defaults to the preset's endpoint)
    pub blockfrost_url: String,

    /// Blockfrost project id; required, no hardcoded fallback
    pub blockfrost_project_id: String,

    /// Log verbosity; "silent" suppresses console echo of event-log
    /// entries but never the recorded entries themselves
    pub log_level: String,
}

impl CardanoConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        // Unknown network names fall back to preview rather than failing
        let network = std::env::var("CARDANO_NETWORK")
            .ok()
            .and_then(|s| s.parse::<Network>().ok())
            .unwrap_or(Network::Preview);

        let network_magic = match std::env::var("CARDANO_NETWORK_MAGIC") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::configuration("Invalid CARDANO_NETWORK_MAGIC"))?,
            Err(_) => network.magic(),
        };

        let blockfrost_url = std::env::var("CARDANO_BLOCKFROST_URL")
            .unwrap_or_else(|_| network.blockfrost_url().to_string());

        let blockfrost_project_id = std::env::var("CARDANO_BLOCKFROST_PROJECT_ID")
            .map_err(|_| {
                Error::configuration(
                    "CARDANO_BLOCKFROST_PROJECT_ID environment variable required",
                )
            })?;

        let log_level =
            std::env::var("CARDANO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let config = Self {
            network,
            network_magic,
            blockfrost_url,
            blockfrost_project_id,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration for testing (preview network, dummy credential)
    pub fn for_testing() -> Self {
        Self {
            network: Network::Preview,
            network_magic: Network::Preview.magic(),
            blockfrost_url: Network::Preview.blockfrost_url().to_string(),
            blockfrost_project_id: "preview_test_project_id".to_string(),
            log_level: "silent".to_string(),
        }
    }

    /// Validate that required fields are present
    pub fn validate(&self) -> Result<()> {
        if self.blockfrost_project_id.trim().is_empty() {
            return Err(Error::configuration(
                "CARDANO_BLOCKFROST_PROJECT_ID is required to use the Blockfrost provider",
            ));
        }

        if self.blockfrost_url.trim().is_empty() {
            return Err(Error::configuration("Blockfrost URL must not be empty"));
        }

        Ok(())
    }

    /// Whether event-log entries should be echoed to the console
    pub fn echo_events(&self) -> bool {
        self.log_level != "silent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testing_config_is_valid() {
        let config = CardanoConfig::for_testing();
        assert!(config.validate().is_ok());
        assert_eq!(config.network, Network::Preview);
        assert_eq!(config.network_magic, 2);
        assert!(!config.echo_events());
    }

    #[test]
    fn test_missing_project_id_rejected() {
        let mut config = CardanoConfig::for_testing();
        config.blockfrost_project_id = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_echo_follows_log_level() {
        let mut config = CardanoConfig::for_testing();
        config.log_level = "info".to_string();
        assert!(config.echo_events());

        config.log_level = "silent".to_string();
        assert!(!config.echo_events());
    }
}
