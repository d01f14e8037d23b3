//! Application configuration management.

use std::collections::HashMap;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Wallet provisioning configuration.
    #[serde(default)]
    pub wallet: WalletConfig,
    /// Catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Wallet provisioning configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Balance granted to every newly provisioned wallet, in coins.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: i64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
        }
    }
}

fn default_starting_balance() -> i64 {
    1000
}

/// Catalog configuration.
///
/// When `items` is empty the built-in standard table is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Item name to price overrides, in coins.
    #[serde(default)]
    pub items: HashMap<String, i64>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COINMERCH").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("config should build")
            .try_deserialize()
            .expect("config should deserialize")
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let cfg = parse(
            r#"
            [database]
            url = "postgres://localhost/coinmerch_dev"
            "#,
        );

        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(cfg.wallet.starting_balance, 1000);
        assert!(cfg.catalog.items.is_empty());
    }

    #[test]
    fn test_overrides_are_respected() {
        let cfg = parse(
            r#"
            [database]
            url = "postgres://localhost/coinmerch_dev"
            max_connections = 32

            [wallet]
            starting_balance = 500

            [catalog.items]
            sticker = 5
            "#,
        );

        assert_eq!(cfg.database.max_connections, 32);
        assert_eq!(cfg.wallet.starting_balance, 500);
        assert_eq!(cfg.catalog.items.get("sticker"), Some(&5));
    }
}
