//! Configuration Module - TOML-based Client Configuration
//!
//! Loads and validates configuration from `config.toml` with
//! environment variable overrides via `.env` files.
//! Endpoints, chain parameters and ticker mappings are externalized
//! here - nothing is hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Networks the client knows how to talk to.
pub const SUPPORTED_NETWORKS: [&str; 3] = ["local", "testnet", "mainnet"];

/// Top-level client configuration.
///
/// Loaded from `config.toml` at startup, or built from the local
/// network defaults when no file is present.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Client identity and runtime flags.
  #[serde(default)]
  pub client: ClientConfig,
  /// Chain and indexer endpoints.
  #[serde(default)]
  pub network: NetworkConfig,
  /// Signing key selection.
  #[serde(default)]
  pub wallet: WalletConfig,
  /// Ticker to market id mappings.
  #[serde(default)]
  pub markets: Vec<MarketConfig>,
}

impl AppConfig {
  /// Built-in configuration for a locally running chain + indexer.
  pub fn default_local() -> Self {
    Self {
      client: ClientConfig::default(),
      network: NetworkConfig::default(),
      wallet: WalletConfig::default(),
      markets: Vec::new(),
    }
  }
}

/// Client identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
  /// Human-readable client name (shows up in logs).
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Simulate orders but never broadcast them.
  #[serde(default)]
  pub dry_run: bool,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
      dry_run: false,
    }
  }
}

/// Chain and indexer endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
  /// Network name: local, testnet or mainnet.
  #[serde(default = "default_network_name")]
  pub name: String,
  /// Cosmos chain id used in the sign doc.
  #[serde(default = "default_chain_id")]
  pub chain_id: String,
  /// Chain REST (LCD) gateway.
  #[serde(default = "default_lcd_url")]
  pub lcd_url: String,
  /// Exchange indexer REST API.
  #[serde(default = "default_indexer_url")]
  pub indexer_url: String,
  /// Chronos market summary API.
  #[serde(default = "default_chronos_url")]
  pub chronos_url: String,
  /// Denom fees are paid in.
  #[serde(default = "default_fee_denom")]
  pub fee_denom: String,
  /// Gas price in fee denom base units.
  #[serde(default = "default_gas_price")]
  pub gas_price: u64,
  /// Multiplier applied to simulated gas.
  #[serde(default = "default_gas_adjustment")]
  pub gas_adjustment: f64,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Skip TLS certificate verification (self-signed local indexers).
  #[serde(default)]
  pub accept_invalid_certs: bool,
}

impl Default for NetworkConfig {
  fn default() -> Self {
    Self {
      name: default_network_name(),
      chain_id: default_chain_id(),
      lcd_url: default_lcd_url(),
      indexer_url: default_indexer_url(),
      chronos_url: default_chronos_url(),
      fee_denom: default_fee_denom(),
      gas_price: default_gas_price(),
      gas_adjustment: default_gas_adjustment(),
      timeout_seconds: default_timeout(),
      accept_invalid_certs: false,
    }
  }
}

/// Signing key configuration.
///
/// The private key itself is never in config: it is read from the
/// `<KEY_NAME>_PRIVATE_KEY` environment variable (set in `.env`).
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
  /// Name of the key to sign with (e.g. "genesis", "user3").
  #[serde(default = "default_key_name")]
  pub key_name: String,
  /// Bech32 prefix for account addresses.
  #[serde(default = "default_address_prefix")]
  pub address_prefix: String,
}

impl Default for WalletConfig {
  fn default() -> Self {
    Self {
      key_name: default_key_name(),
      address_prefix: default_address_prefix(),
    }
  }
}

/// Ticker to market id mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
  /// Ticker as written by humans (e.g. "ATOM/INJ").
  pub ticker: String,
  /// 0x-prefixed 32-byte market id.
  pub market_id: String,
}

// Default value functions for serde

fn default_name() -> String {
  "spot-client".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_network_name() -> String {
  "local".to_string()
}

fn default_chain_id() -> String {
  "injective-1".to_string()
}

fn default_lcd_url() -> String {
  "http://localhost:10337".to_string()
}

fn default_indexer_url() -> String {
  "http://localhost:4444".to_string()
}

fn default_chronos_url() -> String {
  "http://localhost:4444".to_string()
}

fn default_fee_denom() -> String {
  "inj".to_string()
}

fn default_gas_price() -> u64 {
  160_000_000
}

fn default_gas_adjustment() -> f64 {
  1.3
}

fn default_timeout() -> u64 {
  30
}

fn default_key_name() -> String {
  "genesis".to_string()
}

fn default_address_prefix() -> String {
  crate::domain::subaccount::DEFAULT_ADDRESS_PREFIX.to_string()
}
