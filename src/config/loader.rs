//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{AppConfig, SUPPORTED_NETWORKS};
use crate::domain::market::MarketId;
use crate::domain::ticker::{normalize_ticker, TickerBook};

/// Default config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    network = %config.network.name,
    chain_id = %config.network.chain_id,
    markets = config.markets.len(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Load `path` if given, else `config.toml` if it exists, else local defaults.
pub fn load_or_default(path: Option<&str>) -> Result<AppConfig> {
  match path {
    Some(p) => load_config(p),
    None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
    None => {
      let config = AppConfig::default_local();
      validate_config(&config)?;
      info!("No config.toml found, using local network defaults");
      Ok(config)
    }
  }
}

/// Parse and validate TOML content.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Build the ticker table from the configured markets.
pub fn ticker_book(config: &AppConfig) -> Result<TickerBook> {
  config
    .markets
    .iter()
    .map(|m| {
      let id = MarketId::parse(&m.market_id)
        .with_context(|| format!("Market {} has an invalid market_id", m.ticker))?;
      Ok((m.ticker.clone(), id))
    })
    .collect()
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Known network name and non-empty endpoints
/// - Sensible gas settings
/// - Well-formed, unique market mappings
pub fn validate_config(config: &AppConfig) -> Result<()> {
  let net = &config.network;

  anyhow::ensure!(
    SUPPORTED_NETWORKS.contains(&net.name.as_str()),
    "Unsupported network {:?}, expected one of {:?}",
    net.name,
    SUPPORTED_NETWORKS
  );
  anyhow::ensure!(!net.chain_id.is_empty(), "chain_id must not be empty");
  anyhow::ensure!(!net.lcd_url.is_empty(), "LCD URL must not be empty");
  anyhow::ensure!(!net.indexer_url.is_empty(), "Indexer URL must not be empty");
  anyhow::ensure!(!net.chronos_url.is_empty(), "Chronos URL must not be empty");
  anyhow::ensure!(!net.fee_denom.is_empty(), "fee_denom must not be empty");
  anyhow::ensure!(net.gas_price > 0, "gas_price must be positive");
  anyhow::ensure!(
    net.gas_adjustment >= 1.0 && net.gas_adjustment.is_finite(),
    "gas_adjustment must be >= 1.0, got {}",
    net.gas_adjustment
  );
  anyhow::ensure!(net.timeout_seconds > 0, "timeout_seconds must be positive");

  anyhow::ensure!(
    !config.wallet.key_name.is_empty(),
    "wallet.key_name must not be empty"
  );
  anyhow::ensure!(
    !config.wallet.address_prefix.is_empty(),
    "wallet.address_prefix must not be empty"
  );

  let mut seen = HashSet::new();
  for (i, market) in config.markets.iter().enumerate() {
    anyhow::ensure!(
      !market.ticker.trim().is_empty(),
      "Market {} has empty ticker",
      i
    );
    anyhow::ensure!(
      MarketId::parse(&market.market_id).is_ok(),
      "Market {} ({}) has invalid market_id {:?}",
      i,
      market.ticker,
      market.market_id
    );
    anyhow::ensure!(
      seen.insert(normalize_ticker(&market.ticker)),
      "Market {} ({}) duplicates an earlier ticker",
      i,
      market.ticker
    );
  }

  Ok(())
}
