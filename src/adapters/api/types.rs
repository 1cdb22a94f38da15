//! Indexer API Request/Response Types
//!
//! Serialization types for the exchange indexer REST API. Only the
//! fields the client reads are declared; everything else is ignored.

use std::str::FromStr;

use anyhow::{ensure, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::market::{MarketId, SpotMarketMeta};

/// Status string of a market open for trading.
const ACTIVE_STATUS: &str = "active";

/// Response from `GET /api/exchange/spot/v1/markets/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotMarketResponse {
  pub market: SpotMarketInfo,
}

/// Spot market as described by the indexer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotMarketInfo {
  /// Market hash.
  pub market_id: String,
  /// e.g. "ATOM/INJ".
  #[serde(default)]
  pub ticker: String,
  /// Market status ("active", "paused", ...).
  #[serde(default)]
  pub market_status: Option<String>,
  /// Base token metadata (absent for unknown denoms).
  pub base_token_meta: Option<TokenMeta>,
  /// Quote token metadata (absent for unknown denoms).
  pub quote_token_meta: Option<TokenMeta>,
  /// Minimum price increment in chain units.
  pub min_price_tick_size: String,
  /// Minimum quantity increment in chain units.
  pub min_quantity_tick_size: String,
}

/// Token metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenMeta {
  #[serde(default)]
  pub symbol: String,
  pub decimals: u32,
}

impl SpotMarketInfo {
  /// Convert into the domain record.
  ///
  /// Fails on missing token metadata, non-positive tick sizes, or a market
  /// the indexer reports as anything other than active.
  pub fn into_meta(self) -> Result<SpotMarketMeta> {
    let market_id = MarketId::parse(&self.market_id)?;
    if let Some(status) = &self.market_status {
      ensure!(
        status == ACTIVE_STATUS,
        "Market {market_id} is {status}, not {ACTIVE_STATUS}"
      );
    }
    let base = self
      .base_token_meta
      .with_context(|| format!("Market {market_id} has no base token metadata"))?;
    let quote = self
      .quote_token_meta
      .with_context(|| format!("Market {market_id} has no quote token metadata"))?;

    let min_price_tick_size = Decimal::from_str(&self.min_price_tick_size)
      .with_context(|| format!("Invalid minPriceTickSize {:?}", self.min_price_tick_size))?;
    let min_quantity_tick_size = Decimal::from_str(&self.min_quantity_tick_size).with_context(
      || format!("Invalid minQuantityTickSize {:?}", self.min_quantity_tick_size),
    )?;
    ensure!(
      min_price_tick_size > Decimal::ZERO,
      "Market {market_id} has non-positive minPriceTickSize {min_price_tick_size}"
    );
    ensure!(
      min_quantity_tick_size > Decimal::ZERO,
      "Market {market_id} has non-positive minQuantityTickSize {min_quantity_tick_size}"
    );

    let ticker = if self.ticker.is_empty() {
      format!("{}/{}", base.symbol, quote.symbol)
    } else {
      self.ticker
    };

    Ok(SpotMarketMeta {
      market_id,
      ticker,
      base_decimals: base.decimals,
      quote_decimals: quote.decimals,
      min_price_tick_size,
      min_quantity_tick_size,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  const RESPONSE: &str = r#"{
    "market": {
      "marketId": "0xfbd55f13641acbb6e69d7b59eb335dabe2ecbfea136082ce2eedaba8a0c917a3",
      "marketStatus": "active",
      "ticker": "ATOM/INJ",
      "baseDenom": "ibc/atom",
      "baseTokenMeta": {"name": "Cosmos", "symbol": "ATOM", "decimals": 6},
      "quoteDenom": "inj",
      "quoteTokenMeta": {"name": "Injective", "symbol": "INJ", "decimals": 18},
      "makerFeeRate": "-0.0001",
      "minPriceTickSize": "1000000",
      "minQuantityTickSize": "10000"
    }
  }"#;

  #[test]
  fn test_spot_market_response_deserialization() {
    let resp: SpotMarketResponse = serde_json::from_str(RESPONSE).unwrap();
    let meta = resp.market.into_meta().unwrap();
    assert_eq!(meta.ticker, "ATOM/INJ");
    assert_eq!(meta.base_decimals, 6);
    assert_eq!(meta.quote_decimals, 18);
    assert_eq!(meta.min_price_tick_size, dec!(1000000));
    assert_eq!(meta.min_quantity_tick_size, dec!(10000));
  }

  #[test]
  fn test_missing_token_meta_is_error() {
    let json = r#"{
      "marketId": "0xfbd55f13641acbb6e69d7b59eb335dabe2ecbfea136082ce2eedaba8a0c917a3",
      "baseTokenMeta": null,
      "quoteTokenMeta": {"symbol": "INJ", "decimals": 18},
      "minPriceTickSize": "0.001",
      "minQuantityTickSize": "1"
    }"#;
    let info: SpotMarketInfo = serde_json::from_str(json).unwrap();
    assert!(info.into_meta().is_err());
  }

  fn market_json(status: &str, price_tick: &str, quantity_tick: &str) -> String {
    format!(
      r#"{{
        "marketId": "0xfbd55f13641acbb6e69d7b59eb335dabe2ecbfea136082ce2eedaba8a0c917a3",
        "marketStatus": "{status}",
        "baseTokenMeta": {{"symbol": "ATOM", "decimals": 6}},
        "quoteTokenMeta": {{"symbol": "INJ", "decimals": 18}},
        "minPriceTickSize": "{price_tick}",
        "minQuantityTickSize": "{quantity_tick}"
      }}"#
    )
  }

  #[test]
  fn test_non_positive_tick_is_error() {
    for (price_tick, quantity_tick) in [("0", "10000"), ("-1000", "10000"), ("1000", "0")] {
      let info: SpotMarketInfo =
        serde_json::from_str(&market_json("active", price_tick, quantity_tick)).unwrap();
      let err = info.into_meta().unwrap_err();
      assert!(err.to_string().contains("non-positive"), "{err}");
    }
  }

  #[test]
  fn test_inactive_market_is_error() {
    let info: SpotMarketInfo =
      serde_json::from_str(&market_json("paused", "1000", "10000")).unwrap();
    let err = info.into_meta().unwrap_err();
    assert!(err.to_string().contains("paused"));
  }

  #[test]
  fn test_ticker_falls_back_to_symbols() {
    let info: SpotMarketInfo =
      serde_json::from_str(&market_json("active", "1000", "10000")).unwrap();
    assert_eq!(info.into_meta().unwrap().ticker, "ATOM/INJ");
  }
}
