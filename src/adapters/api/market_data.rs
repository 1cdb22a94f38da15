//! Indexer Market Data Adapter
//!
//! Implements the `MarketDataSource` port against the chronos market
//! summary API and the exchange indexer's spot market endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

use super::client::{join_url, JsonHttpClient};
use super::types::SpotMarketResponse;
use crate::config::NetworkConfig;
use crate::domain::market::{MarketId, MarketSummary, SpotMarketMeta};
use crate::ports::market_data::MarketDataSource;

/// Summary window requested from chronos.
const SUMMARY_RESOLUTION: &str = "24h";

/// Market data adapter backed by the indexer REST APIs.
pub struct IndexerMarketData {
  /// Shared JSON client.
  client: JsonHttpClient,
  /// Chronos API base URL.
  chronos_url: String,
  /// Exchange indexer base URL.
  indexer_url: String,
}

impl IndexerMarketData {
  pub fn new(client: JsonHttpClient, chronos_url: String, indexer_url: String) -> Self {
    Self {
      client,
      chronos_url,
      indexer_url,
    }
  }

  pub fn from_config(client: JsonHttpClient, net: &NetworkConfig) -> Self {
    Self::new(client, net.chronos_url.clone(), net.indexer_url.clone())
  }

  /// `{chronos}/api/chronos/v1/spot/market_summary?marketId=..&resolution=24h`
  pub fn summary_url(&self, market_id: &MarketId) -> String {
    format!(
      "{}?marketId={}&resolution={}",
      join_url(&self.chronos_url, "api/chronos/v1/spot/market_summary"),
      market_id,
      SUMMARY_RESOLUTION
    )
  }

  /// `{indexer}/api/exchange/spot/v1/markets/{id}`
  pub fn spot_market_url(&self, market_id: &MarketId) -> String {
    join_url(
      &self.indexer_url,
      &format!("api/exchange/spot/v1/markets/{market_id}"),
    )
  }
}

#[async_trait]
impl MarketDataSource for IndexerMarketData {
  #[instrument(skip(self), fields(market = %market_id))]
  async fn market_summary(&self, market_id: &MarketId) -> Result<MarketSummary> {
    let summary: MarketSummary = self
      .client
      .get_json(&self.summary_url(market_id))
      .await
      .context("Failed to fetch market summary")?;

    debug!(price = summary.price, volume = summary.volume, "Market summary fetched");
    Ok(summary)
  }

  #[instrument(skip(self), fields(market = %market_id))]
  async fn spot_market(&self, market_id: &MarketId) -> Result<SpotMarketMeta> {
    let response: SpotMarketResponse = self
      .client
      .get_json(&self.spot_market_url(market_id))
      .await
      .context("Failed to fetch spot market")?;

    let meta = response.market.into_meta()?;
    debug!(
      ticker = %meta.ticker,
      base_decimals = meta.base_decimals,
      quote_decimals = meta.quote_decimals,
      "Spot market fetched"
    );
    Ok(meta)
  }

  async fn is_healthy(&self) -> bool {
    self.client.reachable(&self.indexer_url).await
  }
}
