//! Market Data Port - Indexer Query Interface
//!
//! Defines the trait for reading market summaries and static spot
//! market parameters from the exchange's indexing service.

use async_trait::async_trait;

use crate::domain::market::{MarketId, MarketSummary, SpotMarketMeta};

/// Trait for market data providers.
///
/// Implementors query an HTTP indexer. Each call is a single request;
/// callers decide what to do on failure.
#[async_trait]
pub trait MarketDataSource: Send + Sync + 'static {
  /// Get the 24h market summary (open/high/low/volume/price/change).
  async fn market_summary(&self, market_id: &MarketId) -> anyhow::Result<MarketSummary>;

  /// Get token decimals and tick sizes for a spot market.
  async fn spot_market(&self, market_id: &MarketId) -> anyhow::Result<SpotMarketMeta>;

  /// Check if the indexer is reachable.
  async fn is_healthy(&self) -> bool;
}
