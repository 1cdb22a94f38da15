//! Exchange Indexer API Adapter
//!
//! HTTP access to the exchange's indexing service: market summaries
//! from the chronos API and spot market parameters from the indexer.
//!
//! Sub-modules:
//! - `client`: JSON HTTP client (timeout, TLS options, status handling)
//! - `market_data`: `MarketDataSource` implementation
//! - `types`: API response type definitions

pub mod client;
pub mod market_data;
pub mod types;

pub use client::{HttpClientConfig, JsonHttpClient};
pub use market_data::IndexerMarketData;
