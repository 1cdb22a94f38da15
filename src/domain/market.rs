//! Market identity and market data records.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of a market id in hex characters, without the `0x` prefix.
const MARKET_ID_HEX_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid market id {0:?}: expected 0x followed by 64 hex characters")]
pub struct InvalidMarketId(pub String);

/// Exchange market identifier: a 32-byte hash rendered as `0x…` hex.
///
/// Always stored lowercase so that config, env and indexer values compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MarketId(String);

impl MarketId {
    pub fn parse(raw: &str) -> Result<Self, InvalidMarketId> {
        let trimmed = raw.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| InvalidMarketId(raw.to_string()))?;

        if hex_part.len() != MARKET_ID_HEX_LEN
            || !hex_part.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(InvalidMarketId(raw.to_string()));
        }

        Ok(Self(format!("0x{}", hex_part.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MarketId {
    type Err = InvalidMarketId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MarketId {
    type Error = InvalidMarketId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MarketId> for String {
    fn from(id: MarketId) -> Self {
        id.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 24h market summary as served by the chronos indexing API.
///
/// Missing numeric fields decode as zero rather than failing the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketSummary {
    pub market_id: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    /// Last traded price in human units (quote per base).
    pub price: f64,
    /// 24h change in percent.
    pub change: f64,
}

/// Static spot market parameters needed to build an order.
///
/// Tick sizes are expressed in chain units, i.e. already scaled by the
/// token decimals the same way order prices and quantities are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotMarketMeta {
    pub market_id: MarketId,
    pub ticker: String,
    pub base_decimals: u32,
    pub quote_decimals: u32,
    pub min_price_tick_size: Decimal,
    pub min_quantity_tick_size: Decimal,
}
