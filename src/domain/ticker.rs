//! Ticker → market id resolution.
//!
//! Tickers are normalized by dropping `-` and `/` and upper-casing, so
//! `atom/inj`, `ATOM-INJ` and `ATOMINJ` all name the same market. The
//! configured table is consulted first; the process environment variable
//! named by the normalized ticker is the fallback.

use std::collections::HashMap;

use thiserror::Error;

use super::market::{InvalidMarketId, MarketId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TickerError {
    #[error("market id not found for ticker {0}")]
    NotFound(String),
    #[error("ticker {ticker} maps to an invalid market id: {source}")]
    InvalidMarketId {
        ticker: String,
        #[source]
        source: InvalidMarketId,
    },
}

/// Strip separators and upper-case: `"atom/inj"` → `"ATOMINJ"`.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker
        .chars()
        .filter(|c| *c != '-' && *c != '/')
        .collect::<String>()
        .to_uppercase()
}

/// Known ticker → market id mappings.
#[derive(Debug, Clone, Default)]
pub struct TickerBook {
    markets: HashMap<String, MarketId>,
}

impl TickerBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ticker. Later inserts for the same normalized ticker win.
    pub fn insert(&mut self, ticker: &str, market_id: MarketId) {
        self.markets.insert(normalize_ticker(ticker), market_id);
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// Resolve against the table, then the process environment.
    pub fn resolve(&self, ticker: &str) -> Result<MarketId, TickerError> {
        self.resolve_with(ticker, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit fallback lookup in place of the environment.
    pub fn resolve_with<F>(&self, ticker: &str, fallback: F) -> Result<MarketId, TickerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = normalize_ticker(ticker);

        if let Some(id) = self.markets.get(&key) {
            return Ok(id.clone());
        }

        let raw = fallback(&key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| TickerError::NotFound(key.clone()))?;

        MarketId::parse(&raw).map_err(|source| TickerError::InvalidMarketId {
            ticker: key,
            source,
        })
    }
}

impl FromIterator<(String, MarketId)> for TickerBook {
    fn from_iter<I: IntoIterator<Item = (String, MarketId)>>(iter: I) -> Self {
        let mut book = Self::new();
        for (ticker, id) in iter {
            book.insert(&ticker, id);
        }
        book
    }
}
