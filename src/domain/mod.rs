//! Domain layer - Core order and market types.
//!
//! Pure logic with no I/O (hexagonal architecture inner ring): market ids,
//! order types, subaccount derivation, ticker resolution, and the
//! human ↔ chain unit conversion that every order goes through.

pub mod chain_format;
pub mod fee;
pub mod market;
pub mod order;
pub mod subaccount;
pub mod ticker;

// Re-export core types for convenience
pub use chain_format::{ChainDec, ChainFormatError};
pub use fee::{adjusted_gas, TxFee};
pub use market::{MarketId, MarketSummary, SpotMarketMeta};
pub use order::{ChainSpotOrder, OrderType, SpotOrder};
pub use subaccount::SubaccountId;
pub use ticker::{normalize_ticker, TickerBook};
