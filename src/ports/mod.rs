//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MarketDataSource`: Market summaries and spot market parameters
//! - `ChainClient`: Account lookup, simulate, broadcast
//! - `OrderTxEncoder`: Chain-unit order → signed transaction bytes
//! - `TxSigner`: Key that signs order transactions

pub mod chain_client;
pub mod market_data;
pub mod order_encoder;
pub mod signer;

pub use chain_client::{AccountInfo, BroadcastResult, ChainClient, SimulationResult};
pub use market_data::MarketDataSource;
pub use order_encoder::OrderTxEncoder;
pub use signer::TxSigner;
