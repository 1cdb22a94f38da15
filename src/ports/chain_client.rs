//! Chain Client Port - Transaction Submission Interface
//!
//! Defines the trait for the chain node calls needed to place an
//! order: account lookup, transaction simulation, and broadcast.
//! Transactions cross this boundary as fully encoded `TxRaw` bytes.

use async_trait::async_trait;

/// On-chain account state needed to sign a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountInfo {
  /// Account number assigned at account creation.
  pub account_number: u64,
  /// Next expected transaction sequence.
  pub sequence: u64,
}

/// Result of simulating a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
  /// Gas consumed during simulation.
  pub gas_used: u64,
  /// Gas limit the simulated tx carried.
  pub gas_wanted: u64,
  /// Order hash reported by the first message response, if any.
  pub order_hash: Option<String>,
}

/// Result of a synchronous broadcast (mempool admission, not inclusion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastResult {
  /// Transaction hash (uppercase hex).
  pub tx_hash: String,
  /// ABCI result code; 0 means accepted.
  pub code: u32,
  /// Raw log from the node.
  pub raw_log: String,
}

/// Trait for chain node access.
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
  /// Look up account number and sequence for a bech32 address.
  async fn account(&self, address: &str) -> anyhow::Result<AccountInfo>;

  /// Simulate a signed transaction and report gas usage.
  async fn simulate(&self, tx_bytes: &[u8]) -> anyhow::Result<SimulationResult>;

  /// Broadcast a signed transaction in sync mode.
  ///
  /// # Errors
  /// Returns error if the node rejects the transaction (non-zero code).
  async fn broadcast_sync(&self, tx_bytes: &[u8]) -> anyhow::Result<BroadcastResult>;

  /// Check if the node connection is healthy.
  async fn is_healthy(&self) -> bool;
}
