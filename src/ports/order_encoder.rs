//! Order Encoder Port - Signed Transaction Assembly
//!
//! Turns a chain-unit order into signed transaction bytes. The wire
//! format (protobuf envelope, sign mode, pubkey type) lives entirely
//! behind this trait.

use super::chain_client::AccountInfo;
use super::signer::TxSigner;
use crate::domain::fee::TxFee;
use crate::domain::order::ChainSpotOrder;

/// Encodes spot orders into signed, broadcast-ready transactions.
pub trait OrderTxEncoder: Send + Sync + 'static {
  /// Build a one-message transaction creating `order`, signed by `signer`
  /// for `account` and carrying `fee`.
  fn encode_order(
    &self,
    signer: &dyn TxSigner,
    order: &ChainSpotOrder,
    account: AccountInfo,
    fee: &TxFee,
  ) -> anyhow::Result<Vec<u8>>;
}
