//! Transaction Signer Port
//!
//! Abstracts the key that authorizes orders, so the use case can be
//! exercised with a fixed test key and the wallet adapter can change
//! without touching transaction assembly.

use alloy::primitives::Address;

/// A secp256k1 key able to sign exchange transactions.
pub trait TxSigner: Send + Sync + 'static {
  /// 20-byte account address derived from the public key.
  fn address(&self) -> Address;

  /// 33-byte compressed secp256k1 public key.
  fn public_key(&self) -> Vec<u8>;

  /// Sign the encoded `SignDoc`, returning a 64-byte `r || s` signature.
  fn sign(&self, sign_doc: &[u8]) -> anyhow::Result<[u8; 64]>;
}
