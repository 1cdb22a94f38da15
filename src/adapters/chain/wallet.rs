//! Local Wallet - ethsecp256k1 Transaction Signing
//!
//! Holds a secp256k1 private key through alloy's `PrivateKeySigner`.
//! Exchange accounts use Ethereum-style keys: the account address is
//! the keccak-derived 20-byte address, and sign docs are signed over
//! their keccak256 hash.
//!
//! Keys are selected by name: key `user3` is read from the
//! `USER3_PRIVATE_KEY` environment variable (set in `.env`).

use alloy::primitives::{keccak256, Address};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use anyhow::{Context, Result};
use tracing::info;

use crate::ports::signer::TxSigner;

/// Env var holding the private key for `key_name`.
pub fn private_key_env_var(key_name: &str) -> String {
    format!(
        "{}_PRIVATE_KEY",
        key_name.trim().to_ascii_uppercase().replace(['-', ' ', '.'], "_")
    )
}

/// In-process signing key.
pub struct LocalWallet {
    /// Name the key was selected by (never the key itself).
    key_name: String,
    signer: PrivateKeySigner,
}

impl LocalWallet {
    /// Build from a hex private key (with or without `0x`).
    pub fn from_hex(key_name: &str, private_key: &str) -> Result<Self> {
        let raw = private_key.trim();
        let raw = raw.strip_prefix("0x").unwrap_or(raw);
        let signer: PrivateKeySigner = raw
            .parse()
            .with_context(|| format!("Invalid private key for key {key_name:?}"))?;

        Ok(Self {
            key_name: key_name.to_string(),
            signer,
        })
    }

    /// Load the key named `key_name` from the environment.
    pub fn from_env(key_name: &str) -> Result<Self> {
        let var = private_key_env_var(key_name);
        let key = std::env::var(&var).with_context(|| format!("{var} not set"))?;
        let wallet = Self::from_hex(key_name, &key)?;
        info!(key = key_name, address = %wallet.address(), "Signing key loaded");
        Ok(wallet)
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("key_name", &self.key_name)
            .field("address", &self.signer.address())
            .finish()
    }
}

impl TxSigner for LocalWallet {
    fn address(&self) -> Address {
        self.signer.address()
    }

    fn public_key(&self) -> Vec<u8> {
        self.signer
            .credential()
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    fn sign(&self, sign_doc: &[u8]) -> Result<[u8; 64]> {
        let digest = keccak256(sign_doc);
        let signature = self
            .signer
            .sign_hash_sync(&digest)
            .context("Failed to sign transaction")?;

        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
        out[32..].copy_from_slice(&signature.s().to_be_bytes::<32>());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, PrimitiveSignature, U256};

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn wallet() -> LocalWallet {
        LocalWallet::from_hex("genesis", KEY).unwrap()
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(private_key_env_var("user3"), "USER3_PRIVATE_KEY");
        assert_eq!(private_key_env_var("market-maker"), "MARKET_MAKER_PRIVATE_KEY");
    }

    #[test]
    fn test_address_derivation() {
        assert_eq!(
            wallet().address(),
            address!("2c7536e3605d9c16a7a3d7b1898e529396a65c23")
        );
        let without_prefix = LocalWallet::from_hex("k", &KEY[2..]).unwrap();
        assert_eq!(without_prefix.address(), wallet().address());
    }

    #[test]
    fn test_rejects_bad_key() {
        assert!(LocalWallet::from_hex("k", "0x1234").is_err());
        assert!(LocalWallet::from_hex("k", "not hex").is_err());
    }

    #[test]
    fn test_public_key_is_compressed() {
        let pk = wallet().public_key();
        assert_eq!(pk.len(), 33);
        assert!(pk[0] == 0x02 || pk[0] == 0x03);
    }

    #[test]
    fn test_signature_recovers_to_signer() {
        let w = wallet();
        let doc = b"sign doc bytes";
        let sig = w.sign(doc).unwrap();
        assert_eq!(sig, w.sign(doc).unwrap(), "RFC6979 signing is deterministic");

        let r = U256::from_be_slice(&sig[..32]);
        let s = U256::from_be_slice(&sig[32..]);
        let digest = keccak256(doc);
        let recovered = [false, true]
            .into_iter()
            .filter_map(|parity| {
                PrimitiveSignature::new(r, s, parity)
                    .recover_address_from_prehash(&digest)
                    .ok()
            })
            .any(|addr| addr == w.address());
        assert!(recovered);
    }

    #[test]
    fn test_debug_hides_key() {
        let dbg = format!("{:?}", wallet());
        assert!(!dbg.contains(&KEY[2..]));
        assert!(dbg.contains("genesis"));
    }
}
