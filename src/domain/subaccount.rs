//! Subaccount ids and bech32 account addresses.
//!
//! A subaccount id is the 20-byte account address followed by a 12-byte
//! big-endian nonce, rendered as 0x-prefixed hex. Nonce 0 is the default
//! subaccount every account owns.

use std::fmt;

use alloy::primitives::{Address, B256};
use bech32::{Bech32, Hrp};
use thiserror::Error;

/// Bech32 human readable prefix for exchange accounts.
pub const DEFAULT_ADDRESS_PREFIX: &str = "inj";

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid bech32 prefix {0:?}")]
    InvalidPrefix(String),
    #[error("bech32 encoding failed: {0}")]
    Encode(String),
    #[error("bech32 decoding failed: {0}")]
    Decode(String),
    #[error("expected prefix {expected:?}, got {actual:?}")]
    PrefixMismatch { expected: String, actual: String },
    #[error("expected a 20-byte address, got {0} bytes")]
    Length(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubaccountId(B256);

impl SubaccountId {
    pub fn new(address: Address, nonce: u32) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..20].copy_from_slice(address.as_slice());
        bytes[28..].copy_from_slice(&nonce.to_be_bytes());
        Self(B256::from(bytes))
    }

    /// The default (nonce 0) subaccount of `address`.
    pub fn default_for(address: Address) -> Self {
        Self::new(address, 0)
    }

    pub fn address(&self) -> Address {
        Address::from_slice(&self.0[..20])
    }

    pub fn nonce(&self) -> u32 {
        let mut tail = [0u8; 4];
        tail.copy_from_slice(&self.0[28..]);
        u32::from_be_bytes(tail)
    }

    /// Lowercase `0x…` hex, 66 characters.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for SubaccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Encode an account address as bech32 under `prefix` (e.g. `inj1…`).
pub fn bech32_address(prefix: &str, address: Address) -> Result<String, AddressError> {
    let hrp = Hrp::parse(prefix).map_err(|_| AddressError::InvalidPrefix(prefix.to_string()))?;
    bech32::encode::<Bech32>(hrp, address.as_slice())
        .map_err(|e| AddressError::Encode(e.to_string()))
}

/// Decode a bech32 account address, checking its prefix.
pub fn address_from_bech32(prefix: &str, encoded: &str) -> Result<Address, AddressError> {
    let (hrp, data) =
        bech32::decode(encoded).map_err(|e| AddressError::Decode(e.to_string()))?;

    if hrp.as_str() != prefix {
        return Err(AddressError::PrefixMismatch {
            expected: prefix.to_string(),
            actual: hrp.as_str().to_string(),
        });
    }
    if data.len() != 20 {
        return Err(AddressError::Length(data.len()));
    }
    Ok(Address::from_slice(&data))
}
