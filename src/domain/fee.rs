//! Transaction fee and gas-limit arithmetic.
//!
//! The fee is always `gas_limit × gas_price` in the fee denom, where the
//! gas limit is the simulated gas scaled by the configured adjustment.

use serde::Serialize;

/// Fee attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxFee {
    pub amount: u128,
    pub denom: String,
    pub gas_limit: u64,
}

impl TxFee {
    /// Zero fee, used for simulation.
    pub fn zero(denom: &str) -> Self {
        Self {
            amount: 0,
            denom: denom.to_string(),
            gas_limit: 0,
        }
    }

    /// `gas_limit × gas_price` in `denom`.
    pub fn from_gas(gas_limit: u64, gas_price: u64, denom: &str) -> Self {
        Self {
            amount: u128::from(gas_limit) * u128::from(gas_price),
            denom: denom.to_string(),
            gas_limit,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

/// Gas limit after applying the adjustment factor, rounded up.
pub fn adjusted_gas(gas_used: u64, adjustment: f64) -> u64 {
    (gas_used as f64 * adjustment).ceil() as u64
}
