//! LCD Chain Client - Cosmos REST Gateway Access
//!
//! Implements the `ChainClient` port over the chain's REST (LCD)
//! gateway: account lookup, tx simulation, and sync broadcast.
//! Transactions are sent as base64 `TxRaw` bytes.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::adapters::api::client::{join_url, JsonHttpClient};
use crate::ports::chain_client::{AccountInfo, BroadcastResult, ChainClient, SimulationResult};

const BROADCAST_MODE_SYNC: &str = "BROADCAST_MODE_SYNC";

#[derive(Debug, Serialize)]
struct TxBytesRequest<'a> {
    tx_bytes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'a str>,
}

/// `GET /cosmos/auth/v1beta1/accounts/{addr}`
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub account: AccountEnvelope,
}

/// Either a flat `BaseAccount` or an `EthAccount` wrapping one.
#[derive(Debug, Deserialize)]
pub struct AccountEnvelope {
    #[serde(rename = "@type", default)]
    pub type_url: String,
    #[serde(default)]
    pub base_account: Option<BaseAccountJson>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub sequence: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BaseAccountJson {
    pub account_number: String,
    #[serde(default)]
    pub sequence: String,
}

impl AccountEnvelope {
    pub fn into_info(self) -> Result<AccountInfo> {
        let (number, sequence) = match self.base_account {
            Some(base) => (base.account_number, base.sequence),
            None => (
                self.account_number
                    .with_context(|| format!("{} has no account_number", self.type_url))?,
                self.sequence.unwrap_or_default(),
            ),
        };

        Ok(AccountInfo {
            account_number: parse_u64(&number).context("Invalid account_number")?,
            sequence: parse_u64(&sequence).context("Invalid sequence")?,
        })
    }
}

/// `POST /cosmos/tx/v1beta1/simulate`
#[derive(Debug, Deserialize)]
pub struct SimulateResponse {
    pub gas_info: GasInfo,
    #[serde(default)]
    pub result: Option<SimulateResult>,
}

#[derive(Debug, Deserialize)]
pub struct GasInfo {
    #[serde(default)]
    pub gas_wanted: String,
    pub gas_used: String,
}

#[derive(Debug, Deserialize)]
pub struct SimulateResult {
    #[serde(default)]
    pub msg_responses: Vec<serde_json::Value>,
}

impl SimulateResponse {
    pub fn into_result(self) -> Result<SimulationResult> {
        let order_hash = self
            .result
            .as_ref()
            .and_then(|r| r.msg_responses.first())
            .and_then(|m| m.get("order_hash"))
            .and_then(|h| h.as_str())
            .map(str::to_string);

        Ok(SimulationResult {
            gas_used: parse_u64(&self.gas_info.gas_used).context("Invalid gas_used")?,
            gas_wanted: parse_u64(&self.gas_info.gas_wanted).context("Invalid gas_wanted")?,
            order_hash,
        })
    }
}

/// `POST /cosmos/tx/v1beta1/txs`
#[derive(Debug, Deserialize)]
pub struct BroadcastResponse {
    pub tx_response: TxResponse,
}

#[derive(Debug, Deserialize)]
pub struct TxResponse {
    pub txhash: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub raw_log: String,
}

impl TxResponse {
    /// A non-zero code means the node refused the transaction.
    pub fn into_result(self) -> Result<BroadcastResult> {
        if self.code != 0 {
            warn!(
                code = self.code,
                codespace = %self.codespace,
                raw_log = %self.raw_log,
                "Transaction rejected"
            );
            bail!(
                "Transaction {} rejected with code {} ({}): {}",
                self.txhash,
                self.code,
                self.codespace,
                self.raw_log
            );
        }
        Ok(BroadcastResult {
            tx_hash: self.txhash,
            code: self.code,
            raw_log: self.raw_log,
        })
    }
}

/// Empty strings count as zero (fresh accounts report `sequence: ""` on some nodes).
fn parse_u64(raw: &str) -> Result<u64> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .with_context(|| format!("expected an unsigned integer, got {raw:?}"))
}

/// Chain client backed by the LCD REST gateway.
pub struct LcdClient {
    /// Shared JSON client.
    client: JsonHttpClient,
    /// LCD base URL.
    base_url: String,
}

impl LcdClient {
    pub fn new(client: JsonHttpClient, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn encode(tx_bytes: &[u8]) -> String {
        base64::engine::general_purpose::STANDARD.encode(tx_bytes)
    }
}

#[async_trait]
impl ChainClient for LcdClient {
    #[instrument(skip(self))]
    async fn account(&self, address: &str) -> Result<AccountInfo> {
        let response: AccountResponse = self
            .client
            .get_json(&self.url(&format!("cosmos/auth/v1beta1/accounts/{address}")))
            .await
            .context("Failed to query account")?;

        let info = response.account.into_info()?;
        debug!(
            account_number = info.account_number,
            sequence = info.sequence,
            "Account fetched"
        );
        Ok(info)
    }

    #[instrument(skip_all, fields(tx_len = tx_bytes.len()))]
    async fn simulate(&self, tx_bytes: &[u8]) -> Result<SimulationResult> {
        let request = TxBytesRequest {
            tx_bytes: Self::encode(tx_bytes),
            mode: None,
        };
        let response: SimulateResponse = self
            .client
            .post_json(&self.url("cosmos/tx/v1beta1/simulate"), &request)
            .await
            .context("Failed to simulate transaction")?;

        let result = response.into_result()?;
        debug!(gas_used = result.gas_used, order_hash = ?result.order_hash, "Simulation ok");
        Ok(result)
    }

    #[instrument(skip_all, fields(tx_len = tx_bytes.len()))]
    async fn broadcast_sync(&self, tx_bytes: &[u8]) -> Result<BroadcastResult> {
        let request = TxBytesRequest {
            tx_bytes: Self::encode(tx_bytes),
            mode: Some(BROADCAST_MODE_SYNC),
        };
        let response: BroadcastResponse = self
            .client
            .post_json(&self.url("cosmos/tx/v1beta1/txs"), &request)
            .await
            .context("Failed to broadcast transaction")?;

        let result = response.tx_response.into_result()?;
        info!(tx_hash = %result.tx_hash, "Transaction broadcast");
        Ok(result)
    }

    async fn is_healthy(&self) -> bool {
        self.client
            .reachable(&self.url("cosmos/base/tendermint/v1beta1/node_info"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eth_account_response() {
        let json = r#"{
          "account": {
            "@type": "/injective.types.v1beta1.EthAccount",
            "base_account": {
              "address": "inj1hkhdaj2a2clmq5jq6mspsggqs32vynpk228q3r",
              "pub_key": null,
              "account_number": "12",
              "sequence": "4"
            },
            "code_hash": "xdJGAYb3IzySfn2y3McDwOUAtlPKgic7e/rYBF2FpHA="
          }
        }"#;
        let resp: AccountResponse = serde_json::from_str(json).unwrap();
        let info = resp.account.into_info().unwrap();
        assert_eq!(info.account_number, 12);
        assert_eq!(info.sequence, 4);
    }

    #[test]
    fn test_base_account_response() {
        let json = r#"{
          "account": {
            "@type": "/cosmos.auth.v1beta1.BaseAccount",
            "address": "inj1...",
            "account_number": "3",
            "sequence": "0"
          }
        }"#;
        let resp: AccountResponse = serde_json::from_str(json).unwrap();
        let info = resp.account.into_info().unwrap();
        assert_eq!(info.account_number, 3);
        assert_eq!(info.sequence, 0);
    }

    #[test]
    fn test_account_without_number_is_error() {
        let json = r#"{"account": {"@type": "/cosmos.auth.v1beta1.ModuleAccount"}}"#;
        let resp: AccountResponse = serde_json::from_str(json).unwrap();
        assert!(resp.account.into_info().is_err());
    }

    #[test]
    fn test_simulate_response_with_order_hash() {
        let json = r#"{
          "gas_info": {"gas_wanted": "0", "gas_used": "118234"},
          "result": {
            "data": "",
            "log": "",
            "events": [],
            "msg_responses": [{
              "@type": "/injective.exchange.v1beta1.MsgCreateSpotLimitOrderResponse",
              "order_hash": "0x5a1b",
              "cid": "abc"
            }]
          }
        }"#;
        let resp: SimulateResponse = serde_json::from_str(json).unwrap();
        let result = resp.into_result().unwrap();
        assert_eq!(result.gas_used, 118_234);
        assert_eq!(result.gas_wanted, 0);
        assert_eq!(result.order_hash.as_deref(), Some("0x5a1b"));
    }

    #[test]
    fn test_simulate_response_without_result() {
        let json = r#"{"gas_info": {"gas_used": "5"}}"#;
        let resp: SimulateResponse = serde_json::from_str(json).unwrap();
        let result = resp.into_result().unwrap();
        assert_eq!(result.gas_used, 5);
        assert!(result.order_hash.is_none());
    }

    #[test]
    fn test_broadcast_accepted() {
        let json = r#"{"tx_response": {"height": "0", "txhash": "ABCDEF", "code": 0, "raw_log": ""}}"#;
        let resp: BroadcastResponse = serde_json::from_str(json).unwrap();
        let result = resp.tx_response.into_result().unwrap();
        assert_eq!(result.tx_hash, "ABCDEF");
        assert_eq!(result.code, 0);
    }

    #[test]
    fn test_broadcast_rejected_code_is_error() {
        let json = r#"{"tx_response": {"height": "0", "txhash": "ABCDEF", "code": 5, "codespace": "sdk", "raw_log": "insufficient funds"}}"#;
        let resp: BroadcastResponse = serde_json::from_str(json).unwrap();
        let err = resp.tx_response.into_result().unwrap_err().to_string();
        assert!(err.contains("ABCDEF"));
        assert!(err.contains("code 5 (sdk)"));
        assert!(err.contains("insufficient funds"));
    }

    #[test]
    fn test_tx_bytes_request_shape() {
        let req = TxBytesRequest {
            tx_bytes: LcdClient::encode(&[1, 2, 3]),
            mode: Some(BROADCAST_MODE_SYNC),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["tx_bytes"], "AQID");
        assert_eq!(json["mode"], "BROADCAST_MODE_SYNC");

        let sim = TxBytesRequest {
            tx_bytes: String::new(),
            mode: None,
        };
        assert!(serde_json::to_value(&sim).unwrap().get("mode").is_none());
    }
}
