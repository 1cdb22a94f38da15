//! Protobuf messages for transaction assembly.
//!
//! Hand-declared `prost` structs covering exactly the cosmos tx envelope
//! and the exchange messages this client sends. Field tags follow the
//! upstream `.proto` definitions; `LegacyDec` fields travel as their
//! 18-decimal integer string.

use prost::Message;

pub const MSG_CREATE_SPOT_LIMIT_ORDER_TYPE_URL: &str =
    "/injective.exchange.v1beta1.MsgCreateSpotLimitOrder";
pub const ETH_SECP256K1_PUBKEY_TYPE_URL: &str = "/injective.crypto.v1beta1.ethsecp256k1.PubKey";

/// `cosmos.tx.signing.v1beta1.SignMode.SIGN_MODE_DIRECT`
pub const SIGN_MODE_DIRECT: i32 = 1;

/// `google.protobuf.Any`
#[derive(Clone, PartialEq, Message)]
pub struct Any {
    #[prost(string, tag = "1")]
    pub type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

impl Any {
    pub fn pack<M: Message>(type_url: &str, msg: &M) -> Self {
        Self {
            type_url: type_url.to_string(),
            value: msg.encode_to_vec(),
        }
    }
}

/// `cosmos.base.v1beta1.Coin`
#[derive(Clone, PartialEq, Message)]
pub struct Coin {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(string, tag = "2")]
    pub amount: String,
}

/// `cosmos.tx.v1beta1.TxBody`
#[derive(Clone, PartialEq, Message)]
pub struct TxBody {
    #[prost(message, repeated, tag = "1")]
    pub messages: Vec<Any>,
    #[prost(string, tag = "2")]
    pub memo: String,
    #[prost(uint64, tag = "3")]
    pub timeout_height: u64,
}

/// `cosmos.tx.v1beta1.ModeInfo.Single`
#[derive(Clone, PartialEq, Message)]
pub struct ModeInfoSingle {
    #[prost(int32, tag = "1")]
    pub mode: i32,
}

/// `cosmos.tx.v1beta1.ModeInfo`, restricted to the `single` arm of its oneof.
#[derive(Clone, PartialEq, Message)]
pub struct ModeInfo {
    #[prost(message, optional, tag = "1")]
    pub single: Option<ModeInfoSingle>,
}

/// `cosmos.tx.v1beta1.SignerInfo`
#[derive(Clone, PartialEq, Message)]
pub struct SignerInfo {
    #[prost(message, optional, tag = "1")]
    pub public_key: Option<Any>,
    #[prost(message, optional, tag = "2")]
    pub mode_info: Option<ModeInfo>,
    #[prost(uint64, tag = "3")]
    pub sequence: u64,
}

/// `cosmos.tx.v1beta1.Fee`
#[derive(Clone, PartialEq, Message)]
pub struct Fee {
    #[prost(message, repeated, tag = "1")]
    pub amount: Vec<Coin>,
    #[prost(uint64, tag = "2")]
    pub gas_limit: u64,
    #[prost(string, tag = "3")]
    pub payer: String,
    #[prost(string, tag = "4")]
    pub granter: String,
}

/// `cosmos.tx.v1beta1.AuthInfo`
#[derive(Clone, PartialEq, Message)]
pub struct AuthInfo {
    #[prost(message, repeated, tag = "1")]
    pub signer_infos: Vec<SignerInfo>,
    #[prost(message, optional, tag = "2")]
    pub fee: Option<Fee>,
}

/// `cosmos.tx.v1beta1.SignDoc`
#[derive(Clone, PartialEq, Message)]
pub struct SignDoc {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(string, tag = "3")]
    pub chain_id: String,
    #[prost(uint64, tag = "4")]
    pub account_number: u64,
}

/// `cosmos.tx.v1beta1.TxRaw`
#[derive(Clone, PartialEq, Message)]
pub struct TxRaw {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub signatures: Vec<Vec<u8>>,
}

/// `injective.crypto.v1beta1.ethsecp256k1.PubKey`
#[derive(Clone, PartialEq, Message)]
pub struct EthSecp256k1PubKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: Vec<u8>,
}

/// `injective.exchange.v1beta1.OrderInfo`
#[derive(Clone, PartialEq, Message)]
pub struct OrderInfo {
    #[prost(string, tag = "1")]
    pub subaccount_id: String,
    #[prost(string, tag = "2")]
    pub fee_recipient: String,
    #[prost(string, tag = "3")]
    pub price: String,
    #[prost(string, tag = "4")]
    pub quantity: String,
    #[prost(string, tag = "5")]
    pub cid: String,
}

/// `injective.exchange.v1beta1.SpotOrder`
#[derive(Clone, PartialEq, Message)]
pub struct SpotOrder {
    #[prost(string, tag = "1")]
    pub market_id: String,
    #[prost(message, optional, tag = "2")]
    pub order_info: Option<OrderInfo>,
    #[prost(int32, tag = "3")]
    pub order_type: i32,
    #[prost(string, optional, tag = "4")]
    pub trigger_price: Option<String>,
}

/// `injective.exchange.v1beta1.MsgCreateSpotLimitOrder`
#[derive(Clone, PartialEq, Message)]
pub struct MsgCreateSpotLimitOrder {
    #[prost(string, tag = "1")]
    pub sender: String,
    #[prost(message, optional, tag = "2")]
    pub order: Option<SpotOrder>,
}
