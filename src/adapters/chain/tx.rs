//! Transaction Builder - SIGN_MODE_DIRECT Assembly
//!
//! Assembles `TxBody` + `AuthInfo`, signs the resulting `SignDoc` with a
//! `TxSigner`, and emits `TxRaw` bytes ready for simulate/broadcast.
//! `TxBuilder` is the `OrderTxEncoder` the spot client is wired with.

use anyhow::Result;
use prost::Message;

use super::proto::{
    Any, AuthInfo, Coin, EthSecp256k1PubKey, Fee, ModeInfo, ModeInfoSingle,
    MsgCreateSpotLimitOrder, OrderInfo, SignDoc, SignerInfo, SpotOrder as ProtoSpotOrder,
    TxBody, TxRaw, ETH_SECP256K1_PUBKEY_TYPE_URL, MSG_CREATE_SPOT_LIMIT_ORDER_TYPE_URL,
    SIGN_MODE_DIRECT,
};
use crate::domain::fee::TxFee;
use crate::domain::order::ChainSpotOrder;
use crate::ports::chain_client::AccountInfo;
use crate::ports::order_encoder::OrderTxEncoder;
use crate::ports::signer::TxSigner;

fn fee_to_proto(fee: &TxFee) -> Fee {
    let amount = if fee.is_zero() {
        Vec::new()
    } else {
        vec![Coin {
            denom: fee.denom.clone(),
            amount: fee.amount.to_string(),
        }]
    };
    Fee {
        amount,
        gas_limit: fee.gas_limit,
        payer: String::new(),
        granter: String::new(),
    }
}

/// Exchange message creating `order` as a spot limit order.
pub fn order_message(order: &ChainSpotOrder) -> MsgCreateSpotLimitOrder {
    MsgCreateSpotLimitOrder {
        sender: order.sender.clone(),
        order: Some(ProtoSpotOrder {
            market_id: order.market_id.to_string(),
            order_info: Some(OrderInfo {
                subaccount_id: order.subaccount.to_hex(),
                fee_recipient: String::new(),
                price: order.price.to_wire(),
                quantity: order.quantity.to_wire(),
                cid: order.cid.clone(),
            }),
            order_type: order.order_type.proto_value(),
            trigger_price: None,
        }),
    }
}

/// Builds signed transactions for one chain.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    chain_id: String,
}

impl TxBuilder {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
        }
    }

    /// Build, sign and encode a transaction carrying `messages`.
    pub fn build_signed(
        &self,
        signer: &dyn TxSigner,
        messages: Vec<Any>,
        account: AccountInfo,
        fee: &TxFee,
    ) -> Result<Vec<u8>> {
        let body = TxBody {
            messages,
            memo: String::new(),
            timeout_height: 0,
        };

        let public_key = Any::pack(
            ETH_SECP256K1_PUBKEY_TYPE_URL,
            &EthSecp256k1PubKey {
                key: signer.public_key(),
            },
        );

        let auth_info = AuthInfo {
            signer_infos: vec![SignerInfo {
                public_key: Some(public_key),
                mode_info: Some(ModeInfo {
                    single: Some(ModeInfoSingle {
                        mode: SIGN_MODE_DIRECT,
                    }),
                }),
                sequence: account.sequence,
            }],
            fee: Some(fee_to_proto(fee)),
        };

        let body_bytes = body.encode_to_vec();
        let auth_info_bytes = auth_info.encode_to_vec();

        let sign_doc = SignDoc {
            body_bytes: body_bytes.clone(),
            auth_info_bytes: auth_info_bytes.clone(),
            chain_id: self.chain_id.clone(),
            account_number: account.account_number,
        };
        let signature = signer.sign(&sign_doc.encode_to_vec())?;

        let raw = TxRaw {
            body_bytes,
            auth_info_bytes,
            signatures: vec![signature.to_vec()],
        };
        Ok(raw.encode_to_vec())
    }
}

impl OrderTxEncoder for TxBuilder {
    fn encode_order(
        &self,
        signer: &dyn TxSigner,
        order: &ChainSpotOrder,
        account: AccountInfo,
        fee: &TxFee,
    ) -> Result<Vec<u8>> {
        let msg = Any::pack(MSG_CREATE_SPOT_LIMIT_ORDER_TYPE_URL, &order_message(order));
        self.build_signed(signer, vec![msg], account, fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain_format::ChainDec;
    use crate::domain::market::MarketId;
    use crate::domain::order::OrderType;
    use crate::domain::subaccount::SubaccountId;
    use alloy::primitives::Address;

    struct FixedSigner;

    impl TxSigner for FixedSigner {
        fn address(&self) -> Address {
            Address::repeat_byte(0x11)
        }

        fn public_key(&self) -> Vec<u8> {
            let mut pk = vec![0x02];
            pk.extend_from_slice(&[0xab; 32]);
            pk
        }

        fn sign(&self, sign_doc: &[u8]) -> Result<[u8; 64]> {
            let mut sig = [0u8; 64];
            sig[0] = sign_doc.len() as u8;
            Ok(sig)
        }
    }

    fn account() -> AccountInfo {
        AccountInfo {
            account_number: 7,
            sequence: 3,
        }
    }

    #[test]
    fn test_zero_fee_has_no_coins() {
        let fee = fee_to_proto(&TxFee::zero("inj"));
        assert!(fee.amount.is_empty());
        assert_eq!(fee.gas_limit, 0);
    }

    #[test]
    fn test_build_signed_layout() {
        let builder = TxBuilder::new("injective-1");
        let msg = Any {
            type_url: "/test.Msg".to_string(),
            value: vec![1, 2, 3],
        };
        let fee = TxFee::from_gas(200_000, 500_000_000, "inj");
        let bytes = builder
            .build_signed(&FixedSigner, vec![msg.clone()], account(), &fee)
            .unwrap();

        let raw = TxRaw::decode(bytes.as_slice()).unwrap();
        assert_eq!(raw.signatures.len(), 1);
        assert_eq!(raw.signatures[0].len(), 64);

        let body = TxBody::decode(raw.body_bytes.as_slice()).unwrap();
        assert_eq!(body.messages, vec![msg]);
        assert!(body.memo.is_empty());

        let auth = AuthInfo::decode(raw.auth_info_bytes.as_slice()).unwrap();
        let signer_info = &auth.signer_infos[0];
        assert_eq!(signer_info.sequence, 3);
        assert_eq!(
            signer_info.public_key.as_ref().unwrap().type_url,
            ETH_SECP256K1_PUBKEY_TYPE_URL
        );
        let fee = auth.fee.unwrap();
        assert_eq!(fee.gas_limit, 200_000);
        assert_eq!(fee.amount[0].amount, "100000000000000");
        assert_eq!(fee.amount[0].denom, "inj");
    }

    #[test]
    fn test_signature_covers_sign_doc() {
        let builder = TxBuilder::new("injective-1");
        let bytes = builder
            .build_signed(&FixedSigner, Vec::new(), account(), &TxFee::zero("inj"))
            .unwrap();
        let raw = TxRaw::decode(bytes.as_slice()).unwrap();

        let expected = SignDoc {
            body_bytes: raw.body_bytes.clone(),
            auth_info_bytes: raw.auth_info_bytes.clone(),
            chain_id: "injective-1".to_string(),
            account_number: 7,
        }
        .encode_to_vec()
        .len();
        assert_eq!(raw.signatures[0][0] as usize, expected);
    }

    #[test]
    fn test_encode_order_carries_chain_values() {
        let order = ChainSpotOrder {
            sender: "inj1sender".to_string(),
            market_id: MarketId::parse(
                "0xfbd55f13641acbb6e69d7b59eb335dabe2ecbfea136082ce2eedaba8a0c917a3",
            )
            .unwrap(),
            subaccount: SubaccountId::default_for(FixedSigner.address()),
            order_type: OrderType::BuyPo,
            price: ChainDec::from_wire("480000000000000000000000000000").unwrap(),
            quantity: ChainDec::from_wire("10000000000000000000000").unwrap(),
            cid: "cid-1".to_string(),
        };
        let bytes = TxBuilder::new("injective-1")
            .encode_order(&FixedSigner, &order, account(), &TxFee::zero("inj"))
            .unwrap();

        let raw = TxRaw::decode(bytes.as_slice()).unwrap();
        let body = TxBody::decode(raw.body_bytes.as_slice()).unwrap();
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].type_url, MSG_CREATE_SPOT_LIMIT_ORDER_TYPE_URL);

        let msg = MsgCreateSpotLimitOrder::decode(body.messages[0].value.as_slice()).unwrap();
        assert_eq!(msg, order_message(&order));
        let spot = msg.order.unwrap();
        assert_eq!(spot.order_type, 7);
        let info = spot.order_info.unwrap();
        assert_eq!(info.subaccount_id, order.subaccount.to_hex());
        assert_eq!(info.price, "480000000000000000000000000000");
        assert_eq!(info.cid, "cid-1");
    }
}
