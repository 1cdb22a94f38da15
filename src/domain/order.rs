//! Spot order types.
//!
//! `SpotOrder` is the human-facing order: prices and quantities are plain
//! decimals. Conversion into chain units happens when the order is placed,
//! because it needs the market's token decimals and tick sizes.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chain_format::ChainDec;
use super::market::MarketId;
use super::subaccount::SubaccountId;

/// Exchange order type, numbered as in the exchange module's protobuf enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Buy,
    Sell,
    StopBuy,
    StopSell,
    TakeBuy,
    TakeSell,
    /// Post-only buy.
    BuyPo,
    /// Post-only sell.
    SellPo,
    BuyAtomic,
    SellAtomic,
}

impl OrderType {
    /// Protobuf enum value (`UNSPECIFIED` = 0 is never produced).
    pub fn proto_value(self) -> i32 {
        match self {
            Self::Buy => 1,
            Self::Sell => 2,
            Self::StopBuy => 3,
            Self::StopSell => 4,
            Self::TakeBuy => 5,
            Self::TakeSell => 6,
            Self::BuyPo => 7,
            Self::SellPo => 8,
            Self::BuyAtomic => 9,
            Self::SellAtomic => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::StopBuy => "STOP_BUY",
            Self::StopSell => "STOP_SELL",
            Self::TakeBuy => "TAKE_BUY",
            Self::TakeSell => "TAKE_SELL",
            Self::BuyPo => "BUY_PO",
            Self::SellPo => "SELL_PO",
            Self::BuyAtomic => "BUY_ATOMIC",
            Self::SellAtomic => "SELL_ATOMIC",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order type {0:?}")]
pub struct UnknownOrderType(pub String);

impl FromStr for OrderType {
    type Err = UnknownOrderType;

    /// Accepts `buy`, `BUY_PO`, `buy-po`, `stop-sell`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        let order_type = match normalized.as_str() {
            "BUY" => Self::Buy,
            "SELL" => Self::Sell,
            "STOP_BUY" => Self::StopBuy,
            "STOP_SELL" => Self::StopSell,
            "TAKE_BUY" => Self::TakeBuy,
            "TAKE_SELL" => Self::TakeSell,
            "BUY_PO" => Self::BuyPo,
            "SELL_PO" => Self::SellPo,
            "BUY_ATOMIC" => Self::BuyAtomic,
            "SELL_ATOMIC" => Self::SellAtomic,
            _ => return Err(UnknownOrderType(s.to_string())),
        };
        Ok(order_type)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidOrder {
    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),
}

/// A spot limit order in human units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotOrder {
    pub order_type: OrderType,
    pub market_id: MarketId,
    /// Quote tokens per base token.
    pub price: Decimal,
    /// Base tokens.
    pub quantity: Decimal,
}

impl SpotOrder {
    pub fn new(order_type: OrderType, market_id: MarketId, price: Decimal, quantity: Decimal) -> Self {
        Self {
            order_type,
            market_id,
            price,
            quantity,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidOrder> {
        if self.price <= Decimal::ZERO {
            return Err(InvalidOrder::NonPositivePrice(self.price));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(InvalidOrder::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }

    /// Notional value in quote tokens.
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

/// An order converted to chain units and tick-aligned, ready to be encoded
/// into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpotOrder {
    /// Bech32 address of the signing account.
    pub sender: String,
    pub market_id: MarketId,
    pub subaccount: SubaccountId,
    pub order_type: OrderType,
    pub price: ChainDec,
    pub quantity: ChainDec,
    /// Client order id.
    pub cid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market() -> MarketId {
        MarketId::parse("0xfbd55f13641acbb6e69d7b59eb335dabe2ecbfea136082ce2eedaba8a0c917a3")
            .unwrap()
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!("buy".parse::<OrderType>().unwrap(), OrderType::Buy);
        assert_eq!("sell-po".parse::<OrderType>().unwrap(), OrderType::SellPo);
        assert_eq!("STOP_BUY".parse::<OrderType>().unwrap(), OrderType::StopBuy);
        assert!("market".parse::<OrderType>().is_err());
    }

    #[test]
    fn test_order_type_proto_values() {
        assert_eq!(OrderType::Buy.proto_value(), 1);
        assert_eq!(OrderType::Sell.proto_value(), 2);
        assert_eq!(OrderType::BuyPo.proto_value(), 7);
        assert_eq!(OrderType::SellAtomic.proto_value(), 10);
    }

    #[test]
    fn test_spot_order_validation() {
        let ok = SpotOrder::new(OrderType::Buy, market(), dec!(0.48), dec!(0.01));
        assert!(ok.validate().is_ok());
        assert_eq!(ok.notional(), dec!(0.0048));

        let bad_price = SpotOrder::new(OrderType::Buy, market(), dec!(0), dec!(1));
        assert_eq!(
            bad_price.validate(),
            Err(InvalidOrder::NonPositivePrice(dec!(0)))
        );

        let bad_qty = SpotOrder::new(OrderType::Sell, market(), dec!(1), dec!(-2));
        assert_eq!(
            bad_qty.validate(),
            Err(InvalidOrder::NonPositiveQuantity(dec!(-2)))
        );
    }

    #[test]
    fn test_spot_order_json_shape() {
        let order = SpotOrder::new(OrderType::SellPo, market(), dec!(1.5), dec!(2));
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderType"], "SELL_PO");
        assert_eq!(json["marketId"], market().as_str());
    }
}
