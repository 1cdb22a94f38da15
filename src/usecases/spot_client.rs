//! Spot Client - Market Data and Order Placement
//!
//! The single entry point callers use:
//! - Market summary and last price (by market id or ticker)
//! - Token decimals for a market
//! - Default subaccount of the signing key
//! - Spot limit order placement (convert → sign → simulate → broadcast)
//!
//! Market data queries work without a key. Anything that signs or needs
//! the sender identity fails until a signer is selected.
//!
//! Every operation is one pass through the ports; failures are
//! returned to the caller without retry.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::{AppConfig, SUPPORTED_NETWORKS};
use crate::domain::chain_format::{
  price_to_chain_format, quantity_to_chain_format, quantize_to_tick, ChainDec,
};
use crate::domain::fee::{adjusted_gas, TxFee};
use crate::domain::market::{MarketId, MarketSummary, SpotMarketMeta};
use crate::domain::order::{ChainSpotOrder, SpotOrder};
use crate::domain::subaccount::{bech32_address, SubaccountId};
use crate::domain::ticker::TickerBook;
use crate::ports::chain_client::ChainClient;
use crate::ports::market_data::MarketDataSource;
use crate::ports::order_encoder::OrderTxEncoder;
use crate::ports::signer::TxSigner;

/// Chain-level settings the client needs to price and fee transactions.
///
/// Only `from_config` builds these, so the network is always one the
/// client knows.
#[derive(Debug, Clone)]
pub struct SpotClientSettings {
  network: String,
  fee_denom: String,
  /// Gas price in fee denom base units.
  gas_price: u64,
  /// Multiplier on simulated gas.
  gas_adjustment: f64,
  /// Bech32 account prefix.
  address_prefix: String,
  /// Stop after simulation.
  dry_run: bool,
}

impl SpotClientSettings {
  /// Extract settings from config, rejecting networks the client doesn't know.
  pub fn from_config(config: &AppConfig) -> Result<Self> {
    let net = &config.network;
    if !SUPPORTED_NETWORKS.contains(&net.name.as_str()) {
      bail!("Network type {:?} is not supported", net.name);
    }
    Ok(Self {
      network: net.name.clone(),
      fee_denom: net.fee_denom.clone(),
      gas_price: net.gas_price,
      gas_adjustment: net.gas_adjustment,
      address_prefix: config.wallet.address_prefix.clone(),
      dry_run: config.client.dry_run,
    })
  }
}

/// Outcome of a placement.
#[derive(Debug, Clone)]
pub struct PlacementReceipt {
  /// Broadcast tx hash; `None` in dry-run mode.
  pub tx_hash: Option<String>,
  /// Order hash reported by simulation.
  pub order_hash: Option<String>,
  /// Client order id attached to the order.
  pub cid: String,
  /// Gas simulated.
  pub gas_used: u64,
  /// Fee the broadcast tx carried (or would have carried).
  pub fee: TxFee,
  /// Chain-format price actually submitted.
  pub chain_price: ChainDec,
  /// Chain-format quantity actually submitted.
  pub chain_quantity: ChainDec,
  /// When the placement finished.
  pub placed_at: DateTime<Utc>,
}

/// Exchange client over a market data source, a chain node and a key.
pub struct SpotClient<M: MarketDataSource, C: ChainClient> {
  /// Indexer port.
  market_data: Arc<M>,
  /// Chain node port.
  chain: Arc<C>,
  /// Order → signed tx bytes.
  encoder: Arc<dyn OrderTxEncoder>,
  /// Active signing key, if one has been selected.
  signer: Option<Arc<dyn TxSigner>>,
  /// Ticker → market id table.
  tickers: TickerBook,
  settings: SpotClientSettings,
}

impl<M: MarketDataSource, C: ChainClient> SpotClient<M, C> {
  /// Create a read-only spot client; select a key with `with_signer`.
  pub fn new(
    settings: SpotClientSettings,
    market_data: Arc<M>,
    chain: Arc<C>,
    encoder: Arc<dyn OrderTxEncoder>,
    tickers: TickerBook,
  ) -> Self {
    debug!(
      network = %settings.network,
      dry_run = settings.dry_run,
      markets = tickers.len(),
      "Spot client created"
    );
    Self {
      market_data,
      chain,
      encoder,
      signer: None,
      tickers,
      settings,
    }
  }

  #[must_use]
  pub fn with_signer(mut self, signer: Arc<dyn TxSigner>) -> Self {
    self.set_signer(signer);
    self
  }

  /// Switch the signing key (select a different keyring entry).
  pub fn set_signer(&mut self, signer: Arc<dyn TxSigner>) {
    info!(address = %signer.address(), "Signing key selected");
    self.signer = Some(signer);
  }

  fn signer(&self) -> Result<&dyn TxSigner> {
    self
      .signer
      .as_deref()
      .context("No signing key selected")
  }

  /// Resolve a ticker (`ATOM/INJ`) to its market id.
  pub fn resolve_ticker(&self, ticker: &str) -> Result<MarketId> {
    Ok(self.tickers.resolve(ticker)?)
  }

  /// 24h summary for a market.
  #[instrument(skip(self), fields(market = %market_id))]
  pub async fn market_summary(&self, market_id: &MarketId) -> Result<MarketSummary> {
    self.market_data.market_summary(market_id).await
  }

  /// Last price for a ticker, via its market summary.
  #[instrument(skip(self))]
  pub async fn price(&self, ticker: &str) -> Result<f64> {
    let market_id = self.resolve_ticker(ticker)?;
    let summary = self.market_summary(&market_id).await?;
    Ok(summary.price)
  }

  /// `(base_decimals, quote_decimals)` of a spot market.
  pub async fn decimals(&self, market_id: &MarketId) -> Result<(u32, u32)> {
    let meta = self.market_data.spot_market(market_id).await?;
    Ok((meta.base_decimals, meta.quote_decimals))
  }

  /// Bech32 address of the signing key.
  pub fn sender_address(&self) -> Result<String> {
    bech32_address(&self.settings.address_prefix, self.signer()?.address())
      .context("Failed to encode sender address")
  }

  /// Default (nonce 0) subaccount of the signing key.
  pub fn default_subaccount(&self) -> Result<SubaccountId> {
    Ok(SubaccountId::default_for(self.signer()?.address()))
  }

  /// Convert `order` into chain units against `meta`.
  ///
  /// Price and quantity are scaled by the market's token decimals,
  /// rounded down to its tick sizes, and carried as 18-decimal
  /// fixed-point integers.
  pub fn build_order(
    &self,
    order: &SpotOrder,
    meta: &SpotMarketMeta,
    cid: &str,
  ) -> Result<ChainSpotOrder> {
    order.validate()?;

    let price = price_to_chain_format(order.price, meta.base_decimals, meta.quote_decimals)?;
    let price = quantize_to_tick(price, meta.min_price_tick_size)?;
    let quantity = quantity_to_chain_format(order.quantity, meta.base_decimals)?;
    let quantity = quantize_to_tick(quantity, meta.min_quantity_tick_size)?;

    let chain_price = ChainDec::from_decimal(price)?;
    let chain_quantity = ChainDec::from_decimal(quantity)?;
    if chain_price.is_zero() {
      bail!(
        "Price {} rounds to zero at tick size {}",
        order.price,
        meta.min_price_tick_size
      );
    }
    if chain_quantity.is_zero() {
      bail!(
        "Quantity {} rounds to zero at tick size {}",
        order.quantity,
        meta.min_quantity_tick_size
      );
    }

    Ok(ChainSpotOrder {
      sender: self.sender_address()?,
      market_id: order.market_id.clone(),
      subaccount: self.default_subaccount()?,
      order_type: order.order_type,
      price: chain_price,
      quantity: chain_quantity,
      cid: cid.to_string(),
    })
  }

  /// Place a spot limit order and return the broadcast tx hash.
  #[instrument(
    skip(self, order),
    fields(
      market = %order.market_id,
      order_type = %order.order_type,
      price = %order.price,
      quantity = %order.quantity
    )
  )]
  pub async fn place_spot_order(&self, order: &SpotOrder) -> Result<PlacementReceipt> {
    let signer = self.signer()?;
    let meta = self
      .market_data
      .spot_market(&order.market_id)
      .await
      .context("Failed to load market decimals")?;

    let cid = Uuid::new_v4().to_string();
    let chain_order = self.build_order(order, &meta, &cid)?;

    debug!(
      ticker = %meta.ticker,
      subaccount = %chain_order.subaccount,
      chain_price = %chain_order.price,
      chain_quantity = %chain_order.quantity,
      cid = %cid,
      "Spot order built"
    );

    let account = self
      .chain
      .account(&chain_order.sender)
      .await
      .context("Failed to load sender account")?;

    let sim_tx = self.encoder.encode_order(
      signer,
      &chain_order,
      account,
      &TxFee::zero(&self.settings.fee_denom),
    )?;
    let simulation = self
      .chain
      .simulate(&sim_tx)
      .await
      .context("Order simulation failed")?;

    let gas_limit = adjusted_gas(simulation.gas_used, self.settings.gas_adjustment);
    let fee = TxFee::from_gas(gas_limit, self.settings.gas_price, &self.settings.fee_denom);
    debug!(
      gas_used = simulation.gas_used,
      gas_wanted = simulation.gas_wanted,
      gas_limit,
      "Order simulated"
    );

    if self.settings.dry_run {
      warn!(
        gas_used = simulation.gas_used,
        order_hash = ?simulation.order_hash,
        "Dry-run mode: order simulated but NOT broadcast"
      );
      return Ok(PlacementReceipt {
        tx_hash: None,
        order_hash: simulation.order_hash,
        cid,
        gas_used: simulation.gas_used,
        fee,
        chain_price: chain_order.price,
        chain_quantity: chain_order.quantity,
        placed_at: Utc::now(),
      });
    }

    let tx = self
      .encoder
      .encode_order(signer, &chain_order, account, &fee)?;
    let broadcast = self
      .chain
      .broadcast_sync(&tx)
      .await
      .context("Order broadcast failed")?;

    info!(
      tx_hash = %broadcast.tx_hash,
      order_hash = ?simulation.order_hash,
      notional = %order.notional(),
      gas_limit,
      "Spot order placed"
    );

    Ok(PlacementReceipt {
      tx_hash: Some(broadcast.tx_hash),
      order_hash: simulation.order_hash,
      cid,
      gas_used: simulation.gas_used,
      fee,
      chain_price: chain_order.price,
      chain_quantity: chain_order.quantity,
      placed_at: Utc::now(),
    })
  }

  /// Check both the indexer and the chain node.
  pub async fn is_healthy(&self) -> bool {
    self.market_data.is_healthy().await && self.chain.is_healthy().await
  }
}
