//! Spot Order-Book Client - Entry Point
//!
//! Small CLI over the spot client: market summaries, ticker prices,
//! subaccount lookup and spot limit order placement.
//!
//! Wiring sequence:
//! 1. Load `.env` (private keys, ticker fallbacks)
//! 2. Load config.toml (or local network defaults) + validate
//! 3. Init tracing (JSON structured logging)
//! 4. Create the indexer HTTP client + market data adapter
//! 5. Create the LCD chain client + tx encoder
//! 6. Run the requested command (or the default demo flow); the signing
//!    key is loaded only by commands that sign or need the sender
//!    identity

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use spot_orderbook_client::adapters::api::{HttpClientConfig, IndexerMarketData, JsonHttpClient};
use spot_orderbook_client::adapters::chain::{LcdClient, LocalWallet, TxBuilder};
use spot_orderbook_client::config::loader::{load_or_default, ticker_book};
use spot_orderbook_client::domain::market::MarketId;
use spot_orderbook_client::domain::order::{OrderType, SpotOrder};
use spot_orderbook_client::ports::signer::TxSigner;
use spot_orderbook_client::usecases::{PlacementReceipt, SpotClient, SpotClientSettings};

/// Market the demo flow runs against (ATOM/INJ on the local network).
const DEMO_MARKET_ID: &str = "0xfbd55f13641acbb6e69d7b59eb335dabe2ecbfea136082ce2eedaba8a0c917a3";
const DEMO_TICKER: &str = "ATOM/INJ";
/// Key the demo flow places its order with, unless `--key` is given.
const DEMO_KEY: &str = "user3";

type Client = SpotClient<IndexerMarketData, LcdClient>;

#[derive(Debug, Parser)]
#[command(name = "spot-client", version, about = "Spot order-book exchange client")]
struct Cli {
  /// Path to config.toml (defaults to ./config.toml, then local network defaults).
  #[arg(long, global = true, env = "SPOT_CLIENT_CONFIG")]
  config: Option<String>,

  /// Signing key name; the key is read from `<KEY>_PRIVATE_KEY`.
  #[arg(long, global = true)]
  key: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print the 24h summary of a market.
  Summary {
    /// Market id (0x-prefixed, 32 bytes).
    market_id: String,
  },
  /// Print the last price for a ticker such as ATOM/INJ.
  Price { ticker: String },
  /// Place a spot limit order.
  Place {
    /// Order type (buy, sell, buy_po, sell_atomic, ...).
    #[arg(long)]
    side: String,
    /// Market id or ticker.
    #[arg(long)]
    market: String,
    /// Human-readable price (quote per base).
    #[arg(long)]
    price: Decimal,
    /// Human-readable quantity (base units).
    #[arg(long)]
    quantity: Decimal,
    /// Simulate only, never broadcast.
    #[arg(long)]
    dry_run: bool,
  },
  /// Print the default subaccount of the signing key.
  Subaccount,
  /// Check that the indexer and the chain node answer.
  Health,
}

#[tokio::main]
async fn main() -> Result<()> {
  // ── 1. Load .env (missing file is fine) ─────────────────
  dotenvy::dotenv().ok();

  let cli = Cli::parse();

  // ── 2. Load configuration ───────────────────────────────
  let mut config =
    load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
  if let Some(key) = &cli.key {
    config.wallet.key_name = key.clone();
  }
  if let Some(Command::Place { dry_run: true, .. }) = &cli.command {
    config.client.dry_run = true;
  }

  // ── 3. Initialize structured JSON logging ───────────────
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.client.log_level)),
    )
    .json()
    .init();

  info!(
    name = %config.client.name,
    version = env!("CARGO_PKG_VERSION"),
    network = %config.network.name,
    dry_run = config.client.dry_run,
    "Starting spot client"
  );

  // ── 4. Indexer HTTP client + market data ────────────────
  let http = JsonHttpClient::new(&HttpClientConfig::from(&config.network))
    .context("Failed to create HTTP client")?;
  let market_data = Arc::new(IndexerMarketData::from_config(http.clone(), &config.network));

  // ── 5. Chain REST client + tx encoder ───────────────────
  let chain = Arc::new(LcdClient::new(http, config.network.lcd_url.clone()));
  let encoder = Arc::new(TxBuilder::new(config.network.chain_id.clone()));

  let settings = SpotClientSettings::from_config(&config)?;
  let tickers = ticker_book(&config)?;
  let mut client = SpotClient::new(settings, market_data, chain, encoder, tickers);

  // ── 6. Run command ──────────────────────────────────────
  match cli.command {
    Some(Command::Summary { market_id }) => print_summary(&client, &market_id).await,
    Some(Command::Price { ticker }) => print_price(&client, &ticker).await,
    Some(Command::Place {
      side,
      market,
      price,
      quantity,
      ..
    }) => {
      client.set_signer(load_signer(&config.wallet.key_name)?);
      let order_type = OrderType::from_str(&side)?;
      let market_id = resolve_market(&client, &market)?;
      let order = SpotOrder::new(order_type, market_id, price, quantity);
      place(&client, &order).await
    }
    Some(Command::Subaccount) => {
      client.set_signer(load_signer(&config.wallet.key_name)?);
      println!("Address: {}", client.sender_address()?);
      println!("Subaccount: {}", client.default_subaccount()?);
      Ok(())
    }
    Some(Command::Health) => {
      let healthy = client.is_healthy().await;
      println!("Healthy: {healthy}");
      anyhow::ensure!(healthy, "Indexer or chain node is unreachable");
      Ok(())
    }
    None => {
      let key = cli.key.as_deref().unwrap_or(DEMO_KEY);
      run_demo(&mut client, key).await
    }
  }
}

/// Load the signing key stored in `<KEY>_PRIVATE_KEY`.
fn load_signer(key_name: &str) -> Result<Arc<dyn TxSigner>> {
  let wallet = LocalWallet::from_env(key_name)
    .with_context(|| format!("Failed to load signing key {key_name:?}"))?;
  Ok(Arc::new(wallet))
}

/// Summary → price → switch to `key` → BUY 0.01 @ 0.48 on the demo market.
async fn run_demo(client: &mut Client, key: &str) -> Result<()> {
  print_summary(client, DEMO_MARKET_ID).await?;
  print_price(client, DEMO_TICKER).await?;

  client.set_signer(load_signer(key)?);

  let order = SpotOrder::new(
    OrderType::Buy,
    MarketId::parse(DEMO_MARKET_ID)?,
    dec!(0.48),
    dec!(0.01),
  );
  place(client, &order).await
}

async fn print_summary(client: &Client, market_id: &str) -> Result<()> {
  let market_id = MarketId::parse(market_id)?;
  let summary = client.market_summary(&market_id).await?;
  println!("Market Summary: {}", serde_json::to_string_pretty(&summary)?);
  Ok(())
}

async fn print_price(client: &Client, ticker: &str) -> Result<()> {
  let price = client.price(ticker).await?;
  println!("Price: {price:.6}");
  Ok(())
}

async fn place(client: &Client, order: &SpotOrder) -> Result<()> {
  let receipt: PlacementReceipt = client
    .place_spot_order(order)
    .await
    .context("Failed to place spot order")?;

  match &receipt.tx_hash {
    Some(hash) => println!("Tx hash: {hash}"),
    None => println!("Dry run: order simulated, not broadcast"),
  }
  if let Some(order_hash) = &receipt.order_hash {
    println!("Order hash: {order_hash}");
  }
  println!("Cid: {}", receipt.cid);
  println!(
    "Gas used: {} (limit {}, fee {}{})",
    receipt.gas_used, receipt.fee.gas_limit, receipt.fee.amount, receipt.fee.denom
  );
  Ok(())
}

/// Accept either a raw market id or a ticker.
fn resolve_market(client: &Client, market: &str) -> Result<MarketId> {
  if market.starts_with("0x") {
    Ok(MarketId::parse(market)?)
  } else {
    client.resolve_ticker(market)
  }
}
