//! Chain Adapters - Exchange Chain Interaction Layer
//!
//! Provides on-chain access for order placement:
//! - protobuf message definitions for the tx envelope and exchange msgs
//! - ethsecp256k1 signing via alloy-rs
//! - SIGN_MODE_DIRECT transaction assembly
//! - LCD REST client for account / simulate / broadcast

pub mod lcd;
pub mod proto;
pub mod tx;
pub mod wallet;

pub use lcd::LcdClient;
pub use tx::TxBuilder;
pub use wallet::LocalWallet;
