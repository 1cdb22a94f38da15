//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the client's workflows.
//!
//! Use cases:
//! - `SpotClient`: Market data queries and spot order placement

pub mod spot_client;

pub use spot_client::{PlacementReceipt, SpotClient, SpotClientSettings};
