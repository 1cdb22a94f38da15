//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP clients, chain REST gateway, keys).
//! Each sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `api`: Exchange indexer REST client (market summaries, spot markets)
//! - `chain`: Transaction assembly, signing and LCD access

pub mod api;
pub mod chain;
