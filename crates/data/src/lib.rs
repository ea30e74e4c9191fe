//! External collaborators for the position aggregation engine.
//!
//! This crate provides everything around the pure domain:
//! - GraphQL client for Graph-node style subgraph endpoints
//! - Snapshot provider fetching mint/burn events and pool state per chain
//! - JSON-file config store for named endpoints and wallet addresses
//! - Report service fanning out over every (chain, address) pair

/// Persisted registry of chain endpoints and tracked addresses.
pub mod config;
/// Per-pair fan-out and fold into a portfolio report.
pub mod service;
/// Snapshot fetching and wire-to-domain conversion.
pub mod snapshot;
/// GraphQL-over-HTTP subgraph client.
pub mod subgraph;
