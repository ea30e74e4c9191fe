//! Position aggregation engine for liquidity provider portfolios.
//!
//! This crate turns raw mint/burn events and pool snapshots into net
//! liquidity positions, proportional token holdings, and hierarchical
//! totals:
//! - Mint/burn event model
//! - Pool state at snapshot time
//! - Position calculation (net liquidity, per-pool token shares)
//! - Scope aggregation (per-address, per-chain, and grand totals)
//!
//! Everything here is a pure transformation over in-memory values; fetching
//! snapshots and rendering reports live in sibling crates.

/// Prelude module for convenient imports.
pub mod prelude;

/// Calculation faults attributable to single input records.
pub mod error;
/// Mint and burn events.
pub mod event;
/// Pool reserves and supply at snapshot time.
pub mod pool;
/// Net positions and proportional token shares.
pub mod position;
/// Scope composition into per-address, per-chain, and grand totals.
pub mod report;
/// Token amounts and the totals accumulator.
pub mod token;
