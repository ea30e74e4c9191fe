//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use lp_portfolio_domain::prelude::*;
//! ```

pub use crate::error::DomainError;
pub use crate::event::{EventKind, LiquidityEvent};
pub use crate::pool::PoolState;
pub use crate::position::{NetPosition, PoolShare, compute_positions, net_positions, pool_shares};
pub use crate::report::{AddressPositions, AddressScope, PortfolioReport};
pub use crate::token::{TokenAmount, TokenTotals};
