//! Mint and burn events consumed by the position calculator.
//!
//! Events arrive already filtered to one participant: mints where the
//! participant is the recipient, burns where it is the sender. Each event is
//! consumed once per calculation pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a liquidity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Liquidity added to a pool, increasing the participant's claim.
    Mint,
    /// Liquidity removed from a pool, decreasing the participant's claim.
    Burn,
}

/// A single mint or burn of pool liquidity attributed to one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityEvent {
    /// Pool the liquidity was minted into or burned from.
    pub pool_id: String,
    /// Whether liquidity was added or removed.
    pub kind: EventKind,
    /// Liquidity token quantity moved by the event.
    pub amount: Decimal,
}

impl LiquidityEvent {
    /// Creates a mint event.
    #[must_use]
    pub fn mint(pool_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            pool_id: pool_id.into(),
            kind: EventKind::Mint,
            amount,
        }
    }

    /// Creates a burn event.
    #[must_use]
    pub fn burn(pool_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            pool_id: pool_id.into(),
            kind: EventKind::Burn,
            amount,
        }
    }
}
