//! Position calculation: net liquidity per pool and proportional token
//! shares.
//!
//! The calculator reduces one participant's mint/burn history into net
//! liquidity per pool, then converts net liquidity into claims on both pool
//! tokens using current reserves. A pool qualifies only when
//! `net_liquidity > 0` and `total_supply > 0`; anything else is skipped
//! without an error, as is a net position whose pool state is missing.

use crate::event::{EventKind, LiquidityEvent};
use crate::pool::PoolState;
use crate::token::TokenAmount;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Net liquidity a participant holds in one pool.
#[derive(Debug, Clone, PartialEq)]
pub struct NetPosition {
    /// Pool the liquidity belongs to.
    pub pool_id: String,
    /// Total liquidity minted to the participant.
    pub minted: Decimal,
    /// Total liquidity burned by the participant.
    pub burned: Decimal,
}

impl NetPosition {
    /// Minted minus burned liquidity.
    #[must_use]
    pub fn net_liquidity(&self) -> Decimal {
        self.minted - self.burned
    }
}

/// A participant's proportional claim on both tokens of one pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolShare {
    pub pool_id: String,
    pub token0: TokenAmount,
    pub token1: TokenAmount,
}

/// Groups events by pool and nets minted against burned liquidity.
///
/// Pools with no events are absent from the result and therefore excluded
/// downstream.
#[must_use]
pub fn net_positions(events: &[LiquidityEvent]) -> BTreeMap<String, NetPosition> {
    let mut positions: BTreeMap<String, NetPosition> = BTreeMap::new();
    for event in events {
        let position = positions
            .entry(event.pool_id.clone())
            .or_insert_with(|| NetPosition {
                pool_id: event.pool_id.clone(),
                minted: Decimal::ZERO,
                burned: Decimal::ZERO,
            });
        match event.kind {
            EventKind::Mint => position.minted += event.amount,
            EventKind::Burn => position.burned += event.amount,
        }
    }
    positions
}

/// Converts net positions into per-pool token shares using current reserves.
///
/// `pools` may contain pools the participant never touched; those are
/// ignored. A net position whose pool is missing from `pools` is skipped:
/// without reserves there is no proportion to compute.
#[must_use]
pub fn pool_shares(events: &[LiquidityEvent], pools: &[PoolState]) -> Vec<PoolShare> {
    let by_id: HashMap<&str, &PoolState> =
        pools.iter().map(|pool| (pool.pool_id.as_str(), pool)).collect();

    let mut shares = Vec::new();
    for (pool_id, position) in net_positions(events) {
        let Some(pool) = by_id.get(pool_id.as_str()) else {
            continue;
        };
        let net_liquidity = position.net_liquidity();
        // Division guard: both conditions enforced here, not left to callers.
        if net_liquidity <= Decimal::ZERO || pool.total_supply <= Decimal::ZERO {
            continue;
        }
        let proportion = net_liquidity / pool.total_supply;
        shares.push(PoolShare {
            pool_id,
            token0: TokenAmount::new(pool.token0_symbol.clone(), proportion * pool.reserve0),
            token1: TokenAmount::new(pool.token1_symbol.clone(), proportion * pool.reserve1),
        });
    }
    shares
}

/// Reduces mint/burn events into proportional token amounts, two per
/// qualifying pool.
///
/// Symbols are not deduplicated here; that happens during scope
/// aggregation.
#[must_use]
pub fn compute_positions(events: &[LiquidityEvent], pools: &[PoolState]) -> Vec<TokenAmount> {
    pool_shares(events, pools)
        .into_iter()
        .flat_map(|share| [share.token0, share.token1])
        .collect()
}
