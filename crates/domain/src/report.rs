//! Scope composition: address, chain, and grand totals.
//!
//! Scopes compose through one rule. An address's totals fold its pool
//! shares; a chain's totals fold its addresses' totals; the grand totals
//! fold the chains. Each accumulator is owned by exactly one writer while it
//! folds, so per-pair results can be computed concurrently and merged
//! afterward.

use crate::position::PoolShare;
use crate::token::{TokenAmount, TokenTotals};
use std::collections::BTreeMap;

/// Scope key for one tracked wallet on one chain: `(chain, address)` labels.
///
/// Structured pairs, never a formatted display label, so the same wallet
/// tracked on two chains stays distinct.
pub type AddressScope = (String, String);

/// Computed pool shares for one (chain, address) pair.
#[derive(Debug, Clone)]
pub struct AddressPositions {
    /// Chain label the snapshot came from.
    pub chain: String,
    /// Address label the events were filtered by.
    pub address: String,
    /// Per-pool breakdown of the pair's holdings.
    pub shares: Vec<PoolShare>,
}

impl AddressPositions {
    #[must_use]
    pub fn new(
        chain: impl Into<String>,
        address: impl Into<String>,
        shares: Vec<PoolShare>,
    ) -> Self {
        Self {
            chain: chain.into(),
            address: address.into(),
            shares,
        }
    }

    /// Token amounts emitted by this pair's pools, in pool order.
    pub fn token_amounts(&self) -> impl Iterator<Item = TokenAmount> + '_ {
        self.shares
            .iter()
            .flat_map(|share| [share.token0.clone(), share.token1.clone()])
    }

    /// This pair's totals, folded from its pool shares.
    #[must_use]
    pub fn totals(&self) -> TokenTotals {
        let mut totals = TokenTotals::new();
        totals.accumulate(self.token_amounts());
        totals
    }
}

/// Totals rolled up per address, per chain, and across everything.
#[derive(Debug, Clone, Default)]
pub struct PortfolioReport {
    pub per_address_totals: BTreeMap<AddressScope, TokenTotals>,
    pub per_chain_totals: BTreeMap<String, TokenTotals>,
    pub grand_totals: TokenTotals,
}

impl PortfolioReport {
    /// Folds per-pair positions into all three scopes.
    ///
    /// Every level applies the same accumulation, so the outcome does not
    /// depend on the order positions arrive in.
    #[must_use]
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = AddressPositions>,
    {
        let mut report = Self::default();
        for position in positions {
            let totals = position.totals();
            report
                .per_chain_totals
                .entry(position.chain.clone())
                .or_default()
                .merge(&totals);
            report.grand_totals.merge(&totals);
            report
                .per_address_totals
                .entry((position.chain, position.address))
                .or_default()
                .merge(&totals);
        }
        report
    }
}
