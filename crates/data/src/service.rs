//! Report service: per-pair fan-out and fold into a portfolio report.
//!
//! Every (chain, address) pair is fully independent, so each one is fetched
//! and computed on its own task with its own result value; totals are folded
//! only after the workers finish. A pair whose fetch fails is logged and
//! contributes nothing, and the rest of the report survives.

use crate::snapshot::{SnapshotProvider, SubgraphSnapshotProvider};
use crate::subgraph::SubgraphClient;
use anyhow::Result;
use lp_portfolio_domain::position::pool_shares;
use lp_portfolio_domain::report::{AddressPositions, PortfolioReport};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// A chain to query: display name plus subgraph endpoint URL.
#[derive(Debug, Clone)]
pub struct ChainTarget {
    pub name: String,
    pub endpoint: String,
}

/// A wallet to track: display name plus on-chain address.
#[derive(Debug, Clone)]
pub struct AddressTarget {
    pub name: String,
    pub address: String,
}

/// The set of chains and addresses to report on; every combination of the
/// two is queried.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub chains: Vec<ChainTarget>,
    pub addresses: Vec<AddressTarget>,
}

/// Outcome of one report run: per-pair breakdowns plus folded totals.
#[derive(Debug, Clone)]
pub struct PortfolioRun {
    pub positions: Vec<AddressPositions>,
    pub report: PortfolioReport,
}

/// Fetches one pair's snapshot and computes its pool shares.
///
/// A failed fetch is logged at error level and yields `None`; per-pair
/// failures never abort the run.
pub async fn compute_pair(
    provider: &dyn SnapshotProvider,
    chain: &str,
    address: &AddressTarget,
) -> Option<AddressPositions> {
    match provider.snapshot(&address.address).await {
        Ok(snapshot) => {
            let shares = pool_shares(&snapshot.events, &snapshot.pools);
            info!(
                chain,
                address = %address.name,
                pools = shares.len(),
                "computed positions"
            );
            Some(AddressPositions::new(chain, &address.name, shares))
        }
        Err(err) => {
            error!(chain, address = %address.name, "snapshot failed: {err:#}");
            None
        }
    }
}

/// Builds a portfolio report by querying every (chain, address) pair
/// concurrently and folding the results.
///
/// # Errors
/// Returns an error if a chain endpoint is not a valid URL or a worker task
/// panics; fetch failures for individual pairs are skipped instead.
pub async fn build_report(client: reqwest::Client, request: &ReportRequest) -> Result<PortfolioRun> {
    let mut workers: JoinSet<Option<AddressPositions>> = JoinSet::new();

    for chain in &request.chains {
        let provider = Arc::new(SubgraphSnapshotProvider::new(SubgraphClient::new(
            client.clone(),
            chain.endpoint.as_str(),
        )?));
        for address in &request.addresses {
            let provider = Arc::clone(&provider);
            let chain_name = chain.name.clone();
            let address = address.clone();
            workers.spawn(async move {
                compute_pair(provider.as_ref(), &chain_name, &address).await
            });
        }
    }

    let mut positions = Vec::new();
    while let Some(joined) = workers.join_next().await {
        if let Some(position) = joined? {
            positions.push(position);
        }
    }
    // Stable ordering regardless of task completion order.
    positions.sort_by(|a, b| {
        (a.chain.as_str(), a.address.as_str()).cmp(&(b.chain.as_str(), b.address.as_str()))
    });

    let report = PortfolioReport::from_positions(positions.iter().cloned());
    Ok(PortfolioRun { positions, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ChainSnapshot;
    use async_trait::async_trait;
    use chrono::Utc;
    use lp_portfolio_domain::event::LiquidityEvent;
    use lp_portfolio_domain::pool::PoolState;
    use rust_decimal_macros::dec;

    struct FixedProvider {
        snapshot: ChainSnapshot,
    }

    #[async_trait]
    impl SnapshotProvider for FixedProvider {
        async fn snapshot(&self, _account: &str) -> anyhow::Result<ChainSnapshot> {
            Ok(self.snapshot.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl SnapshotProvider for FailingProvider {
        async fn snapshot(&self, _account: &str) -> anyhow::Result<ChainSnapshot> {
            anyhow::bail!("endpoint unreachable")
        }
    }

    fn target(name: &str) -> AddressTarget {
        AddressTarget {
            name: name.to_string(),
            address: format!("0x{name}"),
        }
    }

    #[tokio::test]
    async fn test_compute_pair_produces_shares() {
        let provider = FixedProvider {
            snapshot: ChainSnapshot {
                events: vec![
                    LiquidityEvent::mint("P", dec!(30)),
                    LiquidityEvent::burn("P", dec!(10)),
                ],
                pools: vec![PoolState {
                    pool_id: "P".to_string(),
                    token0_symbol: "X".to_string(),
                    token1_symbol: "Y".to_string(),
                    reserve0: dec!(50),
                    reserve1: dec!(200),
                    total_supply: dec!(100),
                }],
                fetched_at: Utc::now(),
            },
        };

        let positions = compute_pair(&provider, "gnosis", &target("alice"))
            .await
            .unwrap();
        assert_eq!(positions.chain, "gnosis");
        assert_eq!(positions.address, "alice");
        assert_eq!(positions.shares.len(), 1);
        assert_eq!(positions.totals().get("X"), dec!(10));
        assert_eq!(positions.totals().get("Y"), dec!(40));
    }

    #[tokio::test]
    async fn test_compute_pair_swallows_fetch_failure() {
        let outcome = compute_pair(&FailingProvider, "gnosis", &target("alice")).await;
        assert!(outcome.is_none());
    }
}
