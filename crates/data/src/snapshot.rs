//! Snapshot fetching: mint/burn events and pool state for one chain.
//!
//! The wire types mirror the fixed query every chain shares: mints and burns
//! filtered to the tracked account, plus every pair's reserves and total
//! supply. Quantities arrive as decimal strings; a record whose quantity
//! does not parse is dropped with a warning and the rest of the batch keeps
//! going.

use crate::subgraph::SubgraphClient;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lp_portfolio_domain::error::DomainError;
use lp_portfolio_domain::event::{EventKind, LiquidityEvent};
use lp_portfolio_domain::pool::PoolState;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// One chain's fully-materialized inputs for a calculation pass.
#[derive(Debug, Clone)]
pub struct ChainSnapshot {
    /// Mint/burn events filtered to the tracked account.
    pub events: Vec<LiquidityEvent>,
    /// Current state of every pool on the chain.
    pub pools: Vec<PoolState>,
    /// When the snapshot was taken.
    pub fetched_at: DateTime<Utc>,
}

/// Supplies one chain's snapshot for a tracked account.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Fetches mint/burn events for `account` plus current pool state.
    async fn snapshot(&self, account: &str) -> anyhow::Result<ChainSnapshot>;
}

/// Snapshot provider backed by a Graph-node subgraph.
pub struct SubgraphSnapshotProvider {
    client: SubgraphClient,
}

impl SubgraphSnapshotProvider {
    #[must_use]
    pub fn new(client: SubgraphClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnapshotProvider for SubgraphSnapshotProvider {
    async fn snapshot(&self, account: &str) -> anyhow::Result<ChainSnapshot> {
        let data: SnapshotData = self
            .client
            .query(snapshot_query::QUERY, json!({ "account": account }))
            .await?;
        let snapshot = data.into_snapshot();
        debug!(
            account,
            events = snapshot.events.len(),
            pools = snapshot.pools.len(),
            fetched_at = %snapshot.fetched_at,
            "chain snapshot ready"
        );
        Ok(snapshot)
    }
}

mod snapshot_query {
    pub const QUERY: &str = r#"
        query Snapshot($account: String!) {
            mints(where: { to: $account }) {
                id
                liquidity
                pair {
                    id
                    token0 { symbol }
                    token1 { symbol }
                }
                transaction {
                    blockNumber
                    timestamp
                }
            }
            burns(where: { sender: $account }) {
                id
                liquidity
                pair {
                    id
                    token0 { symbol }
                    token1 { symbol }
                }
                transaction {
                    blockNumber
                    timestamp
                }
            }
            pairs {
                id
                token0 { symbol }
                token1 { symbol }
                reserve0
                reserve1
                totalSupply
            }
        }
    "#;
}

/// Payload of the snapshot query.
#[derive(Debug, Deserialize, PartialEq)]
pub struct SnapshotData {
    pub mints: Vec<EventRecord>,
    pub burns: Vec<EventRecord>,
    pub pairs: Vec<PairRecord>,
}

/// A mint or burn as the subgraph reports it; the direction comes from the
/// collection it arrived in.
#[derive(Debug, Deserialize, PartialEq)]
pub struct EventRecord {
    pub id: String,
    pub liquidity: String,
    pub pair: PairRef,
    /// Fetched with the fixed query shape; not used by the calculation.
    pub transaction: TransactionRef,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PairRef {
    pub id: String,
    pub token0: TokenRef,
    pub token1: TokenRef,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct TokenRef {
    pub symbol: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct TransactionRef {
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    pub timestamp: String,
}

/// A pair with current reserves and supply.
#[derive(Debug, Deserialize, PartialEq)]
pub struct PairRecord {
    pub id: String,
    pub token0: TokenRef,
    pub token1: TokenRef,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(rename = "totalSupply")]
    pub total_supply: String,
}

impl EventRecord {
    fn into_event(self, kind: EventKind) -> Result<LiquidityEvent, DomainError> {
        let amount = parse_decimal("liquidity", &self.liquidity)?;
        Ok(LiquidityEvent {
            pool_id: self.pair.id,
            kind,
            amount,
        })
    }
}

impl PairRecord {
    fn into_pool_state(self) -> Result<PoolState, DomainError> {
        Ok(PoolState {
            reserve0: parse_decimal("reserve0", &self.reserve0)?,
            reserve1: parse_decimal("reserve1", &self.reserve1)?,
            total_supply: parse_decimal("totalSupply", &self.total_supply)?,
            pool_id: self.id,
            token0_symbol: self.token0.symbol,
            token1_symbol: self.token1.symbol,
        })
    }
}

impl SnapshotData {
    /// Converts wire records into domain values, dropping records whose
    /// quantities do not parse. A dropped record is logged distinctly so a
    /// parse failure is never mistaken for a successful zero.
    #[must_use]
    pub fn into_snapshot(self) -> ChainSnapshot {
        let mut events = Vec::with_capacity(self.mints.len() + self.burns.len());
        for (kind, records) in [(EventKind::Mint, self.mints), (EventKind::Burn, self.burns)] {
            for record in records {
                let id = record.id.clone();
                match record.into_event(kind) {
                    Ok(event) => events.push(event),
                    Err(err) => warn!(event = %id, "dropping event: {err}"),
                }
            }
        }

        let mut pools = Vec::with_capacity(self.pairs.len());
        for record in self.pairs {
            let id = record.id.clone();
            match record.into_pool_state() {
                Ok(pool) => pools.push(pool),
                Err(err) => warn!(pair = %id, "dropping pair: {err}"),
            }
        }

        ChainSnapshot {
            events,
            pools,
            fetched_at: Utc::now(),
        }
    }
}

/// Parses a subgraph decimal string, accepting scientific notation.
fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, DomainError> {
    value
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| DomainError::InvalidAmount {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn mint_json(id: &str, liquidity: &str, pair: &str) -> serde_json::Value {
        json!({
            "id": id,
            "liquidity": liquidity,
            "pair": {
                "id": pair,
                "token0": { "symbol": "X" },
                "token1": { "symbol": "Y" },
            },
            "transaction": {
                "blockNumber": "1234567",
                "timestamp": "1700000000",
            },
        })
    }

    #[test]
    fn test_decode_snapshot_data() {
        let data: SnapshotData = serde_json::from_value(json!({
            "mints": [mint_json("m-1", "30", "0xpair")],
            "burns": [mint_json("b-1", "10", "0xpair")],
            "pairs": [{
                "id": "0xpair",
                "token0": { "symbol": "X" },
                "token1": { "symbol": "Y" },
                "reserve0": "50",
                "reserve1": "200",
                "totalSupply": "100",
            }],
        }))
        .unwrap();

        assert_eq!(data.mints.len(), 1);
        assert_eq!(data.mints[0].liquidity, "30");
        assert_eq!(data.mints[0].pair.token0.symbol, "X");
        assert_eq!(data.mints[0].transaction.block_number, "1234567");
        assert_eq!(data.burns.len(), 1);
        assert_eq!(data.pairs[0].total_supply, "100");
    }

    #[test]
    fn test_into_snapshot_converts_both_directions() {
        let data: SnapshotData = serde_json::from_value(json!({
            "mints": [mint_json("m-1", "30", "0xpair")],
            "burns": [mint_json("b-1", "10", "0xpair")],
            "pairs": [{
                "id": "0xpair",
                "token0": { "symbol": "X" },
                "token1": { "symbol": "Y" },
                "reserve0": "50",
                "reserve1": "200",
                "totalSupply": "100",
            }],
        }))
        .unwrap();

        let snapshot = data.into_snapshot();
        assert_eq!(snapshot.events.len(), 2);
        assert_eq!(snapshot.events[0].kind, EventKind::Mint);
        assert_eq!(snapshot.events[0].amount, dec!(30));
        assert_eq!(snapshot.events[1].kind, EventKind::Burn);
        assert_eq!(snapshot.events[1].amount, dec!(10));
        assert_eq!(snapshot.pools.len(), 1);
        assert_eq!(snapshot.pools[0].total_supply, dec!(100));
    }

    #[test]
    fn test_invalid_amount_drops_only_that_record() {
        let data: SnapshotData = serde_json::from_value(json!({
            "mints": [
                mint_json("m-1", "not-a-number", "0xpair"),
                mint_json("m-2", "12.5", "0xpair"),
            ],
            "burns": [],
            "pairs": [
                {
                    "id": "0xbroken",
                    "token0": { "symbol": "A" },
                    "token1": { "symbol": "B" },
                    "reserve0": "",
                    "reserve1": "1",
                    "totalSupply": "1",
                },
                {
                    "id": "0xpair",
                    "token0": { "symbol": "X" },
                    "token1": { "symbol": "Y" },
                    "reserve0": "50",
                    "reserve1": "200",
                    "totalSupply": "100",
                },
            ],
        }))
        .unwrap();

        let snapshot = data.into_snapshot();
        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.events[0].amount, dec!(12.5));
        assert_eq!(snapshot.pools.len(), 1);
        assert_eq!(snapshot.pools[0].pool_id, "0xpair");
    }

    #[test]
    fn test_parse_decimal_accepts_scientific_notation() {
        assert_eq!(parse_decimal("liquidity", "1.5e2").unwrap(), dec!(150));
        assert_eq!(parse_decimal("liquidity", "0.000001").unwrap(), dec!(0.000001));
        assert!(parse_decimal("liquidity", "abc").is_err());
    }
}
