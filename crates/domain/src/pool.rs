use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pool's reserves and fungible supply at query time.
///
/// One instance per pool per snapshot, immutable within a calculation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    pub pool_id: String,
    pub token0_symbol: String,
    pub token1_symbol: String,
    pub reserve0: Decimal,
    pub reserve1: Decimal,
    pub total_supply: Decimal,
}
