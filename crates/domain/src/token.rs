use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A proportional claim on one token of a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub symbol: String,
    pub amount: Decimal,
}

impl TokenAmount {
    #[must_use]
    pub fn new(symbol: impl Into<String>, amount: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            amount,
        }
    }
}

/// Token totals accumulated at one scope (address, chain, or grand).
///
/// Starts empty and grows through [`TokenTotals::add`], the single fold rule
/// applied at every scope. Addition over exact decimals is commutative and
/// associative, so accumulation order never affects the result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenTotals(BTreeMap<String, Decimal>);

impl TokenTotals {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the running total for `symbol`, starting from zero
    /// on the symbol's first occurrence.
    pub fn add(&mut self, symbol: impl Into<String>, amount: Decimal) {
        *self.0.entry(symbol.into()).or_insert(Decimal::ZERO) += amount;
    }

    /// Folds a sequence of token amounts into this accumulator.
    pub fn accumulate<I>(&mut self, amounts: I)
    where
        I: IntoIterator<Item = TokenAmount>,
    {
        for TokenAmount { symbol, amount } in amounts {
            self.add(symbol, amount);
        }
    }

    /// Folds another accumulator into this one, treating each of its entries
    /// as a token amount. This is the same fold as [`TokenTotals::add`], so
    /// chain and grand totals compose exactly like address totals.
    pub fn merge(&mut self, other: &TokenTotals) {
        for (symbol, amount) in other.iter() {
            self.add(symbol.clone(), *amount);
        }
    }

    /// Returns the accumulated amount for `symbol`, zero if never seen.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Decimal {
        self.0.get(symbol).copied().unwrap_or(Decimal::ZERO)
    }

    /// Iterates entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Decimal)> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_initializes_on_first_occurrence() {
        let mut totals = TokenTotals::new();
        assert_eq!(totals.get("X"), dec!(0));

        totals.add("X", dec!(10));
        totals.add("X", dec!(2.5));
        assert_eq!(totals.get("X"), dec!(12.5));
        assert_eq!(totals.len(), 1);
    }

    #[test]
    fn test_accumulate_is_order_independent() {
        let amounts = vec![
            TokenAmount::new("X", dec!(10)),
            TokenAmount::new("Y", dec!(40)),
            TokenAmount::new("X", dec!(5)),
            TokenAmount::new("Z", dec!(0.125)),
        ];

        let mut forward = TokenTotals::new();
        forward.accumulate(amounts.clone());

        let mut reversed = TokenTotals::new();
        reversed.accumulate(amounts.into_iter().rev());

        assert_eq!(forward, reversed);
        assert_eq!(forward.get("X"), dec!(15));
        assert_eq!(forward.get("Y"), dec!(40));
        assert_eq!(forward.get("Z"), dec!(0.125));
    }

    #[test]
    fn test_merge_matches_direct_accumulation() {
        let amounts = vec![
            TokenAmount::new("X", dec!(1)),
            TokenAmount::new("Y", dec!(2)),
            TokenAmount::new("X", dec!(3)),
        ];

        // One accumulator fed directly.
        let mut direct = TokenTotals::new();
        direct.accumulate(amounts.clone());

        // Two accumulators merged afterward.
        let mut left = TokenTotals::new();
        left.accumulate(amounts[..1].to_vec());
        let mut right = TokenTotals::new();
        right.accumulate(amounts[1..].to_vec());

        let mut merged = TokenTotals::new();
        merged.merge(&left);
        merged.merge(&right);

        assert_eq!(direct, merged);
    }

    #[test]
    fn test_iteration_is_symbol_ordered() {
        let mut totals = TokenTotals::new();
        totals.add("WETH", dec!(1));
        totals.add("DAI", dec!(2));
        totals.add("USDC", dec!(3));

        let symbols: Vec<&str> = totals.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, vec!["DAI", "USDC", "WETH"]);
    }
}
