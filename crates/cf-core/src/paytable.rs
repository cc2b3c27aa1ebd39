//! Paytable and win calculation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::multiplier::MultiplierState;
use crate::symbols::Symbol;

/// Maximum spin payout in multiples of the bet
pub const MAX_WIN_X_BET: u64 = 10_000;

/// Base pay per cell, keyed by regular symbol index
///
/// Symbols missing from the table pay nothing; that is a configuration gap,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayTable(pub BTreeMap<u8, u64>);

impl PayTable {
    /// Default table: low symbols pay 1 per cell, top symbol pays 10
    pub fn standard() -> Self {
        Self(BTreeMap::from([
            (0, 1),
            (1, 1),
            (2, 2),
            (3, 2),
            (4, 3),
            (5, 5),
            (6, 10),
        ]))
    }

    /// Base pay for a symbol (0 if absent or not a regular symbol)
    pub fn base_pay(&self, symbol: Symbol) -> u64 {
        symbol
            .regular_index()
            .and_then(|idx| self.0.get(&idx).copied())
            .unwrap_or(0)
    }

    /// Win for one cluster: `base × size × avg multiplier × bet`
    ///
    /// The average multiplier is taken from the state *before* the cluster's
    /// own hits are recorded.
    pub fn cluster_win(&self, cluster: &Cluster, multipliers: &MultiplierState, bet: u64) -> u64 {
        if cluster.cells.is_empty() {
            return 0;
        }
        let avg = multipliers.average(&cluster.cells);
        self.base_pay(cluster.symbol)
            .saturating_mul(cluster.len() as u64)
            .saturating_mul(avg as u64)
            .saturating_mul(bet)
    }
}

/// Largest payout a single spin may credit
pub fn max_payout(bet: u64) -> u64 {
    MAX_WIN_X_BET.saturating_mul(bet)
}

/// Clamp a spin's raw win to the cap; the excess is discarded
pub fn apply_max_payout(total_win: u64, bet: u64) -> u64 {
    total_win.min(max_payout(bet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    fn cluster_of(symbol: u8, size: usize) -> Cluster {
        Cluster {
            symbol: Symbol::regular(symbol).unwrap(),
            cells: (0..size).map(|i| Position::new(i / 7, i % 7)).collect(),
        }
    }

    #[test]
    fn test_base_pay_gaps() {
        let table = PayTable(BTreeMap::from([(2, 5)]));
        assert_eq!(table.base_pay(Symbol::regular(2).unwrap()), 5);
        assert_eq!(table.base_pay(Symbol::regular(3).unwrap()), 0);
        assert_eq!(table.base_pay(Symbol::BONUS), 0);
        assert_eq!(table.base_pay(Symbol::EMPTY), 0);
    }

    #[test]
    fn test_cluster_win_identity_multipliers() {
        let table = PayTable(BTreeMap::from([(2, 5)]));
        let win = table.cluster_win(&cluster_of(2, 6), &MultiplierState::new(), 10);
        assert_eq!(win, 300);
    }

    #[test]
    fn test_cluster_win_uses_floor_average() {
        let table = PayTable(BTreeMap::from([(0, 1)]));
        let cluster = cluster_of(0, 5);
        let mut mult = MultiplierState::new();
        // two hits on one cell -> x2, others stay x1: (2 + 4) / 5 = 1
        mult.record_hit(cluster.cells[0]);
        mult.record_hit(cluster.cells[0]);
        assert_eq!(table.cluster_win(&cluster, &mult, 2), 10);

        // raise every cell to x2 -> average 2
        for &pos in &cluster.cells[1..] {
            mult.record_hit(pos);
            mult.record_hit(pos);
        }
        assert_eq!(table.cluster_win(&cluster, &mult, 2), 20);
    }

    #[test]
    fn test_cluster_win_monotone() {
        let table = PayTable::standard();
        let mult = MultiplierState::new();
        let mut last = 0;
        for size in 5..=12 {
            let win = table.cluster_win(&cluster_of(4, size), &mult, 2);
            assert!(win >= last);
            last = win;
        }
        let small_bet = table.cluster_win(&cluster_of(4, 5), &mult, 2);
        let big_bet = table.cluster_win(&cluster_of(4, 5), &mult, 8);
        assert!(big_bet >= small_bet);
    }

    #[test]
    fn test_max_payout_cap() {
        assert_eq!(apply_max_payout(5_000, 2), 5_000);
        assert_eq!(apply_max_payout(20_001, 2), 20_000);
        assert_eq!(apply_max_payout(u64::MAX, u64::MAX), u64::MAX);
    }
}
