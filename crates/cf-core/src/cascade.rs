//! Cascade resolution
//!
//! Drives the detect → pay → remove → collapse → refill loop until the board
//! holds no cluster. Every iteration is recorded as a [`CascadeStep`] so a
//! client can replay the spin.

use serde::{Deserialize, Serialize};

use crate::board;
use crate::cluster::{Cluster, find_clusters};
use crate::config::CascadeConfig;
use crate::grid::{Board, Position};
use crate::multiplier::MultiplierState;
use crate::paytable::apply_max_payout;
use crate::source::SymbolSource;
use crate::symbols::Symbol;

/// Safety bound on resolve iterations; sane tables settle long before this
pub const MAX_RESOLVE_ITERATIONS: usize = 100;

/// A cluster as it was paid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    /// Regular symbol (0..=6)
    pub symbol: Symbol,
    /// Cells of the cluster
    pub cells: Vec<Position>,
    /// Cluster size (≥ 5)
    pub count: usize,
    /// Money won by this cluster
    pub payout: u64,
    /// Average multiplier the cluster paid with
    pub multiplier: u32,
}

/// A symbol that landed in a cell emptied by this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSymbol {
    pub position: Position,
    pub symbol: Symbol,
}

/// One iteration of the resolve loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// 0 = first cascade of the spin
    pub cascade_index: usize,
    /// Clusters paid, in detector order
    pub clusters: Vec<ClusterInfo>,
    /// Fall-ins, row-major
    pub new_symbols: Vec<NewSymbol>,
}

impl CascadeStep {
    /// Total paid by this step
    pub fn win(&self) -> u64 {
        self.clusters
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.payout))
    }
}

/// Outcome of resolving one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Board as dealt, before any cascade
    pub initial_board: Board,
    /// Settled board
    pub board: Board,
    /// Steps in the order they happened
    pub cascades: Vec<CascadeStep>,
    /// Sum of every cluster win
    pub raw_win: u64,
    /// `raw_win` clamped to the per-spin cap
    pub total_payout: u64,
    /// Scatters on the settled board
    pub scatter_count: usize,
    /// Loop stopped on the iteration bound instead of a stable board
    pub hit_iteration_cap: bool,
}

impl Resolution {
    /// The cap discarded part of the win
    pub fn is_capped(&self) -> bool {
        self.total_payout < self.raw_win
    }
}

/// Resolves spins against a fixed configuration
///
/// The resolver owns no state. The caller hands in the multiplier state for
/// the current epoch and persists it afterwards.
#[derive(Debug, Clone, Copy)]
pub struct CascadeResolver<'a> {
    config: &'a CascadeConfig,
}

impl<'a> CascadeResolver<'a> {
    pub fn new(config: &'a CascadeConfig) -> Self {
        Self { config }
    }

    /// Deal a fresh board from `source` and resolve it
    pub fn spin(
        &self,
        source: &mut impl SymbolSource,
        multipliers: &mut MultiplierState,
        bet: u64,
    ) -> Resolution {
        let board = board::generate(source);
        self.resolve(board, source, multipliers, bet)
    }

    /// Resolve an already dealt board to a fixed point
    pub fn resolve(
        &self,
        initial_board: Board,
        source: &mut impl SymbolSource,
        multipliers: &mut MultiplierState,
        bet: u64,
    ) -> Resolution {
        let mut board = initial_board;
        let mut cascades = Vec::new();
        let mut raw_win = 0u64;
        let mut hit_iteration_cap = true;

        for iter in 0..MAX_RESOLVE_ITERATIONS {
            let clusters = find_clusters(&board);
            if clusters.is_empty() {
                hit_iteration_cap = false;
                break;
            }

            let mut step = CascadeStep {
                cascade_index: iter,
                ..Default::default()
            };

            for cluster in &clusters {
                if let Some(info) = self.pay_and_remove(cluster, &mut board, multipliers, bet) {
                    raw_win = raw_win.saturating_add(info.payout);
                    step.clusters.push(info);
                }
            }

            let emptied = board;
            board::collapse_and_refill(&mut board, source);
            step.new_symbols = emptied
                .iter()
                .filter(|&(pos, s)| s.is_empty() && !board[pos].is_empty())
                .map(|(pos, _)| NewSymbol {
                    position: pos,
                    symbol: board[pos],
                })
                .collect();

            log::debug!(
                "Cascade {}: {} clusters, win {}",
                iter,
                step.clusters.len(),
                step.win()
            );
            cascades.push(step);
        }

        // the last allowed step may still have left a stable board
        if hit_iteration_cap {
            hit_iteration_cap = !find_clusters(&board).is_empty();
        }
        if hit_iteration_cap {
            log::error!(
                "Cascade resolution hit the {MAX_RESOLVE_ITERATIONS}-iteration bound; check symbol weights"
            );
        }

        let total_payout = apply_max_payout(raw_win, bet);
        if total_payout < raw_win {
            log::info!("Spin win {raw_win} capped to {total_payout}");
        }

        Resolution {
            initial_board,
            scatter_count: board.scatter_count(),
            board,
            cascades,
            raw_win,
            total_payout,
            hit_iteration_cap,
        }
    }

    /// Pay one cluster, then bump its cells' multipliers and empty them
    ///
    /// A cluster whose cells no longer hold its symbol is not paid, and its
    /// cells are left in place with their multipliers untouched.
    fn pay_and_remove(
        &self,
        cluster: &Cluster,
        board: &mut Board,
        multipliers: &mut MultiplierState,
        bet: u64,
    ) -> Option<ClusterInfo> {
        if !cluster.matches(board) {
            log::error!(
                "Cluster of symbol {} rooted at {:?} no longer matches the board; left unpaid in place",
                cluster.symbol,
                cluster.cells.first()
            );
            return None;
        }

        let multiplier = multipliers.average(&cluster.cells);
        let payout = self.config.pay_table.cluster_win(cluster, multipliers, bet);

        for &pos in &cluster.cells {
            multipliers.record_hit(pos);
            board[pos] = Symbol::EMPTY;
        }

        Some(ClusterInfo {
            symbol: cluster.symbol,
            cells: cluster.cells.clone(),
            count: cluster.len(),
            payout,
            multiplier,
        })
    }
}
