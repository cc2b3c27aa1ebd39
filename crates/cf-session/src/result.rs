//! Results returned to the transport layer

use serde::{Deserialize, Serialize};

use cf_core::{Board, CascadeStep};

/// Complete outcome of one spin call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Board as dealt, before any cascade
    pub initial_board: Board,
    /// Settled board after all cascades
    pub board: Board,
    /// Every cascade step, for animation
    pub cascades: Vec<CascadeStep>,
    /// Credited win (capped)
    pub total_payout: u64,
    /// The per-spin cap discarded part of the win
    pub win_capped: bool,
    /// Balance after the spin
    pub balance: u64,
    /// Scatters on the settled board
    pub scatter_count: usize,
    /// Free spins awarded by this spin
    pub awarded_free_spins: u32,
    /// Free spins banked after the spin
    pub free_spins_left: u32,
    /// This call consumed a free spin
    pub in_free_spin: bool,
}

impl SpinResult {
    pub fn is_win(&self) -> bool {
        self.total_payout > 0
    }

    /// Number of cascade steps
    pub fn cascade_count(&self) -> usize {
        self.cascades.len()
    }
}

/// Balance and free spins, as reported by `check_data`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub balance: u64,
    pub free_spins_left: u32,
}

/// Receipt for a bonus buy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPurchase {
    pub cost: u64,
    pub awarded_spins: u32,
    pub balance: u64,
    pub free_spins_left: u32,
}
