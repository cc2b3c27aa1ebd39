//! Per-cell multiplier state
//!
//! Every time a cell is part of an exploded cluster its hit counter goes up.
//! From the second hit on, the cell's multiplier doubles: x2, x4, … capped at
//! x128. The state persists across cascades and free spins and is only reset
//! when a paid spin starts a new epoch.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Position};

/// Multiplier granted on a cell's second hit
pub const MULTIPLIER_START: u32 = 2;
/// Multiplier ceiling
pub const MULTIPLIER_MAX: u32 = 128;

/// Multiplier for a given hit count: 1 below two hits, then 2^(hits-1) up to the cap
pub fn multiplier_for_hits(hits: u32) -> u32 {
    if hits < 2 {
        return 1;
    }
    MULTIPLIER_START
        .checked_shl(hits - 2)
        .filter(|&m| m <= MULTIPLIER_MAX && m != 0)
        .unwrap_or(MULTIPLIER_MAX)
}

/// Hit counters and multipliers for every cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierState {
    hits: Grid<u32>,
    mult: Grid<u32>,
}

impl MultiplierState {
    /// Fresh epoch: no hits, every multiplier x1
    pub fn new() -> Self {
        Self {
            hits: Grid::filled(0),
            mult: Grid::filled(1),
        }
    }

    /// Rebuild from persisted grids
    pub fn from_parts(mult: Grid<u32>, hits: Grid<u32>) -> Self {
        Self { hits, mult }
    }

    /// Start a new epoch
    pub fn reset(&mut self) {
        self.hits.fill(0);
        self.mult.fill(1);
    }

    pub fn hits(&self, pos: Position) -> u32 {
        self.hits.get(pos).unwrap_or(0)
    }

    pub fn multiplier(&self, pos: Position) -> u32 {
        self.mult.get(pos).unwrap_or(1)
    }

    pub fn hits_grid(&self) -> &Grid<u32> {
        &self.hits
    }

    pub fn multiplier_grid(&self) -> &Grid<u32> {
        &self.mult
    }

    /// Count one cluster removal on `pos`, returning the cell's multiplier afterwards
    pub fn record_hit(&mut self, pos: Position) -> u32 {
        let Some(hits) = self.hits.get_mut(pos) else {
            return 1;
        };
        *hits = hits.saturating_add(1);
        let hits = *hits;
        if hits >= 2 {
            self.mult[pos] = multiplier_for_hits(hits);
        }
        self.mult[pos]
    }

    /// Floor of the mean multiplier over `cells`, never below 1
    pub fn average(&self, cells: &[Position]) -> u32 {
        if cells.is_empty() {
            return 1;
        }
        let sum: u64 = cells.iter().map(|&p| self.multiplier(p) as u64).sum();
        ((sum / cells.len() as u64) as u32).max(1)
    }

    /// Highest multiplier on the board
    pub fn peak(&self) -> u32 {
        self.mult.as_slice().iter().copied().max().unwrap_or(1)
    }

    /// True at the start of an epoch
    pub fn is_identity(&self) -> bool {
        self.hits.as_slice().iter().all(|&h| h == 0) && self.mult.as_slice().iter().all(|&m| m == 1)
    }
}

impl Default for MultiplierState {
    fn default() -> Self {
        Self::new()
    }
}
