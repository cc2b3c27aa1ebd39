//! Aggregated simulation statistics

use serde::{Deserialize, Serialize};

use cf_session::SpinResult;

/// Totals over one or more sessions
///
/// Counters add up under [`SimReport::merge`]; the ratios are recomputed from
/// the counters after every merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    /// Spin calls played
    pub total_spins: u64,
    /// Spins that debited the bet
    pub paid_spins: u64,
    /// Spins that consumed a free spin
    pub free_spins: u64,
    /// Money wagered on paid spins
    pub total_bet: u64,
    /// Money credited (capped payouts)
    pub total_win: u64,
    /// total_win / total_bet
    pub rtp: f64,
    /// Share of spins with a payout
    pub hit_rate: f64,
    /// Cascade steps per spin
    pub avg_cascades: f64,
    /// Largest single-spin payout
    pub max_win: u64,
    /// Spins clipped by the per-spin cap
    pub capped_spins: u64,
    /// Spins that awarded free spins from scatters
    pub free_spin_triggers: u64,
    /// Sessions that stopped for lack of balance
    pub busted_sessions: u64,
    winning_spins: u64,
    cascade_steps: u64,
}

impl SimReport {
    /// Count one spin
    pub fn record(&mut self, result: &SpinResult, bet: u64) {
        self.total_spins += 1;
        if result.in_free_spin {
            self.free_spins += 1;
        } else {
            self.paid_spins += 1;
            self.total_bet += bet;
        }

        self.total_win = self.total_win.saturating_add(result.total_payout);
        self.max_win = self.max_win.max(result.total_payout);
        self.cascade_steps += result.cascade_count() as u64;

        if result.is_win() {
            self.winning_spins += 1;
        }
        if result.win_capped {
            self.capped_spins += 1;
        }
        if result.awarded_free_spins > 0 {
            self.free_spin_triggers += 1;
        }
    }

    /// Combine two reports
    pub fn merge(&self, other: &SimReport) -> SimReport {
        SimReport {
            total_spins: self.total_spins + other.total_spins,
            paid_spins: self.paid_spins + other.paid_spins,
            free_spins: self.free_spins + other.free_spins,
            total_bet: self.total_bet + other.total_bet,
            total_win: self.total_win.saturating_add(other.total_win),
            max_win: self.max_win.max(other.max_win),
            capped_spins: self.capped_spins + other.capped_spins,
            free_spin_triggers: self.free_spin_triggers + other.free_spin_triggers,
            busted_sessions: self.busted_sessions + other.busted_sessions,
            winning_spins: self.winning_spins + other.winning_spins,
            cascade_steps: self.cascade_steps + other.cascade_steps,
            ..Default::default()
        }
        .finish()
    }

    /// Recompute the ratios from the counters
    pub fn finish(mut self) -> SimReport {
        self.rtp = ratio(self.total_win, self.total_bet);
        self.hit_rate = ratio(self.winning_spins, self.total_spins);
        self.avg_cascades = ratio(self.cascade_steps, self.total_spins);
        self
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}
