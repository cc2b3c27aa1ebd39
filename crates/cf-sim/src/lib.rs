//! # cf-sim: Batch simulator
//!
//! Plays many independent sessions in parallel and aggregates the results
//! into a [`SimReport`]. Each session is seeded from the batch seed plus its
//! index, so a batch is reproducible regardless of thread count.

mod report;

pub use report::SimReport;

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cf_core::CascadeConfig;
use cf_session::{GameError, StandardSession, validate_bet};

/// Simulation errors
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// Result type for simulations
pub type SimResult<T> = Result<T, SimError>;

/// Batch parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Independent sessions to play
    pub sessions: usize,
    /// Spin calls per session (free spins count as calls)
    pub spins_per_session: u32,
    /// Bet per spin
    pub bet: u64,
    /// Balance each session starts with
    pub starting_balance: u64,
    /// Batch seed; session `i` uses `seed + i`
    pub seed: u64,
    /// Worker threads (defaults to the CPU count)
    #[serde(default)]
    pub threads: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sessions: 100,
            spins_per_session: 1_000,
            bet: 2,
            starting_balance: 1_000_000,
            seed: 0,
            threads: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.sessions == 0 {
            return Err(SimError::InvalidConfig("sessions must be > 0".into()));
        }
        if self.threads == Some(0) {
            return Err(SimError::InvalidConfig("threads must be > 0".into()));
        }
        validate_bet(self.bet).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }
}

/// Run a batch against `config`
pub fn run(config: &CascadeConfig, sim: &SimConfig) -> SimResult<SimReport> {
    sim.validate()?;

    let threads = sim.threads.unwrap_or_else(num_cpus::get);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| SimError::ThreadPool(e.to_string()))?;

    log::info!(
        "Simulating {} sessions x {} spins at bet {} on {} threads",
        sim.sessions,
        sim.spins_per_session,
        sim.bet,
        threads
    );

    let config = Arc::new(config.clone());
    let reports = pool.install(|| {
        (0..sim.sessions)
            .into_par_iter()
            .map(|idx| run_session(&config, sim, idx))
            .collect::<SimResult<Vec<_>>>()
    })?;

    let report = reports
        .into_iter()
        .fold(SimReport::default(), |acc, r| acc.merge(&r));

    log::info!(
        "Simulation done: {} spins, RTP {:.4}, hit rate {:.4}",
        report.total_spins,
        report.rtp,
        report.hit_rate
    );
    Ok(report)
}

/// Play one session until its spins run out or it can no longer pay the bet
fn run_session(config: &Arc<CascadeConfig>, sim: &SimConfig, idx: usize) -> SimResult<SimReport> {
    let session = StandardSession::seeded(Arc::clone(config), sim.seed.wrapping_add(idx as u64));
    session.deposit(sim.starting_balance)?;

    let mut report = SimReport::default();
    for _ in 0..sim.spins_per_session {
        match session.spin(sim.bet) {
            Ok(result) => report.record(&result, sim.bet),
            Err(GameError::InsufficientBalance { .. }) => {
                log::debug!("Session {idx} busted after {} spins", report.total_spins);
                report.busted_sessions = 1;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(report.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small(seed: u64) -> SimConfig {
        SimConfig {
            sessions: 8,
            spins_per_session: 50,
            bet: 2,
            starting_balance: 100_000,
            seed,
            threads: Some(2),
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = CascadeConfig::standard();
        let odd = SimConfig {
            bet: 3,
            ..small(0)
        };
        assert!(matches!(run(&config, &odd), Err(SimError::InvalidConfig(_))));

        let empty = SimConfig {
            sessions: 0,
            ..small(0)
        };
        assert!(matches!(run(&config, &empty), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_counts_add_up() {
        let report = run(&CascadeConfig::standard(), &small(1)).unwrap();

        assert_eq!(report.total_spins, 8 * 50);
        assert_eq!(report.paid_spins + report.free_spins, report.total_spins);
        assert_eq!(report.total_bet, report.paid_spins * 2);
        assert_eq!(report.busted_sessions, 0);
        assert!(report.max_win <= cf_core::max_payout(2));
        assert_relative_eq!(
            report.rtp,
            report.total_win as f64 / report.total_bet as f64,
            epsilon = 1e-12
        );
        assert!((0.0..=1.0).contains(&report.hit_rate));
    }

    #[test]
    fn test_reproducible_across_thread_counts() {
        let config = CascadeConfig::standard();
        let a = run(&config, &small(42)).unwrap();
        let b = run(
            &config,
            &SimConfig {
                threads: Some(1),
                ..small(42)
            },
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_broke_sessions_bust() {
        let sim = SimConfig {
            starting_balance: 0,
            ..small(7)
        };
        let report = run(&CascadeConfig::standard(), &sim).unwrap();
        assert_eq!(report.busted_sessions, 8);
        assert_eq!(report.total_spins, 0);
        assert_relative_eq!(report.rtp, 0.0);
    }

    #[test]
    fn test_report_serializes() {
        let report = run(&CascadeConfig::standard(), &small(3)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_spins"], 400);
    }
}
