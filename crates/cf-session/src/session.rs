//! Session orchestrator
//!
//! One [`Session`] per player. Every public operation takes the session lock
//! for its whole read-modify-write, so concurrent callers on the same player
//! are serialized and never lose updates. Balance and free spins are read
//! before the first store write; a paid spin reads the multiplier state back
//! after resetting it. The remaining writes are issued after resolution, last.
//! Writes already committed when a later store call fails are not undone.

use std::sync::Arc;

use parking_lot::Mutex;

use cf_core::{CascadeConfig, CascadeResolver, StdSource, SymbolSource};

use crate::error::{GameError, GameResult};
use crate::result::{BonusPurchase, SessionData, SpinResult};
use crate::store::{MemoryStore, SessionStore};

/// Free spins granted by a bonus buy, regardless of the award table
pub const BONUS_BUY_SPINS: u32 = 10;

/// How a spin is funded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinMode {
    /// Debits the bet and opens a new multiplier epoch
    Paid,
    /// Consumes a banked free spin; multipliers carry over
    Free,
}

/// Bets must be positive and even
pub fn validate_bet(bet: u64) -> GameResult<()> {
    if bet == 0 || bet % 2 != 0 {
        return Err(GameError::InvalidBet(bet));
    }
    Ok(())
}

struct SessionInner<S, R> {
    store: S,
    source: R,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════════════

/// A player's game session
pub struct Session<S, R> {
    config: Arc<CascadeConfig>,
    inner: Mutex<SessionInner<S, R>>,
}

/// In-memory session on the default random source
pub type StandardSession = Session<MemoryStore, StdSource>;

impl StandardSession {
    /// Empty session drawing from OS entropy
    pub fn standard(config: Arc<CascadeConfig>) -> Self {
        let source = StdSource::from_entropy(&config);
        Self::new(config, MemoryStore::new(), source)
    }

    /// Empty session with a reproducible random source
    pub fn seeded(config: Arc<CascadeConfig>, seed: u64) -> Self {
        let source = StdSource::seeded(&config, seed);
        Self::new(config, MemoryStore::new(), source)
    }
}

impl<S: SessionStore, R: SymbolSource> Session<S, R> {
    pub fn new(config: Arc<CascadeConfig>, store: S, source: R) -> Self {
        Self {
            config,
            inner: Mutex::new(SessionInner { store, source }),
        }
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Play one spin
    ///
    /// Uses a banked free spin when one is available, otherwise debits `bet`.
    pub fn spin(&self, bet: u64) -> GameResult<SpinResult> {
        validate_bet(bet)?;

        let mut inner = self.inner.lock();
        let SessionInner { store, source } = &mut *inner;

        let free_spins = store.free_spin_count()?;
        let mode = if free_spins > 0 {
            SpinMode::Free
        } else {
            SpinMode::Paid
        };

        let (mut balance, free_spins, mut multipliers) = match mode {
            SpinMode::Free => {
                let multipliers = store.multiplier_state()?;
                let balance = store.balance()?;
                let remaining = free_spins - 1;
                store.set_free_spin_count(remaining)?;
                (balance, remaining, multipliers)
            }
            SpinMode::Paid => {
                let balance = store.balance()?;
                if balance < bet {
                    return Err(GameError::InsufficientBalance {
                        balance,
                        required: bet,
                    });
                }
                store.set_balance(balance - bet)?;
                store.reset_multiplier_state()?;
                let multipliers = store.multiplier_state()?;
                (balance - bet, free_spins, multipliers)
            }
        };

        let resolution = CascadeResolver::new(&self.config).spin(source, &mut multipliers, bet);

        store.set_multiplier_state(&multipliers)?;

        if resolution.total_payout > 0 {
            balance = balance.saturating_add(resolution.total_payout);
            store.set_balance(balance)?;
        }

        let awarded = self.config.awarded_spins(resolution.scatter_count);
        let free_spins_left = free_spins.saturating_add(awarded);
        if awarded > 0 {
            log::info!(
                "{} scatters awarded {} free spins ({} banked)",
                resolution.scatter_count,
                awarded,
                free_spins_left
            );
            store.set_free_spin_count(free_spins_left)?;
        }

        log::debug!(
            "{:?} spin bet {}: {} cascades, payout {}, balance {}",
            mode,
            bet,
            resolution.cascades.len(),
            resolution.total_payout,
            balance
        );

        Ok(SpinResult {
            win_capped: resolution.is_capped(),
            initial_board: resolution.initial_board,
            board: resolution.board,
            cascades: resolution.cascades,
            total_payout: resolution.total_payout,
            balance,
            scatter_count: resolution.scatter_count,
            awarded_free_spins: awarded,
            free_spins_left,
            in_free_spin: mode == SpinMode::Free,
        })
    }

    /// Buy straight into free spins
    ///
    /// Debits `amount` and sets the free-spin count to [`BONUS_BUY_SPINS`].
    /// The count is overwritten, not added to.
    pub fn buy_bonus(&self, amount: u64) -> GameResult<BonusPurchase> {
        let mut inner = self.inner.lock();
        let store = &mut inner.store;

        let balance = store.balance()?;
        if balance < amount {
            return Err(GameError::InsufficientBalance {
                balance,
                required: amount,
            });
        }

        let balance = balance - amount;
        store.set_balance(balance)?;
        store.set_free_spin_count(BONUS_BUY_SPINS)?;

        log::info!("Bonus bought for {amount}: {BONUS_BUY_SPINS} free spins");

        Ok(BonusPurchase {
            cost: amount,
            awarded_spins: BONUS_BUY_SPINS,
            balance,
            free_spins_left: BONUS_BUY_SPINS,
        })
    }

    /// Set the balance to `amount` (replaces it, does not add)
    pub fn deposit(&self, amount: u64) -> GameResult<()> {
        let mut inner = self.inner.lock();
        inner.store.set_balance(amount)?;
        log::info!("Balance set to {amount}");
        Ok(())
    }

    /// Current balance and banked free spins
    pub fn check_data(&self) -> GameResult<SessionData> {
        let inner = self.inner.lock();
        Ok(SessionData {
            balance: inner.store.balance()?,
            free_spins_left: inner.store.free_spin_count()?,
        })
    }

    /// Run `f` against the store under the session lock
    pub fn with_store<T>(&self, f: impl FnOnce(&mut S) -> T) -> T {
        f(&mut self.inner.lock().store)
    }
}
