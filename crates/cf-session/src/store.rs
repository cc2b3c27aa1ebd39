//! Session store
//!
//! Holds one player's balance, free-spin count and multiplier state. The
//! session lock already serializes every operation, so stores take `&mut self`
//! for writes and need no locking of their own.

use cf_core::MultiplierState;
use thiserror::Error;

/// Store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt session state: {0}")]
    Corrupt(String),
}

/// Result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Backing state for one session
pub trait SessionStore: Send {
    fn balance(&self) -> StoreResult<u64>;

    fn set_balance(&mut self, amount: u64) -> StoreResult<()>;

    fn free_spin_count(&self) -> StoreResult<u32>;

    fn set_free_spin_count(&mut self, count: u32) -> StoreResult<()>;

    fn multiplier_state(&self) -> StoreResult<MultiplierState>;

    fn set_multiplier_state(&mut self, state: &MultiplierState) -> StoreResult<()>;

    /// Start a new multiplier epoch (all hits 0, all multipliers x1)
    fn reset_multiplier_state(&mut self) -> StoreResult<()>;
}

/// Process-lifetime in-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    balance: u64,
    free_spins: u32,
    multipliers: MultiplierState,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a balance and banked free spins
    pub fn with_state(balance: u64, free_spins: u32) -> Self {
        Self {
            balance,
            free_spins,
            multipliers: MultiplierState::new(),
        }
    }
}

impl SessionStore for MemoryStore {
    fn balance(&self) -> StoreResult<u64> {
        Ok(self.balance)
    }

    fn set_balance(&mut self, amount: u64) -> StoreResult<()> {
        self.balance = amount;
        Ok(())
    }

    fn free_spin_count(&self) -> StoreResult<u32> {
        Ok(self.free_spins)
    }

    fn set_free_spin_count(&mut self, count: u32) -> StoreResult<()> {
        self.free_spins = count;
        Ok(())
    }

    fn multiplier_state(&self) -> StoreResult<MultiplierState> {
        Ok(self.multipliers.clone())
    }

    fn set_multiplier_state(&mut self, state: &MultiplierState) -> StoreResult<()> {
        self.multipliers = state.clone();
        Ok(())
    }

    fn reset_multiplier_state(&mut self) -> StoreResult<()> {
        self.multipliers.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Position;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::with_state(100, 2);
        assert_eq!(store.balance(), Ok(100));
        assert_eq!(store.free_spin_count(), Ok(2));

        let mut mult = MultiplierState::new();
        mult.record_hit(Position::new(2, 2));
        mult.record_hit(Position::new(2, 2));
        store.set_multiplier_state(&mult).unwrap();
        assert_eq!(store.multiplier_state().unwrap().multiplier(Position::new(2, 2)), 2);

        store.reset_multiplier_state().unwrap();
        assert!(store.multiplier_state().unwrap().is_identity());
    }
}
