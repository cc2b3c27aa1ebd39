//! # cf-session: Player sessions for the cascade engine
//!
//! Wraps the stateless resolver from `cf-core` in a per-player state machine:
//! paid spins debit the balance and open a new multiplier epoch, free spins
//! consume a banked credit and keep the epoch running, scatters award more
//! free spins.
//!
//! Each [`Session`] serializes its operations behind one lock, so the full
//! read-modify-write of balance, free spins and multipliers is atomic per
//! player. Different sessions share nothing and can spin in parallel.

pub mod error;
pub mod registry;
pub mod result;
pub mod session;
pub mod store;

pub use error::{GameError, GameResult};
pub use registry::SessionRegistry;
pub use result::{BonusPurchase, SessionData, SpinResult};
pub use session::{BONUS_BUY_SPINS, Session, SpinMode, StandardSession, validate_bet};
pub use store::{MemoryStore, SessionStore, StoreError, StoreResult};
