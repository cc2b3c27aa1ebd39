//! Session errors

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by session operations
#[derive(Error, Debug)]
pub enum GameError {
    /// Bet is zero or odd; nothing was changed
    #[error("Invalid bet {0}: must be a positive even amount")]
    InvalidBet(u64),

    /// Balance does not cover the bet or bonus price; nothing was debited
    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: u64, required: u64 },

    /// Session store failure; writes committed before it are not rolled back
    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

impl GameError {
    /// Caller error (as opposed to an internal failure)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            GameError::InvalidBet(_) | GameError::InsufficientBalance { .. }
        )
    }
}

/// Result type alias
pub type GameResult<T> = Result<T, GameError>;
