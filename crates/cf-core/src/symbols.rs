//! Symbol ids
//!
//! `-1` is an empty cell, `0..=6` are regular symbols ordered by increasing
//! pay value and `7` is the bonus/scatter symbol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell value on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Symbol(i8);

impl Symbol {
    /// Cell vacated by an exploded cluster, awaiting refill
    pub const EMPTY: Symbol = Symbol(-1);
    /// Scatter: never clusters, awards free spins by count
    pub const BONUS: Symbol = Symbol(7);
    /// Number of regular (paying) symbols
    pub const REGULAR_COUNT: u8 = 7;

    /// Regular symbol by index, `None` outside `0..=6`
    pub fn regular(index: u8) -> Option<Symbol> {
        (index < Self::REGULAR_COUNT).then_some(Symbol(index as i8))
    }

    /// Iterate all regular symbols in ascending id order
    pub fn regulars() -> impl Iterator<Item = Symbol> {
        (0..Self::REGULAR_COUNT).map(|i| Symbol(i as i8))
    }

    /// Raw id as stored on the wire
    pub const fn id(self) -> i8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    pub fn is_bonus(self) -> bool {
        self == Self::BONUS
    }

    /// Regular symbols are the only ones that can form clusters
    pub fn is_regular(self) -> bool {
        (0..Self::REGULAR_COUNT as i8).contains(&self.0)
    }

    /// Index into the pay table, `None` for empty and bonus
    pub fn regular_index(self) -> Option<u8> {
        self.is_regular().then_some(self.0 as u8)
    }
}

impl TryFrom<i8> for Symbol {
    type Error = String;

    fn try_from(id: i8) -> Result<Self, Self::Error> {
        match id {
            -1..=7 => Ok(Symbol(id)),
            other => Err(format!("symbol id {other} out of range -1..=7")),
        }
    }
}

impl From<Symbol> for i8 {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::EMPTY => f.write_str("."),
            Symbol::BONUS => f.write_str("S"),
            Symbol(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_classes() {
        assert!(Symbol::EMPTY.is_empty());
        assert!(Symbol::BONUS.is_bonus());
        assert!(!Symbol::BONUS.is_regular());
        assert!(!Symbol::EMPTY.is_regular());
        assert_eq!(Symbol::regular(6).and_then(Symbol::regular_index), Some(6));
        assert_eq!(Symbol::regular(7), None);
        assert_eq!(Symbol::regulars().count(), 7);
    }

    #[test]
    fn test_symbol_serde_range() {
        let sym: Symbol = serde_json::from_str("3").unwrap();
        assert_eq!(sym, Symbol::regular(3).unwrap());
        assert_eq!(serde_json::to_string(&Symbol::EMPTY).unwrap(), "-1");
        assert!(serde_json::from_str::<Symbol>("8").is_err());
        assert!(serde_json::from_str::<Symbol>("-2").is_err());
    }
}
