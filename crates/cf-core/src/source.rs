//! Symbol sources
//!
//! A [`SymbolSource`] produces the symbol for one cell. The engine asks for
//! cells in a fixed order (row-major on a fresh board, then column by column,
//! top to bottom, on refills), so a source fully determines a spin.

use std::collections::VecDeque;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::config::CascadeConfig;
use crate::grid::Board;
use crate::symbols::Symbol;

/// Per-cell symbol draw
pub trait SymbolSource {
    /// Symbol for the next cell
    fn draw(&mut self) -> Symbol;
}

impl<S: SymbolSource + ?Sized> SymbolSource for &mut S {
    fn draw(&mut self) -> Symbol {
        (**self).draw()
    }
}

impl<S: SymbolSource + ?Sized> SymbolSource for Box<S> {
    fn draw(&mut self) -> Symbol {
        (**self).draw()
    }
}

/// Weighted random source driven by the game tables
///
/// Each cell is the bonus symbol with `bonus_probability`; otherwise a
/// regular symbol is picked with probability `weight / total`. Weights are
/// walked in ascending symbol id so the cumulative order never depends on map
/// iteration. A zero total forces symbol 0.
#[derive(Debug, Clone)]
pub struct WeightedSource<R> {
    rng: R,
    weights: Vec<(Symbol, u64)>,
    total: u64,
    bonus_probability: f64,
}

impl<R: Rng> WeightedSource<R> {
    pub fn new(config: &CascadeConfig, rng: R) -> Self {
        let weights: Vec<(Symbol, u64)> = config
            .symbol_weights
            .iter()
            .filter_map(|(&idx, &w)| Symbol::regular(idx).map(|s| (s, w as u64)))
            .filter(|&(_, w)| w > 0)
            .collect();
        let total = weights.iter().map(|&(_, w)| w).sum();

        Self {
            rng,
            weights,
            total,
            bonus_probability: config.bonus_probability,
        }
    }

    /// Weighted regular symbol, ignoring the bonus chance
    pub fn draw_regular(&mut self) -> Symbol {
        if self.total == 0 {
            return Symbol::regular(0).unwrap_or(Symbol::EMPTY);
        }
        let mut n = self.rng.random_range(0..self.total);
        for &(symbol, weight) in &self.weights {
            if n < weight {
                return symbol;
            }
            n -= weight;
        }
        // unreachable while total == sum(weights)
        self.weights
            .last()
            .map(|&(s, _)| s)
            .unwrap_or(Symbol::EMPTY)
    }
}

/// Weighted source over the engine's default generator
pub type StdSource = WeightedSource<ChaCha8Rng>;

impl WeightedSource<ChaCha8Rng> {
    /// Source seeded from OS entropy
    pub fn from_entropy(config: &CascadeConfig) -> Self {
        Self::new(config, ChaCha8Rng::from_os_rng())
    }

    /// Reproducible source for simulations and tests
    pub fn seeded(config: &CascadeConfig, seed: u64) -> Self {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SymbolSource for WeightedSource<R> {
    fn draw(&mut self) -> Symbol {
        if self.rng.random::<f64>() < self.bonus_probability {
            Symbol::BONUS
        } else {
            self.draw_regular()
        }
    }
}

/// Replays a fixed symbol sequence, then repeats `fallback` forever
///
/// Used to resolve manufactured boards: script the 49 cells of a board
/// row-major, followed by whatever should fall in.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<Symbol>,
    fallback: Symbol,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Symbol>, fallback: Symbol) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }

    /// Script that deals `board` as the next fresh board
    pub fn from_board(board: &Board, fallback: Symbol) -> Self {
        Self::new(board.as_slice().iter().copied(), fallback)
    }

    /// Queue more symbols after the current script
    pub fn extend(&mut self, symbols: impl IntoIterator<Item = Symbol>) {
        self.script.extend(symbols);
    }

    /// Scripted symbols not yet drawn
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SymbolSource for ScriptedSource {
    fn draw(&mut self) -> Symbol {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config_with(weights: &[(u8, u32)], bonus: f64) -> CascadeConfig {
        CascadeConfig {
            symbol_weights: weights.iter().copied().collect::<BTreeMap<_, _>>(),
            bonus_probability: bonus,
            ..CascadeConfig::standard()
        }
    }

    #[test]
    fn test_zero_weights_force_symbol_zero() {
        let mut source = WeightedSource::seeded(&config_with(&[(3, 0), (5, 0)], 0.0), 1);
        for _ in 0..100 {
            assert_eq!(source.draw(), Symbol::regular(0).unwrap());
        }
    }

    #[test]
    fn test_certain_bonus() {
        let mut source = WeightedSource::seeded(&config_with(&[(0, 1)], 1.0), 2);
        assert!((0..100).all(|_| source.draw() == Symbol::BONUS));
    }

    #[test]
    fn test_single_weight_always_drawn() {
        let mut source = WeightedSource::seeded(&config_with(&[(4, 9)], 0.0), 3);
        assert!((0..200).all(|_| source.draw() == Symbol::regular(4).unwrap()));
    }

    #[test]
    fn test_weights_are_respected() {
        let mut source = WeightedSource::seeded(&config_with(&[(0, 3), (1, 1)], 0.0), 42);
        let draws = 40_000;
        let zeros = (0..draws)
            .filter(|_| source.draw() == Symbol::regular(0).unwrap())
            .count();
        let share = zeros as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.02, "share of symbol 0 = {share}");
    }

    #[test]
    fn test_seeded_is_repeatable() {
        let config = CascadeConfig::standard();
        let mut a = WeightedSource::seeded(&config, 7);
        let mut b = WeightedSource::seeded(&config, 7);
        let xs: Vec<_> = (0..64).map(|_| a.draw()).collect();
        let ys: Vec<_> = (0..64).map(|_| b.draw()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_scripted_then_fallback() {
        let one = Symbol::regular(1).unwrap();
        let mut source = ScriptedSource::new([one, Symbol::BONUS], Symbol::EMPTY);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.draw(), one);
        assert_eq!(source.draw(), Symbol::BONUS);
        assert_eq!(source.draw(), Symbol::EMPTY);
        assert_eq!(source.remaining(), 0);
    }
}
