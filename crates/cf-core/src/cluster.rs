//! Cluster detection
//!
//! A cluster is a maximal 4-connected group of at least [`MIN_CLUSTER_SIZE`]
//! cells holding the same regular symbol. Empty cells and the bonus symbol
//! never cluster.

use std::collections::VecDeque;

use crate::grid::{Board, Grid, Position};
use crate::symbols::Symbol;

/// Smallest connected group that pays
pub const MIN_CLUSTER_SIZE: usize = 5;

/// One connected group of a single regular symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub symbol: Symbol,
    /// Cells in traversal order; the first entry is the root found by the scan
    pub cells: Vec<Position>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Every cell still holds the cluster's symbol on `board`
    pub fn matches(&self, board: &Board) -> bool {
        self.cells.iter().all(|&p| board.get(p) == Some(self.symbol))
    }
}

/// Find every cluster on the board
///
/// Cells are scanned row-major; each unvisited regular cell roots a
/// breadth-first flood over same-symbol neighbours. Components smaller than
/// [`MIN_CLUSTER_SIZE`] are discarded. The result is ordered by root cell, so
/// clusters come out in row-major order of their first cell.
pub fn find_clusters(board: &Board) -> Vec<Cluster> {
    let mut visited = Grid::filled(false);
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for (root, symbol) in board.iter() {
        if visited[root] || !symbol.is_regular() {
            continue;
        }

        visited[root] = true;
        queue.push_back(root);
        let mut component = Vec::new();

        while let Some(cur) = queue.pop_front() {
            component.push(cur);
            for next in cur.neighbors() {
                if !visited[next] && board[next] == symbol {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        if component.len() >= MIN_CLUSTER_SIZE {
            log::debug!(
                "Found cluster: symbol={} size={} root={}",
                symbol,
                component.len(),
                root
            );
            clusters.push(Cluster {
                symbol,
                cells: component,
            });
        }
    }

    clusters
}
