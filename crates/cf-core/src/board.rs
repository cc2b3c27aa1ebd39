//! Board generation, collapse and refill

use crate::grid::{Board, COLS, Position, ROWS};
use crate::source::SymbolSource;
use crate::symbols::Symbol;

/// Overwrite every cell, row-major, from `source`
pub fn fill(board: &mut Board, source: &mut impl SymbolSource) {
    for pos in Position::all() {
        board[pos] = source.draw();
    }
}

/// Fresh board from `source`
pub fn generate(source: &mut impl SymbolSource) -> Board {
    let mut board = Board::empty();
    fill(&mut board, source);
    board
}

/// Drop the remaining symbols of one column to the bottom, keeping their
/// order; vacated cells at the top become empty
pub fn collapse_column(board: &mut Board, col: usize) {
    let column = board.column(col);
    let stack: Vec<Symbol> = column.into_iter().filter(|s| !s.is_empty()).collect();
    let gap = ROWS - stack.len();

    for row in 0..gap {
        board[Position::new(row, col)] = Symbol::EMPTY;
    }
    for (i, &symbol) in stack.iter().enumerate() {
        board[Position::new(gap + i, col)] = symbol;
    }
}

/// Fill every empty cell of one column, top to bottom, from `source`
pub fn refill_column(board: &mut Board, col: usize, source: &mut impl SymbolSource) {
    for row in 0..ROWS {
        let pos = Position::new(row, col);
        if board[pos].is_empty() {
            board[pos] = source.draw();
        }
    }
}

/// Collapse then refill each column, left to right
pub fn collapse_and_refill(board: &mut Board, source: &mut impl SymbolSource) {
    for col in 0..COLS {
        collapse_column(board, col);
        refill_column(board, col, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;

    fn sym(id: u8) -> Symbol {
        Symbol::regular(id).unwrap()
    }

    #[test]
    fn test_fill_is_row_major() {
        let script: Vec<Symbol> = (0..49).map(|i| sym((i % 7) as u8)).collect();
        let mut source = ScriptedSource::new(script, Symbol::EMPTY);
        let board = generate(&mut source);
        assert_eq!(board[Position::new(0, 3)], sym(3));
        assert_eq!(board[Position::new(1, 0)], sym(0));
        assert!(!board.has_empty());
    }

    #[test]
    fn test_collapse_keeps_order() {
        let mut board = Board::filled(sym(0));
        // column 2 top->bottom: 1 . 2 . 3 4 .
        let column = [sym(1), Symbol::EMPTY, sym(2), Symbol::EMPTY, sym(3), sym(4), Symbol::EMPTY];
        for (row, &s) in column.iter().enumerate() {
            board[Position::new(row, 2)] = s;
        }
        collapse_column(&mut board, 2);
        assert_eq!(
            board.column(2),
            [Symbol::EMPTY, Symbol::EMPTY, Symbol::EMPTY, sym(1), sym(2), sym(3), sym(4)]
        );
        assert_eq!(board.column(1), [sym(0); 7]);
    }

    #[test]
    fn test_refill_draws_column_by_column() {
        let mut board = Board::filled(sym(0));
        board[Position::new(6, 1)] = Symbol::EMPTY;
        board[Position::new(0, 4)] = Symbol::EMPTY;
        board[Position::new(3, 4)] = Symbol::EMPTY;

        let mut source = ScriptedSource::new([sym(5), sym(6), Symbol::BONUS], Symbol::EMPTY);
        collapse_and_refill(&mut board, &mut source);

        // column 1: single gap moved to the top, gets the first draw
        assert_eq!(board[Position::new(0, 1)], sym(5));
        // column 4: two gaps at rows 0 and 1
        assert_eq!(board[Position::new(0, 4)], sym(6));
        assert_eq!(board[Position::new(1, 4)], Symbol::BONUS);
        assert!(!board.has_empty());
        assert_eq!(source.remaining(), 0);
    }
}
