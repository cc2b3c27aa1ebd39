//! Fixed 7×7 grids
//!
//! Cells are stored flat in row-major order. Row 0 is the top of the board,
//! so symbols fall towards higher row numbers.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::symbols::Symbol;

/// Board height
pub const ROWS: usize = 7;
/// Board width
pub const COLS: usize = 7;
/// Total cells
pub const CELLS: usize = ROWS * COLS;

/// Cell coordinates (row 0 = top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index, `None` when off the board
    pub fn index(self) -> Option<usize> {
        (self.row < ROWS && self.col < COLS).then_some(self.row * COLS + self.col)
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELLS).then_some(Self::new(index / COLS, index % COLS))
    }

    /// Every position in row-major scan order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELLS).map(|i| Self::new(i / COLS, i % COLS))
    }

    /// 4-connected neighbours that lie on the board (right, down, left, up)
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        const DIRS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
        DIRS.into_iter().filter_map(move |(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            Position::new(row, col).index().map(|_| Position::new(row, col))
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// A 7×7 grid of plain values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    cells: [T; CELLS],
}

impl<T: Copy> Grid<T> {
    /// Grid with every cell set to `value`
    pub const fn filled(value: T) -> Self {
        Self {
            cells: [value; CELLS],
        }
    }

    /// Build from nested rows (row 0 first)
    pub fn from_rows(rows: [[T; COLS]; ROWS]) -> Self {
        let mut cells = [rows[0][0]; CELLS];
        for (r, row) in rows.iter().enumerate() {
            cells[r * COLS..(r + 1) * COLS].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Bounds-checked read
    pub fn get(&self, pos: Position) -> Option<T> {
        pos.index().map(|i| self.cells[i])
    }

    /// Bounds-checked write access
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        pos.index().map(move |i| &mut self.cells[i])
    }

    /// Overwrite every cell
    pub fn fill(&mut self, value: T) {
        self.cells = [value; CELLS];
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(COLS)
    }

    /// `(position, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        Position::all().zip(self.cells.iter().copied())
    }

    /// Copy of one column, top to bottom
    pub fn column(&self, col: usize) -> [T; ROWS] {
        std::array::from_fn(|row| self.cells[row * COLS + col])
    }

    /// Flat row-major view
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

impl<T: Copy + Default> Default for Grid<T> {
    fn default() -> Self {
        Self::filled(T::default())
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        match pos.index() {
            Some(i) => &self.cells[i],
            None => panic!("position {pos} is off the {ROWS}x{COLS} grid"),
        }
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, pos: Position) -> &mut T {
        match pos.index() {
            Some(i) => &mut self.cells[i],
            None => panic!("position {pos} is off the {ROWS}x{COLS} grid"),
        }
    }
}

// Serialized as ROWS arrays of COLS values, the shape clients render.
impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells.chunks(COLS))
    }
}

impl<'de, T: Deserialize<'de> + Copy> Deserialize<'de> for Grid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows: Vec<Vec<T>> = Vec::deserialize(deserializer)?;
        if rows.len() != ROWS || rows.iter().any(|r| r.len() != COLS) {
            return Err(D::Error::custom(format!("expected a {ROWS}x{COLS} grid")));
        }
        let flat: Vec<T> = rows.into_iter().flatten().collect();
        let cells: [T; CELLS] = flat
            .try_into()
            .map_err(|_| D::Error::custom("grid cell count mismatch"))?;
        Ok(Self { cells })
    }
}

/// The symbol board
pub type Board = Grid<Symbol>;

impl Grid<Symbol> {
    /// Board with every cell empty
    pub const fn empty() -> Self {
        Self::filled(Symbol::EMPTY)
    }

    /// Number of cells holding `symbol`
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&s| s == symbol).count()
    }

    /// Scatters on the board
    pub fn scatter_count(&self) -> usize {
        self.count(Symbol::BONUS)
    }

    /// True when any cell is still empty
    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(|s| s.is_empty())
    }
}

impl fmt::Display for Grid<Symbol> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
