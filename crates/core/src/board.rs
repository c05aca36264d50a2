//! Board module - the canonical occupancy grid
//!
//! The board is a 20x10 grid where each cell is empty or occupied with a visual
//! tag. Uses a flat array for cache locality and zero-allocation edits.
//! Coordinates: (row, col) where row ranges 0..19 (top to bottom) and col
//! ranges 0..9 (left to right).

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::types::{BlockTag, Cell, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices reported by [`Board::full_rows`]
pub type RowList = ArrayVec<usize, HEIGHT>;

/// The editor grid - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= HEIGHT as i8 || col < 0 || col >= WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Checked read of the cell at (row, col)
    pub fn get(&self, row: i8, col: i8) -> Result<Cell, BoardError> {
        Self::index(row, col)
            .map(|idx| self.cells[idx])
            .ok_or(BoardError::OutOfBounds { row, col })
    }

    /// Checked write of the cell at (row, col)
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> Result<(), BoardError> {
        let idx = Self::index(row, col).ok_or(BoardError::OutOfBounds { row, col })?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Checked occupancy query
    pub fn is_filled(&self, row: i8, col: i8) -> Result<bool, BoardError> {
        self.get(row, col).map(|cell| cell.is_some())
    }

    /// Unchecked read; `None` when out of bounds
    pub fn cell(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Unchecked write; returns false (and does nothing) when out of bounds
    pub fn try_set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Fully occupied row indices in ascending order
    pub fn full_rows(&self) -> RowList {
        (0..HEIGHT).filter(|&row| self.is_row_full(row)).collect()
    }

    pub fn full_row_count(&self) -> usize {
        (0..HEIGHT).filter(|&row| self.is_row_full(row)).count()
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> u32 {
        self.cells.iter().filter(|cell| cell.is_some()).count() as u32
    }

    /// Remove the given rows and let everything above fall into the gaps.
    ///
    /// Scans bottom-up with a write cursor that only moves when a surviving row
    /// is copied, so each row drops by the number of removed rows below it.
    /// Rows left uncovered at the top are cleared. Tags move with their rows.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }
        let mut write_row = HEIGHT;
        for read_row in (0..HEIGHT).rev() {
            if rows.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells
                    .copy_within(read_row * WIDTH..(read_row + 1) * WIDTH, write_row * WIDTH);
            }
        }
        self.cells[..write_row * WIDTH].fill(None);
    }

    /// Clear every full row and return the removed indices (ascending)
    pub fn clear_full_rows(&mut self) -> RowList {
        let rows = self.full_rows();
        self.remove_rows(&rows);
        rows
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Occupancy matrix, row-major
    pub fn occupancy(&self) -> [[bool; WIDTH]; HEIGHT] {
        let mut out = [[false; WIDTH]; HEIGHT];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, filled) in out_row.iter_mut().enumerate() {
                *filled = self.cells[row * WIDTH + col].is_some();
            }
        }
        out
    }

    /// Build a board from row-major cells
    pub fn from_rows(rows: &[[Option<BlockTag>; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (row, cells) in rows.iter().enumerate() {
            board.cells[row * WIDTH..(row + 1) * WIDTH].copy_from_slice(cells);
        }
        board
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
