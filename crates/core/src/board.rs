//! Board module - manages the game grid
//!
//! The board is a 10x22 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom).
//! Rows 0 and 1 are hidden; pieces may also poke above row 0 (negative y),
//! where nothing is ever stored.

use arrayvec::ArrayVec;

use crate::pieces::get_shape;
use crate::types::{cell_code, Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a single mino may sit at (x, y).
    ///
    /// Columns must be on the board and rows below the floor are rejected.
    /// Rows above the top are always open; everything else must be empty.
    #[inline]
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether a piece fits with its pivot at (x, y). No side effects.
    pub fn is_placement_legal(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        get_shape(kind, rotation)
            .iter()
            .all(|&(dx, dy)| self.is_open(x + dx, y + dy))
    }

    /// Write a piece into the grid.
    ///
    /// Minos above the top row are dropped. Placement legality is the caller's
    /// responsibility; out-of-range minos are ignored rather than wrapped.
    pub fn merge(&mut self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        for &(dx, dy) in get_shape(kind, rotation).iter() {
            let py = y + dy;
            if py >= 0 {
                self.set(x + dx, py, Some(kind));
            }
        }
    }

    /// Copy of this board with a piece merged in; `self` is untouched.
    pub fn with_piece(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        let mut merged = self.clone();
        merged.merge(kind, rotation, x, y);
        merged
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer algorithm with zero-allocation
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                // A piece spans at most four rows, so only four can ever fill at once.
                let _ = cleared_rows.try_push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Everything above the compacted stack is new empty space
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Write the board as grid codes (0 empty, 1-7 piece kinds)
    pub fn write_u8_grid(
        &self,
        out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    ) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, &cell) in dst.iter_mut().zip(src) {
                *d = cell_code(cell);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build from text rows, bottom-aligned. `.` is empty, any other byte is a filled cell.
    ///
    /// Rows longer than the board are truncated; missing rows at the top stay empty.
    ///
    /// ```
    /// use srs_tetris_core::Board;
    ///
    /// let board = Board::from_rows(&["#########."]);
    /// assert!(board.is_occupied(0, 21));
    /// assert!(!board.is_occupied(9, 21));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let height = BOARD_HEIGHT as usize;
        let skip = rows.len().saturating_sub(height);
        let top = height - (rows.len() - skip);
        for (i, row) in rows.iter().skip(skip).enumerate() {
            let y = (top + i) as i8;
            for (x, byte) in row.bytes().take(BOARD_WIDTH as usize).enumerate() {
                if byte != b'.' {
                    board.set(x as i8, y, Some(PieceKind::O));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
