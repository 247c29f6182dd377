//! The playfield grid
//!
//! Coordinates: (x, y) with x growing to the right and y growing downward.
//! Row 0 is the top. Pieces may hang above row 0 (negative y); those cells
//! only collide with the side walls.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, Tetromino};

/// A grid cell: empty, or the kind of the piece that filled it
pub type Cell = Option<Tetromino>;

/// Fixed-size matrix of cells, stored row by row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    /// Cell at (x, y), `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize)?.get(x as usize).copied()
    }

    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(Option::is_some))
    }

    /// Fill a whole row with one kind (test and demo helper)
    pub fn fill_row(&mut self, y: usize, kind: Tetromino) {
        if let Some(row) = self.rows.get_mut(y) {
            row.fill(Some(kind));
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Number of occupied cells in column `x`
    pub fn column_count(&self, x: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(x).is_some_and(Option::is_some))
            .count()
    }

    /// True if any cell of the piece leaves the grid sideways or through the
    /// floor, or overlaps a filled cell. Cells above row 0 are free.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            x < 0
                || x >= self.width as i32
                || y >= self.height as i32
                || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Write the piece into the grid. Cells above row 0 are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(piece.kind));
            }
        }
    }

    /// Remove every full row, scanning bottom to top. Each removal inserts an
    /// empty row at the top and re-checks the same index.
    ///
    /// Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.rows.remove(row);
                self.rows.insert(0, vec![None; self.width]);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Remove the lowest occupied cell of every column, then let each
    /// column's remaining cells fall to the floor keeping their order.
    ///
    /// Returns the number of cells removed.
    pub fn decrease_blocks(&mut self) -> usize {
        let mut removed = 0;

        for x in 0..self.width {
            if let Some(y) = (0..self.height).rev().find(|&y| self.rows[y][x].is_some()) {
                self.rows[y][x] = None;
                removed += 1;
            }
        }

        for x in 0..self.width {
            let mut write = self.height;
            for y in (0..self.height).rev() {
                if let Some(kind) = self.rows[y][x] {
                    write -= 1;
                    if write != y {
                        self.rows[write][x] = Some(kind);
                        self.rows[y][x] = None;
                    }
                }
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(10, 20);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.get(10, 0), None);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(9, 19), Some(None));
    }

    #[test]
    fn test_collision_with_walls_floor_and_cells() {
        let mut grid = Grid::new(10, 20);
        let piece = Piece::spawn(Tetromino::O, 10);
        assert!(!grid.collides(&piece));

        assert!(grid.collides(&Piece { x: -1, ..piece.clone() }));
        assert!(grid.collides(&Piece { x: 9, ..piece.clone() }));
        assert!(grid.collides(&Piece { y: 19, ..piece.clone() }));
        assert!(!grid.collides(&Piece { y: 18, ..piece.clone() }));

        grid.set(4, 1, Some(Tetromino::I));
        assert!(grid.collides(&piece));
    }

    #[test]
    fn test_cells_above_top_only_hit_walls() {
        let grid = Grid::new(10, 20);
        let piece = Piece {
            y: -2,
            ..Piece::spawn(Tetromino::I, 10)
        };
        assert!(!grid.collides(&piece));
        assert!(grid.collides(&Piece { x: 7, ..piece }));
    }

    #[test]
    fn test_merge_skips_cells_above_top() {
        let mut grid = Grid::new(10, 20);
        let piece = Piece {
            y: -1,
            ..Piece::spawn(Tetromino::T, 10)
        };
        grid.merge(&piece);
        // Only the bottom row (### at y = 0) lands
        assert_eq!(grid.occupied_count(), 3);
        assert!(grid.is_occupied(4, 0));
        assert!(grid.is_occupied(6, 0));
    }

    #[test]
    fn test_clear_full_rows_shifts_rows_above() {
        let mut grid = Grid::new(4, 5);
        grid.set(1, 2, Some(Tetromino::S));
        grid.fill_row(3, Tetromino::I);
        grid.fill_row(4, Tetromino::O);
        grid.set(2, 4, None);

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.row(0), Some(&[None; 4][..]));
        assert!(grid.is_occupied(1, 3));
        assert_eq!(grid.get(2, 4), Some(None));
        assert_eq!(grid.get(0, 4), Some(Some(Tetromino::O)));
    }

    #[test]
    fn test_clear_rechecks_same_index() {
        let mut grid = Grid::new(4, 4);
        grid.fill_row(1, Tetromino::J);
        grid.fill_row(2, Tetromino::L);
        grid.fill_row(3, Tetromino::T);
        grid.set(0, 0, Some(Tetromino::Z));

        assert_eq!(grid.clear_full_rows(), 3);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.get(0, 3), Some(Some(Tetromino::Z)));
    }

    #[test]
    fn test_decrease_blocks_removes_bottom_and_compacts() {
        let mut grid = Grid::new(3, 6);
        grid.set(0, 1, Some(Tetromino::I));
        grid.set(0, 3, Some(Tetromino::O));
        grid.set(0, 5, Some(Tetromino::T));

        assert_eq!(grid.decrease_blocks(), 1);
        assert_eq!(grid.column_count(0), 2);
        assert_eq!(grid.get(0, 4), Some(Some(Tetromino::I)));
        assert_eq!(grid.get(0, 5), Some(Some(Tetromino::O)));
        assert_eq!(grid.get(0, 3), Some(None));
    }

    #[test]
    fn test_decrease_blocks_one_per_column() {
        let mut grid = Grid::new(3, 4);
        grid.fill_row(3, Tetromino::S);
        grid.fill_row(2, Tetromino::Z);
        grid.set(1, 0, Some(Tetromino::L));

        assert_eq!(grid.decrease_blocks(), 3);
        assert_eq!(grid.occupied_count(), 4);
        assert_eq!(grid.row(3), Some(&[Some(Tetromino::Z); 3][..]));
        assert_eq!(grid.get(1, 2), Some(Some(Tetromino::L)));
    }

    #[test]
    fn test_decrease_blocks_on_empty_grid() {
        let mut grid = Grid::new(5, 5);
        assert_eq!(grid.decrease_blocks(), 0);
        assert_eq!(grid, Grid::new(5, 5));
    }
}
