//! Tetromino shapes and the active piece
//!
//! A piece is never rotated or moved in place: every transformation builds a
//! candidate that the caller commits only when it fits the grid.

use serde::{Deserialize, Serialize};

/// The seven tetromino kinds. Also serves as the color identifier of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tetromino {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::S,
        Tetromino::Z,
        Tetromino::J,
        Tetromino::L,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Fill color used by the renderer
    pub fn color(&self) -> &'static str {
        match self {
            Tetromino::I => "#00f0f0", // cyan
            Tetromino::O => "#f0f000", // yellow
            Tetromino::T => "#a000f0", // purple
            Tetromino::S => "#00f000", // green
            Tetromino::Z => "#f00000", // red
            Tetromino::J => "#0000f0", // blue
            Tetromino::L => "#f0a000", // orange
        }
    }

    /// Spawn orientation
    pub fn shape(&self) -> Shape {
        let rows: &[&[u8]] = match self {
            Tetromino::I => &[&[1, 1, 1, 1]],
            Tetromino::O => &[&[1, 1], &[1, 1]],
            Tetromino::T => &[&[0, 1, 0], &[1, 1, 1]],
            Tetromino::S => &[&[1, 1, 0], &[0, 1, 1]],
            Tetromino::Z => &[&[0, 1, 1], &[1, 1, 0]],
            Tetromino::J => &[&[1, 0, 0], &[1, 1, 1]],
            Tetromino::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        Shape::from_bits(rows)
    }
}

/// Occupancy matrix of a piece, indexed `[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// `None` unless every row has the same length
    pub fn new(rows: Vec<Vec<bool>>) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self { rows })
    }

    fn from_bits(rows: &[&[u8]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|&b| b != 0).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Occupied cells as (col, row) offsets, row-major
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Quarter turn: transpose with column reversal.
    ///
    /// Row `i` of the result is column `w - 1 - i` of the source, read top to
    /// bottom.
    pub fn rotated(&self) -> Shape {
        let w = self.width();
        let rows = (0..w)
            .map(|i| {
                self.rows
                    .iter()
                    .map(|row| row.get(w - 1 - i).copied().unwrap_or(false))
                    .collect()
            })
            .collect();
        Shape { rows }
    }
}

/// The falling piece: shape, identity and board-relative position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: Tetromino,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// New piece horizontally centered on row 0
    pub fn spawn(kind: Tetromino, board_width: usize) -> Self {
        let shape = kind.shape();
        let x = (board_width / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            x,
            y: 0,
        }
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Piece {
        Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    pub fn rotated(&self) -> Piece {
        Piece {
            shape: self.shape.rotated(),
            ..self.clone()
        }
    }
}
