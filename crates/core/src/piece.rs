//! Piece module - the matrix piece catalog and factory.
//!
//! Every piece is a small square matrix (2x2, 3x3 or 4x4) whose filled cells
//! all carry the piece's kind. The factory hands out independent copies of
//! the canonical templates; the only mutation after creation is the in-place
//! 90-degree rotation used by the rotation resolver.

use linefall_types::{Cell, PieceKind, Spin};

/// Canonical template: matrix size and the filled (x, y) cells.
fn template(kind: PieceKind) -> (u8, &'static [(u8, u8)]) {
    match kind {
        PieceKind::I => (4, &[(1, 0), (1, 1), (1, 2), (1, 3)]),
        PieceKind::L => (3, &[(2, 0), (0, 1), (1, 1), (2, 1)]),
        PieceKind::J => (3, &[(0, 0), (0, 1), (1, 1), (2, 1)]),
        PieceKind::O => (2, &[(0, 0), (1, 0), (0, 1), (1, 1)]),
        PieceKind::T => (3, &[(1, 0), (0, 1), (1, 1), (2, 1)]),
        PieceKind::S => (3, &[(1, 0), (2, 0), (0, 1), (1, 1)]),
        PieceKind::Z => (3, &[(0, 0), (1, 0), (1, 1), (2, 1)]),
    }
}

/// A piece matrix. The backing array is always 4x4; only the top-left
/// `size` x `size` corner is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    size: u8,
    cells: [[Cell; 4]; 4],
}

impl Piece {
    /// Create a fresh, independent copy of the canonical shape.
    pub fn of(kind: PieceKind) -> Self {
        let (size, filled) = template(kind);
        let mut cells = [[None; 4]; 4];
        for &(x, y) in filled {
            cells[y as usize][x as usize] = Some(kind);
        }
        Self { kind, size, cells }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Matrix width (and height).
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell at matrix-local (x, y). Out-of-matrix coordinates are empty.
    pub fn cell(&self, x: u8, y: u8) -> Cell {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells[y as usize][x as usize]
    }

    /// Iterate the filled matrix-local coordinates.
    pub fn filled(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        let n = self.size;
        (0..n)
            .flat_map(move |y| (0..n).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cells[y as usize][x as usize].is_some())
    }

    /// Rotate 90 degrees in place: transpose, then reverse each row
    /// (clockwise) or reverse the row order (counter-clockwise).
    pub fn rotate(&mut self, spin: Spin) {
        let n = self.size as usize;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
        match spin {
            Spin::Cw => {
                for row in &mut self.cells[..n] {
                    row[..n].reverse();
                }
            }
            Spin::Ccw => self.cells[..n].reverse(),
        }
    }
}
