//! Sweep module - detects and clears completed rows after a lock.

use linefall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::board::Board;

/// Visual-feedback sink for cleared cells.
///
/// The sink is opaque to the engine: one fire-and-forget call per cleared
/// cell, carrying the cell's column, row and settled kind.
pub trait EffectSink {
    fn burst(&mut self, x: u8, y: u8, kind: PieceKind);
}

/// Sink that discards all effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl EffectSink for NoEffects {
    fn burst(&mut self, _x: u8, _y: u8, _kind: PieceKind) {}
}

/// Scan rows bottom-to-top and clear every complete one.
///
/// Each complete row emits one `burst` per cell before being removed; an
/// empty row is inserted at the top so the row count stays constant. After a
/// removal the same row index is re-examined, since the rows above have
/// shifted down. Returns the number of rows cleared in this sweep.
pub fn sweep(board: &mut Board, fx: &mut dyn EffectSink) -> u32 {
    let mut cleared = 0;
    let mut y = BOARD_HEIGHT as usize - 1;
    loop {
        if board.row_full(y) {
            for x in 0..BOARD_WIDTH {
                if let Some(kind) = board.kind_at(x as i8, y as i8) {
                    fx.burst(x, y as u8, kind);
                }
            }
            board.remove_row(y);
            cleared += 1;
        } else if y == 0 {
            break;
        } else {
            y -= 1;
        }
    }
    cleared
}
