//! Board drawing
//!
//! The simulation knows nothing about canvases. `draw` walks the grid and the
//! active piece and issues plain rectangle fills to a `RenderSink`; the wasm
//! front-end backs that with a 2D canvas context.

use crate::sim::{GameState, PieceSource, Tetromino};

/// Gap left around each block, in pixels
const BLOCK_INSET: f64 = 1.0;
/// Width of the bevel strips
const BEVEL: f64 = 2.0;

pub const HIGHLIGHT_COLOR: &str = "rgba(255, 255, 255, 0.3)";
pub const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.3)";

/// Minimal 2D drawing surface
pub trait RenderSink {
    /// Clear the whole surface
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
}

/// Pixel size of the board for a tile size
pub fn board_size<S: PieceSource>(state: &GameState<S>, tile_size: u32) -> (f64, f64) {
    let tile = f64::from(tile_size);
    (
        state.grid().width() as f64 * tile,
        state.grid().height() as f64 * tile,
    )
}

/// Draw one frame: clear, locked cells, then the active piece on top
pub fn draw<S: PieceSource>(state: &GameState<S>, tile_size: u32, sink: &mut impl RenderSink) {
    let (width, height) = board_size(state, tile_size);
    sink.clear(width, height);

    for (y, row) in state.grid().rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                draw_block(sink, x as i32, y as i32, *kind, tile_size);
            }
        }
    }

    if let Some(piece) = state.active_piece() {
        for (x, y) in piece.cells() {
            draw_block(sink, x, y, piece.kind, tile_size);
        }
    }
}

/// Filled square with a light top/left edge and a dark bottom/right edge
fn draw_block(sink: &mut impl RenderSink, x: i32, y: i32, kind: Tetromino, tile_size: u32) {
    // Cells still above the board are not drawn
    if x < 0 || y < 0 {
        return;
    }
    let tile = f64::from(tile_size);
    let size = tile - 2.0 * BLOCK_INSET;
    let px = f64::from(x) * tile + BLOCK_INSET;
    let py = f64::from(y) * tile + BLOCK_INSET;

    sink.fill_rect(px, py, size, size, kind.color());

    sink.fill_rect(px, py, size, BEVEL, HIGHLIGHT_COLOR);
    sink.fill_rect(px, py, BEVEL, size, HIGHLIGHT_COLOR);

    sink.fill_rect(px + size - BEVEL, py, BEVEL, size, SHADOW_COLOR);
    sink.fill_rect(px, py + size - BEVEL, size, BEVEL, SHADOW_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::PieceSequence;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear(f64, f64),
        Fill(f64, f64, f64, f64, String),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl RenderSink for Recorder {
        fn clear(&mut self, width: f64, height: f64) {
            self.ops.push(Op::Clear(width, height));
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
            self.ops.push(Op::Fill(x, y, width, height, color.to_string()));
        }
    }

    #[test]
    fn test_idle_board_only_clears() {
        let state = GameState::new(1);
        let mut rec = Recorder::default();
        draw(&state, 30, &mut rec);
        assert_eq!(rec.ops, vec![Op::Clear(300.0, 600.0)]);
    }

    #[test]
    fn test_block_has_bevel() {
        let mut state =
            GameState::with_source(Settings::default(), PieceSequence::repeat(Tetromino::O));
        state.grid_mut().set(2, 3, Some(Tetromino::Z));

        let mut rec = Recorder::default();
        draw(&state, 30, &mut rec);

        // clear + 5 fills for the single locked cell
        assert_eq!(rec.ops.len(), 6);
        assert_eq!(rec.ops[1], Op::Fill(61.0, 91.0, 28.0, 28.0, "#f00000".into()));
        assert_eq!(rec.ops[2], Op::Fill(61.0, 91.0, 28.0, 2.0, HIGHLIGHT_COLOR.into()));
        assert_eq!(rec.ops[3], Op::Fill(61.0, 91.0, 2.0, 28.0, HIGHLIGHT_COLOR.into()));
        assert_eq!(rec.ops[4], Op::Fill(87.0, 91.0, 2.0, 28.0, SHADOW_COLOR.into()));
        assert_eq!(rec.ops[5], Op::Fill(61.0, 117.0, 28.0, 2.0, SHADOW_COLOR.into()));
    }

    #[test]
    fn test_active_piece_drawn_after_grid() {
        let mut state =
            GameState::with_source(Settings::default(), PieceSequence::repeat(Tetromino::I));
        state.restart();
        state.grid_mut().set(0, 19, Some(Tetromino::L));

        let mut rec = Recorder::default();
        draw(&state, 30, &mut rec);

        // 1 locked cell + 4 piece cells, 5 fills each
        assert_eq!(rec.ops.len(), 1 + 5 * 5);
        let last_base = rec
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Fill(_, _, w, h, _) if *w == 28.0 && *h == 28.0))
            .last()
            .cloned();
        // Rightmost I cell at x = 6 on row 0
        assert_eq!(last_base, Some(Op::Fill(181.0, 1.0, 28.0, 28.0, "#00f0f0".into())));
    }
}
