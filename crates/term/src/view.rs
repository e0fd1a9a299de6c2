//! GameView: maps a `GameSession` into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use linefall_core::{GameSession, Piece};
use linefall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::bursts::BurstField;
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Out-of-board context shown around the game: who is signed in and the
/// latest backend notice (shown as a dismissible overlay).
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    pub username: Option<&'a str>,
    pub notice: Option<&'a str>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns (2 compensates for glyph aspect).
    cell_w: u16,
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn render(
        &self,
        session: &GameSession,
        bursts: &BurstField,
        viewport: Viewport,
        hud: Hud<'_>,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle::plain(Rgb::new(80, 80, 90), Rgb::new(16, 16, 24));
        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Settled cells.
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(kind) = session.board().kind_at(x, y) {
                    self.draw_cell(&mut fb, start_x, start_y, x as u16, y as u16, kind);
                }
            }
        }

        // Ghost outline, then the active piece over it.
        if !session.paused() {
            if let (Some(player), Some(ghost_y)) = (session.player(), session.ghost_y()) {
                let ghost = CellStyle {
                    dim: true,
                    ..CellStyle::plain(Rgb::new(140, 140, 140), Rgb::new(16, 16, 24))
                };
                for (dx, dy) in player.piece.filled() {
                    let x = player.x + dx as i8;
                    let y = ghost_y + dy as i8;
                    if on_board(x, y) {
                        self.fill_cell(&mut fb, start_x, start_y, x as u16, y as u16, '░', ghost);
                    }
                }
                for (dx, dy) in player.piece.filled() {
                    let x = player.x + dx as i8;
                    let y = player.y + dy as i8;
                    if on_board(x, y) {
                        self.draw_cell(&mut fb, start_x, start_y, x as u16, y as u16, player.piece.kind());
                    }
                }
            }
        }

        // Clear-burst flashes on top.
        for burst in bursts.iter() {
            let style = CellStyle {
                bold: true,
                ..CellStyle::plain(kind_color(burst.kind), Rgb::new(16, 16, 24))
            };
            self.fill_cell(
                &mut fb,
                start_x,
                start_y,
                burst.x as u16,
                burst.y as u16,
                '✦',
                style,
            );
        }

        self.draw_side_panel(&mut fb, session, viewport, start_x, start_y, frame_w, hud);

        if session.paused() {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if session.game_over() {
            self.draw_game_over(&mut fb, session, start_x, start_y, frame_w, frame_h);
        }
        if let Some(notice) = hud.notice {
            self.draw_notice(&mut fb, viewport, notice);
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, sx: u16, sy: u16, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(kind_color(kind), Rgb::new(16, 16, 24))
        };
        self.fill_cell(fb, sx, sy, x, y, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        sx: u16,
        sy: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = sx + 1 + cell_x * self.cell_w;
        let py = sy + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        hud: Hud<'_>,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let stats = session.stats();

        let mut y = start_y;
        if let Some(username) = hud.username {
            fb.put_str(panel_x, y, username, value);
            y += 2;
        }
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_str(panel_x, y + 1, &stats.score.to_string(), value);
        y += 3;
        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_str(panel_x, y + 1, &stats.level.to_string(), value);
        y += 3;
        fb.put_str(panel_x, y, "LINES", label);
        fb.put_str(panel_x, y + 1, &stats.lines.to_string(), value);
        y += 3;
        fb.put_str(panel_x, y, "LPM", label);
        fb.put_str(panel_x, y + 1, &lines_per_minute(stats).to_string(), value);
        y += 3;

        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        if let Some(piece) = session.hold_piece() {
            self.draw_preview(fb, piece, panel_x, y);
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
        y += 5;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for piece in session.queue() {
            if y + 4 >= viewport.height {
                break;
            }
            self.draw_preview(fb, piece, panel_x, y);
            y += 5;
        }
    }

    /// Draw a piece matrix as a mini grid, one row of text per matrix row.
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: &Piece, x: u16, y: u16) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(kind_color(piece.kind()), Rgb::new(0, 0, 0))
        };
        for (cx, cy) in piece.filled() {
            fb.put_str(
                x + (cx as u16) * 2,
                y + cy as u16,
                "██",
                style,
            );
        }
    }

    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let mid_y = start_y + frame_h / 2;
        let stats = session.stats();
        self.draw_centered(fb, start_x, frame_w, mid_y.saturating_sub(3), "GAME OVER");
        self.draw_centered(
            fb,
            start_x,
            frame_w,
            mid_y.saturating_sub(1),
            &format!("SCORE {}", stats.score),
        );
        let breakdown = [
            ("1 LINE", stats.breakdown.singles),
            ("2 LINES", stats.breakdown.doubles),
            ("3 LINES", stats.breakdown.triples),
            ("TETRIS", stats.breakdown.tetris),
        ];
        for (i, (name, count)) in breakdown.iter().enumerate() {
            self.draw_centered(
                fb,
                start_x,
                frame_w,
                mid_y + 1 + i as u16,
                &format!("{name:<7} {count}"),
            );
        }
        self.draw_centered(fb, start_x, frame_w, mid_y + 6, "r: retry  q: quit");
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        self.draw_centered(fb, start_x, frame_w, start_y + frame_h / 2, text);
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, start_x: u16, frame_w: u16, y: u16, text: &str) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
        };
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }

    /// Backend notices render as a bottom-line banner until dismissed.
    fn draw_notice(&self, fb: &mut FrameBuffer, viewport: Viewport, notice: &str) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(0, 0, 0), Rgb::new(220, 220, 120))
        };
        let y = viewport.height.saturating_sub(1);
        fb.fill_rect(0, y, viewport.width, 1, ' ', style);
        // Single line; any key dismisses it.
        fb.put_str(1, y, notice, style);
    }
}

const PANEL_W: u16 = 14;

fn lines_per_minute(stats: &linefall_core::SessionStats) -> u32 {
    if stats.elapsed_ms == 0 {
        return 0;
    }
    (u64::from(stats.lines) * 60_000 / stats.elapsed_ms) as u32
}

fn on_board(x: i8, y: i8) -> bool {
    x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
}

/// Piece colors, matching the web palette.
fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0x00, 0xf2, 0xea),
        PieceKind::L => Rgb::new(0xf0, 0xf0, 0x00),
        PieceKind::J => Rgb::new(0xa0, 0x00, 0xf0),
        PieceKind::O => Rgb::new(0x00, 0xff, 0x00),
        PieceKind::T => Rgb::new(0xff, 0x00, 0x50),
        PieceKind::S => Rgb::new(0x00, 0x55, 0xff),
        PieceKind::Z => Rgb::new(0xff, 0xaa, 0x00),
    }
}
