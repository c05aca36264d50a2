//! BoardView: projects editor state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{piece_tag, ChangeListener, Editor};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::theme::{palette_for_level, Palette};
use crate::types::{BoardLayout, Coord, DrawMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Host state shown next to the board.
#[derive(Debug, Clone, Copy)]
pub struct PanelView<'a> {
    pub piece: PieceKind,
    pub rotation: u8,
    pub speed_level: u32,
    pub lines: u32,
    /// Hover places the current piece instead of editing cells
    pub piece_mode: bool,
    /// Sticky column fill is on
    pub column_lock: bool,
    pub warnings: &'a [&'a str],
    pub status: &'a str,
}

impl Default for PanelView<'_> {
    fn default() -> Self {
        Self {
            piece: PieceKind::T,
            rotation: 0,
            speed_level: 18,
            lines: 30,
            piece_mode: false,
            column_lock: false,
            warnings: &[],
            status: "",
        }
    }
}

const PLAYFIELD_BG: Rgb = Rgb::new(24, 24, 32);
const EMPTY: Style = Style::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const LABEL: Style = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const VALUE: Style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const WARNING: Style = Style::new(Rgb::new(250, 180, 60), Rgb::new(0, 0, 0)).bold();
const HOVER: Style = Style::new(Rgb::new(230, 230, 230), PLAYFIELD_BG);

const MIN_PANEL_WIDTH: u16 = 14;

/// Board renderer with a fixed cell aspect.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    cell_w: u16,
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Screen placement of the board for a viewport. The input mapper uses the
    /// same layout to translate mouse positions.
    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w + MIN_PANEL_WIDTH) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        BoardLayout {
            origin_x: start_x + 1,
            origin_y: start_y + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into<L: ChangeListener>(
        &self,
        editor: &Editor<L>,
        panel: &PanelView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let layout = self.layout(viewport);
        let palette = palette_for_level(editor.level());
        let (frame_w, frame_h) = self.frame_size();
        self.draw_border(fb, layout.origin_x - 1, layout.origin_y - 1, frame_w, frame_h);

        let board = editor.board();
        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                match board.cell(row, col).flatten() {
                    Some(tag) => {
                        let style = Style::new(palette.color(tag), PLAYFIELD_BG);
                        self.fill_cell(fb, &layout, Coord::new(row, col), '█', style);
                    }
                    None => self.fill_cell(fb, &layout, Coord::new(row, col), '·', EMPTY),
                }
            }
        }

        if !panel.piece_mode {
            self.draw_hover(fb, &layout, editor, panel.column_lock);
        }
        self.draw_preview(fb, &layout, editor, palette);
        self.draw_side_panel(fb, editor, panel, viewport, &layout, frame_w);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<L: ChangeListener>(
        &self,
        editor: &Editor<L>,
        panel: &PanelView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(editor, panel, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &BoardLayout, at: Coord, ch: char, style: Style) {
        if !at.in_bounds() {
            return;
        }
        let px = layout.origin_x + at.col as u16 * self.cell_w;
        let py = layout.origin_y + at.row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Cells the pointer would touch: the cursor cell, or the column from the
    /// cursor down when column fill is in effect.
    fn draw_hover<L: ChangeListener>(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        editor: &Editor<L>,
        column_lock: bool,
    ) {
        let Some(cursor) = editor.cursor() else {
            return;
        };
        let mode = match editor.draw_mode() {
            DrawMode::Paint if column_lock && !editor.is_stroke_active() => DrawMode::Column,
            mode => mode,
        };
        match mode {
            DrawMode::Column => {
                for row in cursor.row..BOARD_HEIGHT as i8 {
                    self.fill_cell(fb, layout, Coord::new(row, cursor.col), '▒', HOVER);
                }
            }
            DrawMode::Erase => self.fill_cell(fb, layout, cursor, '╳', HOVER),
            DrawMode::Paint => self.fill_cell(fb, layout, cursor, '░', HOVER),
        }
    }

    fn draw_preview<L: ChangeListener>(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        editor: &Editor<L>,
        palette: &Palette,
    ) {
        let Some(preview) = editor.preview() else {
            return;
        };
        let style = Style::new(palette.color(piece_tag(preview.kind)), PLAYFIELD_BG).bold();
        for at in editor.preview_cells() {
            self.fill_cell(fb, layout, at, '▓', style);
        }
    }

    fn draw_side_panel<L: ChangeListener>(
        &self,
        fb: &mut FrameBuffer,
        editor: &Editor<L>,
        panel: &PanelView<'_>,
        viewport: Viewport,
        layout: &BoardLayout,
        frame_w: u16,
    ) {
        let panel_x = (layout.origin_x - 1).saturating_add(frame_w).saturating_add(2);
        if panel_x.saturating_add(MIN_PANEL_WIDTH) > viewport.width {
            return;
        }

        let value_x = panel_x + 7;
        let mut y = layout.origin_y - 1;

        fb.put_str(panel_x, y, "PIECE", LABEL);
        let x = fb.put_str(value_x, y, panel.piece.as_str(), VALUE);
        let x = fb.put_str(x + 1, y, "r", VALUE);
        fb.put_u32(x, y, u32::from(panel.rotation), VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LEVEL", LABEL);
        fb.put_u32(value_x, y, editor.level(), VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "SPEED", LABEL);
        fb.put_u32(value_x, y, panel.speed_level, VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LINES", LABEL);
        fb.put_u32(value_x, y, panel.lines, VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "CELLS", LABEL);
        fb.put_u32(value_x, y, editor.board().filled_count(), VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "UNDO", LABEL);
        fb.put_u32(value_x, y, editor.history_len().saturating_sub(1) as u32, VALUE);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "MODE", LABEL);
        fb.put_str(value_x, y, mode_label(editor, panel), VALUE);
        y = y.saturating_add(1);

        y = y.saturating_add(1);
        for warning in panel.warnings {
            if y >= viewport.height {
                return;
            }
            fb.put_str(panel_x, y, warning, WARNING);
            y = y.saturating_add(1);
        }
        if !panel.status.is_empty() && y < viewport.height {
            fb.put_str(panel_x, y, panel.status, VALUE.dim());
        }
    }
}

fn mode_label<L: ChangeListener>(editor: &Editor<L>, panel: &PanelView<'_>) -> &'static str {
    if panel.piece_mode {
        return "PIECE";
    }
    match editor.draw_mode() {
        DrawMode::Paint if panel.column_lock && !editor.is_stroke_active() => "COLUMN",
        DrawMode::Paint => "PAINT",
        DrawMode::Erase => "ERASE",
        DrawMode::Column => "COLUMN",
    }
}
