//! Editor - the edit engine, placement engine and undo history behind one owner.
//!
//! All board mutation goes through [`Editor`], which keeps the history and the
//! change listener consistent with the grid:
//!
//! - **Strokes**: press/move/release pointer input paints, erases or column
//!   fills cells, interpolating fast drags with the line rasterizer.
//! - **Placement**: stamps a piece, clears full rows and compacts the rest.
//! - **Undo**: rewinds to the previous committed snapshot.
//!
//! Exactly one snapshot is taken per committed mutation (stroke release,
//! placement, clear); hover, preview and in-progress drags never touch the
//! history.
//!
//! # Example
//!
//! ```
//! use tetris_editor_core::{Editor, EventLog};
//! use tetris_editor_core::types::{ChangeReason, Coord};
//!
//! let mut editor = Editor::new(EventLog::new());
//! editor.pointer_down(Coord::new(19, 0), false);
//! editor.pointer_move(Some(Coord::new(19, 4)));
//! editor.pointer_up();
//!
//! assert_eq!(editor.board().filled_count(), 5);
//! assert_eq!(editor.listener().reasons().last(), Some(&ChangeReason::Release));
//!
//! editor.undo();
//! assert!(editor.board().is_empty());
//! ```

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use crate::board::Board;
use crate::config::EditorConfig;
use crate::history::History;
use crate::line::line;
use crate::notify::{ChangeEvent, ChangeListener};
use crate::pieces::{footprint, piece_tag};
use crate::rng::SimpleRng;
use crate::types::{Coord, DrawMode, EditorInput, Placement, PieceKind, BOARD_HEIGHT, HISTORY_CAP};

/// Stroke state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// No button held
    Idle,
    /// Button held; the mode is fixed for the whole stroke
    Active(DrawMode),
}

/// Transient hover highlight of a piece footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePreview {
    pub kind: PieceKind,
    pub placement: Placement,
}

pub struct Editor<L: ChangeListener> {
    board: Board,
    history: History,
    listener: L,
    rng: SimpleRng,
    cursor: Option<Coord>,
    stroke: Stroke,
    modifier_held: bool,
    preview: Option<PiecePreview>,
    level: u32,
}

impl<L: ChangeListener> Editor<L> {
    /// Empty board with the default history cap
    pub fn new(listener: L) -> Self {
        Self::with_history_cap(listener, HISTORY_CAP, 1)
    }

    pub fn with_config(listener: L, config: &EditorConfig) -> Self {
        Self::with_history_cap(listener, config.history_cap, config.seed)
    }

    pub fn with_history_cap(listener: L, cap: usize, seed: u32) -> Self {
        let board = Board::new();
        let history = History::new(cap, &board);
        Self {
            board,
            history,
            listener,
            rng: SimpleRng::new(seed),
            cursor: None,
            stroke: Stroke::Idle,
            modifier_held: false,
            preview: None,
            level: 18,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn cursor(&self) -> Option<Coord> {
        self.cursor
    }

    pub fn stroke(&self) -> Stroke {
        self.stroke
    }

    pub fn is_stroke_active(&self) -> bool {
        matches!(self.stroke, Stroke::Active(_))
    }

    /// Mode of the running stroke, or the mode a press would start with
    /// as far as modifiers are concerned (hover affordance).
    pub fn draw_mode(&self) -> DrawMode {
        match self.stroke {
            Stroke::Active(mode) => mode,
            Stroke::Idle if self.modifier_held => DrawMode::Column,
            Stroke::Idle => DrawMode::Paint,
        }
    }

    pub fn modifier_held(&self) -> bool {
        self.modifier_held
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.is_stroke_active() && self.history.can_undo()
    }

    pub fn preview(&self) -> Option<PiecePreview> {
        self.preview
    }

    /// In-bounds cells of the current piece preview
    pub fn preview_cells(&self) -> ArrayVec<Coord, 4> {
        match self.preview {
            Some(p) => footprint(p.kind, p.placement)
                .into_iter()
                .filter(Coord::in_bounds)
                .collect(),
            None => ArrayVec::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Select the display level. Cosmetic: only the renderer's palette changes.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    /// Route one input event
    pub fn handle(&mut self, input: EditorInput) {
        match input {
            EditorInput::PointerDown { cell, modifier } => self.pointer_down(cell, modifier),
            EditorInput::PointerMove { cell } => self.pointer_move(cell),
            EditorInput::PointerUp => self.pointer_up(),
            EditorInput::PointerLeave => self.pointer_leave(),
            EditorInput::ModifierDown => self.modifier_down(),
            EditorInput::ModifierUp => self.modifier_up(),
            EditorInput::Undo => {
                self.undo();
            }
        }
    }

    /// Start a stroke at `cell`.
    ///
    /// With the column modifier the stroke column-fills; otherwise the
    /// occupancy of the pressed cell picks erase (occupied) or paint (empty).
    pub fn pointer_down(&mut self, cell: Coord, modifier: bool) {
        if self.is_stroke_active() {
            self.pointer_up();
        }
        self.cursor = Some(cell);
        let mode = if modifier || self.modifier_held {
            DrawMode::Column
        } else {
            match self.board.cell(cell.row, cell.col) {
                Some(Some(_)) => DrawMode::Erase,
                _ => DrawMode::Paint,
            }
        };
        self.stroke = Stroke::Active(mode);
        trace!(row = cell.row, col = cell.col, ?mode, "stroke started");

        if self.apply(cell, mode) {
            self.notify(ChangeEvent::Drag);
        }
    }

    /// Move the cursor. While a stroke is active, every cell between the old
    /// and new cursor is written. `None` means the pointer left the board.
    pub fn pointer_move(&mut self, cell: Option<Coord>) {
        let Some(cell) = cell else {
            self.pointer_leave();
            return;
        };
        let prev = self.cursor.replace(cell);
        let Stroke::Active(mode) = self.stroke else {
            return;
        };
        if prev == Some(cell) {
            return;
        }

        let mut changed = false;
        match prev {
            Some(start) => {
                for target in line(start, cell) {
                    changed |= self.apply(target, mode);
                }
            }
            None => changed = self.apply(cell, mode),
        }
        if changed {
            self.notify(ChangeEvent::Drag);
        }
    }

    /// Finish the stroke and raise `Release`. The board is committed to
    /// history only when it differs from the last commit.
    pub fn pointer_up(&mut self) {
        if !self.is_stroke_active() {
            return;
        }
        self.stroke = Stroke::Idle;
        if !self.history.matches_latest(&self.board) {
            self.history.snapshot(&self.board);
        }
        debug!(
            filled = self.board.filled_count(),
            history = self.history.len(),
            "stroke released"
        );
        self.notify(ChangeEvent::Release);
    }

    /// Pointer left the board: drop the hover cursor and commit any running
    /// stroke as if the button had been released.
    pub fn pointer_leave(&mut self) {
        self.cursor = None;
        self.pointer_up();
    }

    pub fn modifier_down(&mut self) {
        self.modifier_held = true;
    }

    pub fn modifier_up(&mut self) {
        self.modifier_held = false;
    }

    /// Rewind to the previous snapshot. Returns false when nothing changed
    /// (oldest snapshot reached, or a stroke is in progress).
    pub fn undo(&mut self) -> bool {
        if self.is_stroke_active() {
            return false;
        }
        if !self.history.undo(&mut self.board) {
            return false;
        }
        debug!(history = self.history.len(), "undo");
        self.notify(ChangeEvent::Undo);
        true
    }

    /// Stamp a piece, clear full rows and compact the board.
    ///
    /// Off-board minos are dropped. `next_hint` is passed through to the
    /// listener. Returns the number of cleared rows.
    pub fn place(&mut self, kind: PieceKind, placement: Placement, next_hint: Option<PieceKind>) -> u32 {
        self.preview = None;
        let tag = piece_tag(kind);
        for cell in footprint(kind, placement) {
            self.board.try_set(cell.row, cell.col, Some(tag));
        }
        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;
        self.history.snapshot(&self.board);
        debug!(
            piece = kind.as_str(),
            rot = placement.rot,
            row = placement.row,
            col = placement.col,
            lines_cleared,
            "piece placed"
        );
        self.notify(ChangeEvent::Placement {
            lines_cleared,
            next_piece: next_hint,
        });
        lines_cleared
    }

    /// Highlight a piece footprint without touching the board
    pub fn preview_piece(&mut self, kind: PieceKind, placement: Placement) {
        self.preview = Some(PiecePreview { kind, placement });
    }

    pub fn clear_preview(&mut self) {
        self.preview = None;
    }

    /// Empty the whole board as one committed edit
    pub fn clear(&mut self) {
        if self.is_stroke_active() || self.board.is_empty() {
            return;
        }
        self.board.clear();
        self.history.snapshot(&self.board);
        debug!(history = self.history.len(), "board cleared");
        self.notify(ChangeEvent::Release);
    }

    /// Write one target cell in `mode`; true when occupancy changed
    fn apply(&mut self, target: Coord, mode: DrawMode) -> bool {
        match mode {
            DrawMode::Paint => match self.board.cell(target.row, target.col) {
                // Filled cells get a fresh tag but do not count as a change.
                Some(cell) => {
                    let tag = self.rng.next_tag();
                    self.board.try_set(target.row, target.col, Some(tag));
                    cell.is_none()
                }
                None => false,
            },
            DrawMode::Erase => match self.board.cell(target.row, target.col) {
                Some(Some(_)) => self.board.try_set(target.row, target.col, None),
                _ => false,
            },
            DrawMode::Column => self.fill_column(target),
        }
    }

    fn fill_column(&mut self, anchor: Coord) -> bool {
        if !anchor.in_bounds() {
            return false;
        }
        let col = anchor.col;
        let mut changed = false;
        for row in 0..BOARD_HEIGHT as i8 {
            let filled = matches!(self.board.cell(row, col), Some(Some(_)));
            if row < anchor.row && filled {
                changed |= self.board.try_set(row, col, None);
            } else if row >= anchor.row && !filled {
                let tag = self.rng.next_tag();
                changed |= self.board.try_set(row, col, Some(tag));
            }
        }
        changed
    }

    fn notify(&mut self, event: ChangeEvent) {
        self.listener.on_change(&self.board, &event);
    }
}

impl<L: ChangeListener + Default> Default for Editor<L> {
    fn default() -> Self {
        Self::new(L::default())
    }
}

impl<L: ChangeListener> std::fmt::Debug for Editor<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("cursor", &self.cursor)
            .field("stroke", &self.stroke)
            .field("modifier_held", &self.modifier_held)
            .field("preview", &self.preview)
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::EventLog;
    use crate::types::ChangeReason;

    fn editor() -> Editor<EventLog> {
        Editor::new(EventLog::new())
    }

    #[test]
    fn press_on_filled_cell_erases_whole_stroke() {
        let mut ed = editor();
        ed.pointer_down(Coord::new(19, 0), false);
        ed.pointer_move(Some(Coord::new(19, 3)));
        ed.pointer_up();
        assert_eq!(ed.board().filled_count(), 4);

        // Start on a filled cell and sweep over filled and empty ones.
        ed.pointer_down(Coord::new(19, 1), false);
        assert_eq!(ed.draw_mode(), DrawMode::Erase);
        ed.pointer_move(Some(Coord::new(19, 6)));
        ed.pointer_up();
        assert_eq!(ed.board().filled_count(), 1);
        assert!(ed.board().is_filled(19, 0).unwrap());
    }

    #[test]
    fn modifier_key_forces_column_hover_only_while_idle() {
        let mut ed = editor();
        ed.modifier_down();
        assert_eq!(ed.draw_mode(), DrawMode::Column);
        ed.modifier_up();
        assert_eq!(ed.draw_mode(), DrawMode::Paint);

        ed.pointer_down(Coord::new(5, 5), false);
        ed.modifier_down();
        assert_eq!(ed.draw_mode(), DrawMode::Paint);
        ed.pointer_up();
        assert_eq!(ed.draw_mode(), DrawMode::Column);
    }

    #[test]
    fn off_board_press_is_ignored_but_opens_stroke() {
        let mut ed = editor();
        ed.pointer_down(Coord::new(-1, 3), false);
        assert!(ed.is_stroke_active());
        assert!(ed.listener().events.is_empty());
        ed.pointer_up();
        assert_eq!(ed.listener().reasons(), vec![ChangeReason::Release]);
        assert_eq!(ed.history_len(), 1);
    }

    #[test]
    fn unchanged_stroke_releases_without_snapshot() {
        let mut ed = editor();
        ed.pointer_down(Coord::new(10, 0), true);
        ed.pointer_up();
        assert_eq!(ed.history_len(), 2);

        // The column is already filled from row 10 down.
        ed.pointer_down(Coord::new(10, 0), true);
        ed.pointer_up();
        assert_eq!(ed.history_len(), 2);
        assert_eq!(
            ed.listener().reasons(),
            vec![
                ChangeReason::Drag,
                ChangeReason::Release,
                ChangeReason::Release
            ]
        );
    }

    #[test]
    fn stroke_that_restores_last_commit_takes_no_snapshot() {
        let mut ed = editor();
        ed.pointer_down(Coord::new(15, 0), true);
        ed.pointer_up();
        let committed = ed.board().clone();
        assert_eq!(ed.history_len(), 2);

        // Extends the column up to row 10, then shrinks it back to row 15.
        ed.pointer_down(Coord::new(10, 0), true);
        ed.pointer_move(Some(Coord::new(15, 0)));
        ed.pointer_up();

        assert_eq!(ed.board(), &committed);
        assert_eq!(ed.history_len(), 2);
        assert!(ed.undo());
        assert!(ed.board().is_empty());
    }

    #[test]
    fn paint_stroke_recolors_filled_cells_it_crosses() {
        let mut ed = editor();
        ed.pointer_down(Coord::new(19, 1), false);
        ed.pointer_up();
        ed.listener_mut().clear();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..32 {
            ed.pointer_down(Coord::new(19, 0), false);
            ed.pointer_move(Some(Coord::new(19, 1)));
            ed.pointer_up();
            seen.insert(ed.board().get(19, 1).unwrap());
            ed.undo();
        }
        // Only the press on (19, 0) is reported as a change.
        assert!(ed
            .listener()
            .events
            .chunks(3)
            .all(|c| c[0] == ChangeEvent::Drag && c[1] == ChangeEvent::Release));
        assert!(seen.len() > 1);
        assert_eq!(ed.board().filled_count(), 1);
    }

    #[test]
    fn undo_is_ignored_mid_stroke() {
        let mut ed = editor();
        ed.pointer_down(Coord::new(0, 0), false);
        ed.pointer_up();
        ed.pointer_down(Coord::new(1, 1), false);
        assert!(!ed.undo());
        assert!(!ed.can_undo());
        ed.pointer_up();
        assert!(ed.undo());
        assert_eq!(ed.board().filled_count(), 1);
    }
}
