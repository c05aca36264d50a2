//! Application state for the terminal editor.
//!
//! [`Session`] is the change listener: it keeps the game parameters in step
//! with placements and re-checks the board after every commit. [`App`] owns
//! the editor and routes input [`Command`]s, including piece mode and the
//! engine query/suggestion files.

use std::fs;

use tracing::{debug, info, warn};

use crate::core::{
    Board, BoardQuery, ChangeEvent, ChangeListener, Editor, EditorConfig, GameParams,
    PlacementSuggestion, QueryError, SimpleRng,
};
use crate::input::Command;
use crate::term::PanelView;
use crate::types::{EditorInput, PieceKind, Placement};

pub const WARN_ODD_CELLS: &str = "odd cell count";
pub const WARN_FULL_ROWS: &str = "board has full lines";

/// Listener side of the app: parameters and board diagnostics.
#[derive(Debug)]
pub struct Session {
    pub params: GameParams,
    rng: SimpleRng,
    warnings: Vec<&'static str>,
}

impl Session {
    pub fn new(seed: u32) -> Self {
        Self {
            params: GameParams::default(),
            // Different stream from the editor's tag generator.
            rng: SimpleRng::new(seed.wrapping_add(0x9e37_79b9)),
            warnings: Vec::new(),
        }
    }

    pub fn warnings(&self) -> &[&'static str] {
        &self.warnings
    }

    fn check_board(&mut self, board: &Board) {
        let filled = board.filled_count();
        self.warnings.clear();
        if board.full_row_count() > 0 {
            self.warnings.push(WARN_FULL_ROWS);
        }
        // An odd board is unreachable; its line count is left alone.
        if filled % 2 == 1 {
            self.warnings.push(WARN_ODD_CELLS);
        } else if self.params.align_line_parity(filled) {
            debug!(lines = self.params.lines(), filled, "line count parity adjusted");
        }
    }
}

impl ChangeListener for Session {
    fn on_change(&mut self, board: &Board, event: &ChangeEvent) {
        if let ChangeEvent::Placement {
            lines_cleared,
            next_piece,
        } = *event
        {
            self.params.add_lines(lines_cleared);
            self.params.piece = next_piece.unwrap_or_else(|| self.rng.next_piece());
        }
        if event.reason().is_commit() {
            self.check_board(board);
        }
    }
}

/// A suggestion waiting to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPlacement {
    kind: PieceKind,
    placement: Placement,
    next: Option<PieceKind>,
}

#[derive(Debug)]
pub struct App {
    editor: Editor<Session>,
    config: EditorConfig,
    piece_mode: bool,
    rotation: u8,
    column_lock: bool,
    pending: Option<PendingPlacement>,
    status: String,
    quit: bool,
}

impl App {
    pub fn new(config: EditorConfig) -> Self {
        let editor = Editor::with_config(Session::new(config.seed), &config);
        let mut app = Self {
            editor,
            config,
            piece_mode: false,
            rotation: 0,
            column_lock: false,
            pending: None,
            status: String::new(),
            quit: false,
        };
        app.sync_level();
        app
    }

    pub fn editor(&self) -> &Editor<Session> {
        &self.editor
    }

    pub fn params(&self) -> &GameParams {
        &self.editor.listener().params
    }

    pub fn piece_mode(&self) -> bool {
        self.piece_mode
    }

    pub fn column_lock(&self) -> bool {
        self.column_lock
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn panel(&self) -> PanelView<'_> {
        let params = self.params();
        PanelView {
            piece: params.piece,
            rotation: self.rotation,
            speed_level: params.speed_level(),
            lines: params.lines(),
            piece_mode: self.piece_mode,
            column_lock: self.column_lock,
            warnings: self.editor.listener().warnings(),
            status: &self.status,
        }
    }

    /// Route a pointer input, applying sticky column fill and piece mode.
    pub fn handle_pointer(&mut self, input: EditorInput) {
        if self.piece_mode {
            match input {
                EditorInput::PointerDown { cell, .. } => {
                    let kind = self.params().piece;
                    let placement = Placement::new(self.rotation, cell.row, cell.col);
                    let cleared = self.editor.place(kind, placement, None);
                    self.status = format!("placed {}, {} lines", kind.as_str(), cleared);
                    self.rotation = 0;
                }
                EditorInput::PointerMove { .. } | EditorInput::PointerLeave => {
                    self.editor.handle(input);
                }
                _ => return self.handle_edit(input),
            }
            self.refresh_piece_preview();
            self.sync_level();
            return;
        }

        let input = match input {
            EditorInput::PointerDown { cell, modifier } => EditorInput::PointerDown {
                cell,
                modifier: modifier || self.column_lock,
            },
            other => other,
        };
        self.handle_edit(input);
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Edit(input) => self.handle_edit(input),
            Command::CyclePiece => {
                let params = &mut self.editor.listener_mut().params;
                params.piece = params.piece.cycle();
                self.rotation = 0;
                self.refresh_piece_preview();
            }
            Command::RotatePiece => {
                let count = self.params().piece.rotation_count().max(1);
                self.rotation = (self.rotation + 1) % count;
                self.refresh_piece_preview();
            }
            Command::TogglePieceMode => {
                self.piece_mode = !self.piece_mode;
                self.pending = None;
                if self.piece_mode {
                    self.refresh_piece_preview();
                } else {
                    self.editor.clear_preview();
                }
            }
            Command::ToggleColumnLock => self.column_lock = !self.column_lock,
            Command::LevelUp => {
                self.editor.listener_mut().params.step_speed_level(true);
            }
            Command::LevelDown => {
                self.editor.listener_mut().params.step_speed_level(false);
            }
            Command::ClearBoard => self.editor.clear(),
            Command::Export => self.export_query(),
            Command::LoadSuggestion => self.load_suggestion(),
            Command::CommitPreview => self.commit_pending(),
            Command::CancelPreview => {
                self.pending = None;
                self.editor.clear_preview();
            }
            Command::Quit => self.quit = true,
        }
        self.sync_level();
    }

    fn handle_edit(&mut self, input: EditorInput) {
        if input == EditorInput::Undo && !self.editor.can_undo() {
            self.status = "nothing to undo".to_string();
            return;
        }
        self.editor.handle(input);
        self.sync_level();
    }

    fn sync_level(&mut self) {
        let level = self.params().display_level();
        self.editor.set_level(level);
    }

    fn refresh_piece_preview(&mut self) {
        if !self.piece_mode {
            return;
        }
        match self.editor.cursor() {
            Some(at) => {
                let kind = self.params().piece;
                self.editor
                    .preview_piece(kind, Placement::new(self.rotation, at.row, at.col));
            }
            None => self.editor.clear_preview(),
        }
    }

    /// Build the query for the current board, or the reason it cannot be
    /// evaluated.
    pub fn query(&self) -> Result<BoardQuery, QueryError> {
        let query = BoardQuery::new(self.editor.board(), self.params());
        query.validate()?;
        Ok(query)
    }

    fn export_query(&mut self) {
        let json = match self.query().and_then(|q| q.to_json()) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "query not exported");
                self.status = err.to_string();
                return;
            }
        };
        match fs::write(&self.config.query_path, json) {
            Ok(()) => {
                info!(path = %self.config.query_path.display(), "query exported");
                self.status = format!("wrote {}", self.config.query_path.display());
            }
            Err(err) => {
                warn!(%err, "query write failed");
                self.status = format!("write failed: {err}");
            }
        }
    }

    fn load_suggestion(&mut self) {
        let path = &self.config.suggestion_path;
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, path = %path.display(), "suggestion read failed");
                self.status = format!("read failed: {err}");
                return;
            }
        };
        if let Err(err) = self.preview_suggestion(&text) {
            warn!(%err, "suggestion rejected");
            self.status = err.to_string();
        }
    }

    /// Parse a suggestion and show it as the pending placement.
    pub fn preview_suggestion(&mut self, json: &str) -> Result<(), QueryError> {
        let suggestion = PlacementSuggestion::from_json(json)?;
        let notation = suggestion.notation()?;
        let pending = PendingPlacement {
            kind: suggestion.kind()?,
            placement: suggestion.placement(),
            next: suggestion.next_hint(),
        };
        self.piece_mode = false;
        self.editor.preview_piece(pending.kind, pending.placement);
        self.pending = Some(pending);
        self.status = format!("suggestion {notation}");
        Ok(())
    }

    fn commit_pending(&mut self) {
        let Some(p) = self.pending.take() else {
            self.status = "no suggestion".to_string();
            return;
        };
        let cleared = self.editor.place(p.kind, p.placement, p.next);
        self.status = format!("placed {}, {} lines", p.kind.as_str(), cleared);
    }
}
