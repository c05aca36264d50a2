//! Terminal input module (editor-facing).
//!
//! Maps `crossterm` mouse and key events into [`types::EditorInput`] for the
//! edit engine and into application [`Command`]s for everything else. Screen
//! to board translation uses the [`types::BoardLayout`] published by the
//! renderer.

pub mod map;

pub use tetris_editor_types as types;

pub use map::{is_column_modifier, map_key_event, map_mouse_event, should_quit, Command};
