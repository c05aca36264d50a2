//! Terminal rendering for the board editor.
//!
//! Editor state is projected into a plain framebuffer (pure, testable) that a
//! small renderer diffs and flushes to the terminal. No widget toolkit; cells
//! are drawn two columns wide to keep the board roughly square.

pub mod board_view;
pub mod fb;
pub mod renderer;
pub mod theme;

pub use tetris_editor_core as core;
pub use tetris_editor_types as types;

pub use board_view::{BoardView, PanelView, Viewport};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{palette_for_level, Palette, PALETTES};
