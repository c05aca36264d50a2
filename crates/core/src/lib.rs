//! Board editing and placement engine - pure, deterministic, and testable
//!
//! This crate holds everything that mutates the editor grid. It has **no
//! dependencies** on terminals or files, so every rule is unit-testable:
//!
//! - **Deterministic**: cosmetic randomness comes from a seeded LCG
//! - **Bounded**: undo history is capped and stores 50-byte packed boards
//! - **Synchronous**: every mutation reports to one listener before returning
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 grid with checked access and row compaction
//! - [`pieces`]: tetromino shape table and per-piece visual tags
//! - [`line`]: Bresenham rasterizer used to interpolate drags
//! - [`editor`]: stroke state machine, placement and undo behind one owner
//! - [`history`]: bounded packed snapshot history
//! - [`notify`]: change events and the listener trait
//! - [`params`]: game parameters sent with engine queries
//! - [`query`]: engine query export and placement suggestion import
//! - [`config`]: environment-driven configuration
//! - [`rng`]: small LCG for cosmetic choices
//!
//! # Example
//!
//! ```
//! use tetris_editor_core::{ChangeEvent, Editor, EventLog};
//! use tetris_editor_core::types::{Coord, Placement, PieceKind};
//!
//! let mut editor = Editor::new(EventLog::new());
//!
//! // Fill the bottom row except the rightmost column.
//! editor.pointer_down(Coord::new(19, 0), false);
//! editor.pointer_move(Some(Coord::new(19, 8)));
//! editor.pointer_up();
//!
//! // A vertical I in the gap clears one line.
//! let cleared = editor.place(PieceKind::I, Placement::new(1, 18, 9), None);
//! assert_eq!(cleared, 1);
//! assert_eq!(
//!     editor.listener().events.last(),
//!     Some(&ChangeEvent::Placement { lines_cleared: 1, next_piece: None })
//! );
//! ```

pub mod board;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod line;
pub mod notify;
pub mod params;
pub mod pieces;
pub mod query;
pub mod rng;

pub use tetris_editor_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EditorConfig;
pub use editor::{Editor, PiecePreview, Stroke};
pub use error::{BoardError, QueryError};
pub use history::History;
pub use notify::{ChangeEvent, ChangeListener, EventLog, NoopListener};
pub use params::GameParams;
pub use pieces::{footprint, get_shape, piece_tag};
pub use query::{placement_notation, BoardQuery, PlacementSuggestion};
pub use rng::SimpleRng;
