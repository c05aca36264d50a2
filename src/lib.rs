//! Terminal Tetris board editor (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetris_editor::{core,input,term,types}` and hosts the
//! application layer that glues them together for the binary.

pub mod app;

pub use tetris_editor_core as core;
pub use tetris_editor_input as input;
pub use tetris_editor_term as term;
pub use tetris_editor_types as types;
