//! Terminal board editor (default binary).
//!
//! Mouse edits the board, keys drive everything else. Rendering uses the
//! framebuffer renderer from `tetris_editor::term`; logs go to a file so they
//! never disturb the screen.

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use tetris_editor::app::App;
use tetris_editor::core::EditorConfig;
use tetris_editor::input::{map_key_event, map_mouse_event};
use tetris_editor::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = EditorConfig::from_env();
    init_logging(&config)?;
    tracing::info!(
        history_cap = config.history_cap,
        seed = config.seed,
        "starting tetris-editor"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, App::new(config));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logging is only enabled with a log file; `RUST_LOG` overrides the `info` default.
fn init_logging(config: &EditorConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let log_file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut app: App) -> Result<()> {
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(app.editor(), &app.panel(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) => {
                if let Some(command) = map_key_event(key) {
                    app.handle_command(command);
                }
            }
            Event::Mouse(mouse) => {
                if let Some(input) = map_mouse_event(mouse, &view.layout(viewport)) {
                    app.handle_pointer(input);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            Event::FocusLost => app.handle_pointer(tetris_editor::types::EditorInput::PointerLeave),
            _ => {}
        }

        if app.should_quit() {
            tracing::info!("quit");
            return Ok(());
        }
    }
}
