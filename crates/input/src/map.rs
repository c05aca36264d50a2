//! Event mapping from terminal events to editor inputs and commands.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::types::{BoardLayout, EditorInput};

/// Everything a key or mouse event can ask the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the edit engine
    Edit(EditorInput),
    /// Select the next piece
    CyclePiece,
    /// Rotate the piece used by piece mode
    RotatePiece,
    /// Switch between cell editing and piece placement
    TogglePieceMode,
    /// Sticky column-fill for terminals that do not report modifier keys
    ToggleColumnLock,
    LevelUp,
    LevelDown,
    ClearBoard,
    /// Write the engine query
    Export,
    /// Read and preview an engine suggestion
    LoadSuggestion,
    /// Commit the previewed suggestion
    CommitPreview,
    CancelPreview,
    Quit,
}

/// Modifiers that turn a click into a column fill. Many terminals reserve
/// Shift+click for text selection, so Alt works too.
pub fn is_column_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
}

fn is_shift_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Modifier(ModifierKeyCode::LeftShift) | KeyCode::Modifier(ModifierKeyCode::RightShift)
    )
}

/// Map keyboard input to a command.
///
/// Release events only matter for the Shift key (reported by terminals with
/// keyboard enhancement); auto-repeat is ignored.
pub fn map_key_event(key: KeyEvent) -> Option<Command> {
    match key.kind {
        KeyEventKind::Release => {
            return is_shift_key(key.code).then_some(Command::Edit(EditorInput::ModifierUp));
        }
        KeyEventKind::Repeat => return None,
        KeyEventKind::Press => {}
    }

    if should_quit(key) {
        return Some(Command::Quit);
    }
    if is_shift_key(key.code) {
        return Some(Command::Edit(EditorInput::ModifierDown));
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::Edit(EditorInput::Undo)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('u') | KeyCode::Char('U') => Some(Command::Edit(EditorInput::Undo)),
        KeyCode::Tab => Some(Command::CyclePiece),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::RotatePiece),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePieceMode),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::ToggleColumnLock),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::LevelUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::LevelDown),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::ClearBoard),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Command::Export),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Command::LoadSuggestion),
        KeyCode::Enter => Some(Command::CommitPreview),
        KeyCode::Esc => Some(Command::CancelPreview),
        _ => None,
    }
}

/// Map a mouse event over the board to an editor input.
///
/// Presses outside the board are dropped; moves and drags outside it become
/// `PointerMove { cell: None }`, which the editor treats as leaving.
pub fn map_mouse_event(mouse: MouseEvent, layout: &BoardLayout) -> Option<EditorInput> {
    let cell = layout.cell_at(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => cell.map(|cell| EditorInput::PointerDown {
            cell,
            modifier: is_column_modifier(mouse.modifiers),
        }),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(EditorInput::PointerMove { cell })
        }
        MouseEventKind::Up(MouseButton::Left) => Some(EditorInput::PointerUp),
        _ => None,
    }
}

/// Check if key should quit the editor.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
