//! Change notification - the single listener told about every mutation.

use crate::board::Board;
use crate::types::{ChangeReason, PieceKind};

/// What just happened to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A stroke changed cells; not yet committed
    Drag,
    /// A stroke finished
    Release,
    /// A piece was committed
    Placement {
        lines_cleared: u32,
        /// Piece the caller wants presented next, if it knows
        next_piece: Option<PieceKind>,
    },
    /// History was rewound one step
    Undo,
}

impl ChangeEvent {
    pub fn reason(&self) -> ChangeReason {
        match self {
            ChangeEvent::Drag => ChangeReason::Drag,
            ChangeEvent::Release => ChangeReason::Release,
            ChangeEvent::Placement { .. } => ChangeReason::Placement,
            ChangeEvent::Undo => ChangeReason::Undo,
        }
    }

    pub fn lines_cleared(&self) -> Option<u32> {
        match self {
            ChangeEvent::Placement { lines_cleared, .. } => Some(*lines_cleared),
            _ => None,
        }
    }
}

/// Receives every committed or in-progress change, synchronously and in order.
///
/// The editor never queues events; a listener that triggers more work does
/// so while the editor call that raised the event is still on the stack.
pub trait ChangeListener {
    fn on_change(&mut self, board: &Board, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: FnMut(&Board, &ChangeEvent),
{
    fn on_change(&mut self, board: &Board, event: &ChangeEvent) {
        self(board, event)
    }
}

/// Listener that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ChangeListener for NoopListener {
    fn on_change(&mut self, _board: &Board, _event: &ChangeEvent) {}
}

/// Listener that keeps every event, for tests and tools
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<ChangeEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reasons(&self) -> Vec<ChangeReason> {
        self.events.iter().map(ChangeEvent::reason).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ChangeListener for EventLog {
    fn on_change(&mut self, _board: &Board, event: &ChangeEvent) {
        self.events.push(*event);
    }
}
