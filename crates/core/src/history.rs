//! Bounded undo history over packed board snapshots.
//!
//! Each snapshot stores 2 bits per cell (0 = empty, 1..=3 = tag code), four
//! cells per byte, so a 20x10 board packs into 50 bytes and a full history of
//! 1000 entries stays around 50 KiB.

use std::collections::VecDeque;

use tracing::debug;

use crate::board::Board;
use crate::types::{BlockTag, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

const CELLS_PER_BYTE: usize = 4;
const PACKED_LEN: usize = BOARD_CELLS.div_ceil(CELLS_PER_BYTE);

#[derive(Clone, Copy, PartialEq, Eq)]
struct PackedBoard([u8; PACKED_LEN]);

impl PackedBoard {
    fn pack(board: &Board) -> Self {
        let mut bytes = [0u8; PACKED_LEN];
        for (i, cell) in board.cells().iter().enumerate() {
            let code = cell.map_or(0, |tag| tag.code());
            bytes[i / CELLS_PER_BYTE] |= code << ((i % CELLS_PER_BYTE) * 2);
        }
        Self(bytes)
    }

    fn code_at(&self, i: usize) -> u8 {
        (self.0[i / CELLS_PER_BYTE] >> ((i % CELLS_PER_BYTE) * 2)) & 0b11
    }

    fn unpack_into(&self, board: &mut Board) {
        let width = BOARD_WIDTH as usize;
        for row in 0..BOARD_HEIGHT as usize {
            for col in 0..width {
                let cell = BlockTag::from_code(self.code_at(row * width + col));
                board.try_set(row as i8, col as i8, cell);
            }
        }
    }
}

/// Snapshots in commit order; the back is always the current committed board.
pub struct History {
    entries: VecDeque<PackedBoard>,
    cap: usize,
}

impl History {
    /// Start a history whose only entry is `initial`. A cap of 0 is raised to 1.
    pub fn new(cap: usize, initial: &Board) -> Self {
        let cap = cap.max(1);
        let mut entries = VecDeque::with_capacity(cap.min(64));
        entries.push_back(PackedBoard::pack(initial));
        Self { entries, cap }
    }

    /// Record the board as the newest entry, evicting the oldest past the cap
    pub fn snapshot(&mut self, board: &Board) {
        self.entries.push_back(PackedBoard::pack(board));
        while self.entries.len() > self.cap {
            self.entries.pop_front();
            debug!(cap = self.cap, "history full, evicted oldest snapshot");
        }
    }

    /// Drop the newest entry and restore `board` from the one before it.
    ///
    /// Returns false without touching the board when only one entry is left.
    pub fn undo(&mut self, board: &mut Board) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop_back();
        match self.entries.back() {
            Some(prev) => {
                prev.unpack_into(board);
                true
            }
            None => false,
        }
    }

    /// Whether the newest entry encodes exactly this board
    pub fn matches_latest(&self, board: &Board) -> bool {
        self.entries.back() == Some(&PackedBoard::pack(board))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the initial snapshot is never discarded by undo
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("len", &self.entries.len())
            .field("cap", &self.cap)
            .finish()
    }
}
