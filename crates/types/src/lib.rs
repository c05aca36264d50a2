//! Shared types for the board editor.
//!
//! Pure data structures with no dependencies, usable from the core engine,
//! the input mapping layer and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! Coordinates are always `(row, col)`; lower-indexed rows are higher up.
//!
//! # Examples
//!
//! ```
//! use tetris_editor_types::{BlockTag, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("s"), Some(PieceKind::S));
//! assert_eq!(PieceKind::S.rotation_count(), 2);
//! assert_eq!(BlockTag::from_code(3), Some(BlockTag::Tertiary));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Default number of undo snapshots kept in memory
pub const HISTORY_CAP: usize = 1000;

/// The seven tetromino piece kinds, in engine index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    J,
    Z,
    O,
    S,
    L,
    I,
}

impl PieceKind {
    /// All pieces in engine index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::O,
        PieceKind::S,
        PieceKind::L,
        PieceKind::I,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use tetris_editor_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "j" => Some(PieceKind::J),
            "z" => Some(PieceKind::Z),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "l" => Some(PieceKind::L),
            "i" => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Uppercase letter used in the engine query format
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::Z => "Z",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::L => "L",
            PieceKind::I => "I",
        }
    }

    /// Engine index (0 = T ... 6 = I)
    pub fn index(&self) -> u8 {
        match self {
            PieceKind::T => 0,
            PieceKind::J => 1,
            PieceKind::Z => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::L => 5,
            PieceKind::I => 6,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Number of distinct rotation states
    ///
    /// ```
    /// use tetris_editor_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::T.rotation_count(), 4);
    /// assert_eq!(PieceKind::I.rotation_count(), 2);
    /// assert_eq!(PieceKind::O.rotation_count(), 1);
    /// ```
    pub fn rotation_count(&self) -> u8 {
        match self {
            PieceKind::T | PieceKind::J | PieceKind::L => 4,
            PieceKind::Z | PieceKind::S | PieceKind::I => 2,
            PieceKind::O => 1,
        }
    }

    /// Next piece in index order, wrapping around
    pub fn cycle(&self) -> Self {
        Self::ALL[(self.index() as usize + 1) % Self::ALL.len()]
    }
}

/// Visual variant of an occupied cell
///
/// Purely cosmetic; the logical state of a cell is only whether it is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    Primary,
    Secondary,
    Tertiary,
}

impl BlockTag {
    pub const ALL: [BlockTag; 3] = [BlockTag::Primary, BlockTag::Secondary, BlockTag::Tertiary];

    /// Two-bit code (1..=3); 0 is reserved for empty cells
    pub fn code(&self) -> u8 {
        match self {
            BlockTag::Primary => 1,
            BlockTag::Secondary => 2,
            BlockTag::Tertiary => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BlockTag::Primary),
            2 => Some(BlockTag::Secondary),
            3 => Some(BlockTag::Tertiary),
            _ => None,
        }
    }
}

/// A cell on the board
///
/// - `None`: empty
/// - `Some(tag)`: occupied, drawn with the given variant
pub type Cell = Option<BlockTag>;

/// A grid coordinate. May lie outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row >= 0
            && self.row < BOARD_HEIGHT as i8
            && self.col >= 0
            && self.col < BOARD_WIDTH as i8
    }
}

/// Where a piece goes: rotation index plus anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub rot: u8,
    pub row: i8,
    pub col: i8,
}

impl Placement {
    pub const fn new(rot: u8, row: i8, col: i8) -> Self {
        Self { rot, row, col }
    }

    pub fn anchor(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// How a stroke writes the cells it visits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Fill single cells
    Paint,
    /// Clear single cells
    Erase,
    /// Clear the column above the anchor, fill it from the anchor down
    Column,
}

/// Why the change listener was called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    /// In-progress stroke edit (not committed)
    Drag,
    /// Stroke completed
    Release,
    /// Piece committed
    Placement,
    /// History rewound
    Undo,
}

impl ChangeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeReason::Drag => "drag",
            ChangeReason::Release => "release",
            ChangeReason::Placement => "placement",
            ChangeReason::Undo => "undo",
        }
    }

    /// Whether the change was committed to history
    pub fn is_commit(&self) -> bool {
        !matches!(self, ChangeReason::Drag)
    }
}

/// Pointer and keyboard input understood by the edit engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorInput {
    /// Button pressed over `cell`; `modifier` is the column-fill modifier state
    PointerDown { cell: Coord, modifier: bool },
    /// Pointer moved; `None` means it is no longer over the board
    PointerMove { cell: Option<Coord> },
    PointerUp,
    PointerLeave,
    /// Column-fill modifier key pressed
    ModifierDown,
    /// Column-fill modifier key released
    ModifierUp,
    Undo,
}

/// Screen placement of the board, in terminal cells.
///
/// Produced by the renderer and consumed by the input mapper so that both
/// agree on which screen cell covers which board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Screen column of board cell (0, 0)
    pub origin_x: u16,
    /// Screen row of board cell (0, 0)
    pub origin_y: u16,
    /// Terminal columns per board cell
    pub cell_w: u16,
    /// Terminal rows per board cell
    pub cell_h: u16,
}

impl BoardLayout {
    /// Board cell under a screen position, if any
    ///
    /// ```
    /// use tetris_editor_types::{BoardLayout, Coord};
    ///
    /// let layout = BoardLayout { origin_x: 1, origin_y: 1, cell_w: 2, cell_h: 1 };
    /// assert_eq!(layout.cell_at(1, 1), Some(Coord::new(0, 0)));
    /// assert_eq!(layout.cell_at(4, 3), Some(Coord::new(2, 1)));
    /// assert_eq!(layout.cell_at(0, 1), None);
    /// assert_eq!(layout.cell_at(21, 1), None);
    /// ```
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Coord> {
        if self.cell_w == 0 || self.cell_h == 0 || x < self.origin_x || y < self.origin_y {
            return None;
        }
        let col = (x - self.origin_x) / self.cell_w;
        let row = (y - self.origin_y) / self.cell_h;
        if col >= BOARD_WIDTH as u16 || row >= BOARD_HEIGHT as u16 {
            return None;
        }
        Some(Coord::new(row as i8, col as i8))
    }
}
