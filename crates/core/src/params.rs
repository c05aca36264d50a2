//! Game parameters supplied alongside the board when querying the engine.
//!
//! Holds the current piece, speed level, line count and the engine tuning
//! knobs (tap speed, reaction time, aggression). Level and line count are kept
//! consistent with each other the way the classic game tracks them.

use crate::types::PieceKind;

/// Speed levels the engine understands
pub const SPEED_LEVELS: [u32; 4] = [18, 19, 29, 39];

/// Line count at which each speed level starts being shown in the editor
const LEVEL_START_LINES: [u32; 4] = [30, 160, 260, 360];

/// Highest line count accepted
pub const MAX_LINES: u32 = 429;

/// Horizontal tap rate assumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapSpeed {
    Hz10,
    Hz12,
    Hz15,
    Hz20,
    Hz24,
    Hz30,
    Slow5,
}

impl TapSpeed {
    pub const ALL: [TapSpeed; 7] = [
        TapSpeed::Hz10,
        TapSpeed::Hz12,
        TapSpeed::Hz15,
        TapSpeed::Hz20,
        TapSpeed::Hz24,
        TapSpeed::Hz30,
        TapSpeed::Slow5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TapSpeed::Hz10 => "10hz",
            TapSpeed::Hz12 => "12hz",
            TapSpeed::Hz15 => "15hz",
            TapSpeed::Hz20 => "20hz",
            TapSpeed::Hz24 => "24hz",
            TapSpeed::Hz30 => "30hz",
            TapSpeed::Slow5 => "slow5",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

/// How much risk the engine takes for score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggression {
    Low,
    Medium,
    High,
}

impl Aggression {
    /// Engine encoding (0 = high ... 2 = low)
    pub fn code(&self) -> u8 {
        match self {
            Aggression::High => 0,
            Aggression::Medium => 1,
            Aggression::Low => 2,
        }
    }
}

/// Reaction delays in frames; 61 disables adjustment
pub const REACTION_FRAMES: [u32; 6] = [0, 18, 21, 24, 30, 61];

/// Which parity the line count must have for a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineParity {
    Even,
    Odd,
}

impl LineParity {
    /// Every piece adds 4 cells and every line removes 10, so the filled-cell
    /// count is a multiple of 4 exactly when an even number of lines was
    /// cleared.
    pub fn for_cell_count(cells: u32) -> Self {
        if cells % 4 == 0 {
            LineParity::Even
        } else {
            LineParity::Odd
        }
    }

    pub fn matches(&self, lines: u32) -> bool {
        match self {
            LineParity::Even => lines % 2 == 0,
            LineParity::Odd => lines % 2 == 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameParams {
    pub piece: PieceKind,
    speed_level: u32,
    lines: u32,
    pub tap_speed: TapSpeed,
    pub reaction_frames: u32,
    pub aggression: Aggression,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            piece: PieceKind::T,
            speed_level: SPEED_LEVELS[0],
            lines: LEVEL_START_LINES[0],
            tap_speed: TapSpeed::Hz24,
            reaction_frames: REACTION_FRAMES[2],
            aggression: Aggression::High,
        }
    }
}

impl GameParams {
    pub fn new(piece: PieceKind) -> Self {
        Self {
            piece,
            ..Self::default()
        }
    }

    pub fn speed_level(&self) -> u32 {
        self.speed_level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Select a speed level and jump to its starting line count.
    ///
    /// Unknown levels are ignored. Returns the new display level.
    pub fn set_speed_level(&mut self, level: u32) -> u32 {
        if let Some(i) = SPEED_LEVELS.iter().position(|&l| l == level) {
            self.speed_level = level;
            self.lines = LEVEL_START_LINES[i];
        }
        self.display_level()
    }

    /// Move to the next (or previous) speed level, clamping at the ends
    pub fn step_speed_level(&mut self, up: bool) -> u32 {
        let i = SPEED_LEVELS
            .iter()
            .position(|&l| l == self.speed_level)
            .unwrap_or(0);
        let next = if up {
            (i + 1).min(SPEED_LEVELS.len() - 1)
        } else {
            i.saturating_sub(1)
        };
        self.set_speed_level(SPEED_LEVELS[next])
    }

    /// Set the line count and derive the speed level from it.
    /// Returns the new display level.
    pub fn set_lines(&mut self, lines: u32) -> u32 {
        self.lines = lines.min(MAX_LINES);
        self.speed_level = match self.lines {
            0..=129 => 18,
            130..=229 => 19,
            230..=329 => 29,
            _ => 39,
        };
        self.display_level()
    }

    pub fn add_lines(&mut self, cleared: u32) -> u32 {
        self.set_lines(self.lines.saturating_add(cleared))
    }

    /// Level the game shows at the current line count
    ///
    /// ```
    /// use tetris_editor_core::params::GameParams;
    ///
    /// let mut params = GameParams::default();
    /// assert_eq!(params.set_lines(129), 18);
    /// assert_eq!(params.set_lines(130), 19);
    /// assert_eq!(params.set_lines(165), 22);
    /// assert_eq!(params.set_speed_level(29), 32);
    /// ```
    pub fn display_level(&self) -> u32 {
        if self.lines < 130 {
            18
        } else {
            19 + (self.lines - 130) / 10
        }
    }

    /// Bump the line count by one if its parity cannot produce `cell_count`
    /// filled cells. Returns true when the count changed.
    pub fn align_line_parity(&mut self, cell_count: u32) -> bool {
        if LineParity::for_cell_count(cell_count).matches(self.lines) {
            return false;
        }
        let lines = if self.lines >= MAX_LINES {
            self.lines - 1
        } else {
            self.lines + 1
        };
        self.set_lines(lines);
        true
    }
}
