//! Engine query format and placement suggestions.
//!
//! The move-search engine is external. It receives the board as a row-major
//! occupancy matrix plus the game parameters, and may answer with a placement
//! that the editor previews and commits.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::QueryError;
use crate::params::GameParams;
use crate::types::{Placement, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Anchor column a piece spawns in
pub const SPAWN_COL: i8 = 5;

/// Board plus parameters, as sent to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardQuery {
    pub board: [[bool; WIDTH]; HEIGHT],
    pub piece: String,
    pub level: u32,
    pub lines: u32,
    pub tap_speed: String,
    pub reaction_time: u32,
    pub aggression: u8,
}

impl BoardQuery {
    pub fn new(board: &Board, params: &GameParams) -> Self {
        Self {
            board: board.occupancy(),
            piece: params.piece.as_str().to_string(),
            level: params.speed_level(),
            lines: params.lines(),
            tap_speed: params.tap_speed.as_str().to_string(),
            reaction_time: params.reaction_frames,
            aggression: params.aggression.code(),
        }
    }

    pub fn filled_count(&self) -> u32 {
        self.board.iter().flatten().filter(|f| **f).count() as u32
    }

    /// Reject boards the engine cannot evaluate: any full row, or an odd
    /// number of filled cells (unreachable by placing 4-cell pieces).
    pub fn validate(&self) -> Result<(), QueryError> {
        let full = self.board.iter().filter(|row| row.iter().all(|f| *f)).count();
        if full > 0 {
            return Err(QueryError::FullRows(full));
        }
        let filled = self.filled_count();
        if filled % 2 != 0 {
            return Err(QueryError::OddCellCount(filled));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, QueryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A placement recommended by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSuggestion {
    pub piece: String,
    pub rot: u8,
    pub row: i8,
    pub col: i8,
    /// Piece to present after this one, when the engine knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_piece: Option<String>,
}

impl PlacementSuggestion {
    pub fn from_json(s: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn kind(&self) -> Result<PieceKind, QueryError> {
        PieceKind::from_str(&self.piece).ok_or_else(|| QueryError::UnknownPiece(self.piece.clone()))
    }

    pub fn placement(&self) -> Placement {
        Placement::new(self.rot, self.row, self.col)
    }

    /// Short human-readable form, see [`placement_notation`]
    pub fn notation(&self) -> Result<String, QueryError> {
        Ok(placement_notation(self.kind()?, self.placement()))
    }

    /// Next-piece hint; an unrecognised name is treated as no hint
    pub fn next_hint(&self) -> Option<PieceKind> {
        self.next_piece.as_deref().and_then(PieceKind::from_str)
    }
}

/// Describe a placement as piece, rotation, horizontal taps from the spawn
/// column and landing row, e.g. `"T r1 L3 @17"`.
///
/// ```
/// use tetris_editor_core::query::placement_notation;
/// use tetris_editor_core::types::{PieceKind, Placement};
///
/// assert_eq!(placement_notation(PieceKind::J, Placement::new(3, 17, 2)), "J r3 L3 @17");
/// assert_eq!(placement_notation(PieceKind::O, Placement::new(0, 18, 5)), "O r0 - @18");
/// ```
pub fn placement_notation(kind: PieceKind, placement: Placement) -> String {
    let rot = placement.rot % kind.rotation_count().max(1);
    let shift = i16::from(placement.col) - i16::from(SPAWN_COL);
    let taps = match shift {
        0 => "-".to_string(),
        s if s < 0 => format!("L{}", -s),
        s => format!("R{s}"),
    };
    format!("{} r{} {} @{}", kind.as_str(), rot, taps, placement.row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockTag;

    #[test]
    fn query_copies_occupancy_and_params() {
        let mut board = Board::new();
        board.try_set(19, 0, Some(BlockTag::Secondary));
        board.try_set(19, 1, Some(BlockTag::Primary));
        let params = GameParams::new(PieceKind::L);

        let query = BoardQuery::new(&board, &params);
        assert!(query.board[19][0] && query.board[19][1]);
        assert_eq!(query.filled_count(), 2);
        assert_eq!(query.piece, "L");
        assert_eq!(query.level, 18);
        assert_eq!(query.lines, 30);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn validate_rejects_full_rows_before_parity() {
        let mut board = Board::new();
        for col in 0..10 {
            board.try_set(19, col, Some(BlockTag::Primary));
        }
        board.try_set(0, 0, Some(BlockTag::Primary));
        let query = BoardQuery::new(&board, &GameParams::default());
        assert_eq!(query.validate(), Err(QueryError::FullRows(1)));
    }

    #[test]
    fn validate_rejects_odd_cell_count() {
        let mut board = Board::new();
        board.try_set(4, 4, Some(BlockTag::Primary));
        let query = BoardQuery::new(&board, &GameParams::default());
        assert_eq!(query.validate(), Err(QueryError::OddCellCount(1)));
    }

    #[test]
    fn suggestion_parses_and_rejects_unknown_piece() {
        let s = PlacementSuggestion::from_json(r#"{"piece":"i","rot":1,"row":17,"col":9}"#)
            .unwrap();
        assert_eq!(s.kind(), Ok(PieceKind::I));
        assert_eq!(s.placement(), Placement::new(1, 17, 9));
        assert_eq!(s.next_hint(), None);

        let bad = PlacementSuggestion::from_json(r#"{"piece":"q","rot":0,"row":0,"col":0}"#)
            .unwrap();
        assert_eq!(bad.kind(), Err(QueryError::UnknownPiece("q".to_string())));

        assert_eq!(s.notation(), Ok("I r1 R4 @17".to_string()));
        assert!(bad.notation().is_err());

        assert!(matches!(
            PlacementSuggestion::from_json("{"),
            Err(QueryError::Json(_))
        ));
    }
}
