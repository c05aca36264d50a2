//! Pieces module - tetromino shape table
//!
//! Shapes follow the classic (NES) rotation system: every rotation state is a
//! list of four `(row, col)` offsets from the anchor cell, with rows growing
//! downwards. Pieces with rotational symmetry carry fewer states (O: 1,
//! I/S/Z: 2, T/J/L: 4).

use crate::types::{BlockTag, Coord, Placement, PieceKind};

/// Offset of a single mino relative to the anchor, as (row, col)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 0), (0, 1), (0, -1)],
    [(1, 0), (0, 0), (-1, 0), (0, -1)],
    [(0, -1), (0, 0), (0, 1), (-1, 0)],
    [(1, 0), (0, 0), (0, 1), (-1, 0)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, -1), (0, 0), (0, 1), (1, 1)],
    [(-1, 0), (0, 0), (1, -1), (1, 0)],
    [(-1, -1), (0, -1), (0, 0), (0, 1)],
    [(-1, 0), (-1, 1), (0, 0), (1, 0)],
];

const Z_SHAPES: [PieceShape; 2] = [
    [(0, -1), (0, 0), (1, 0), (1, 1)],
    [(-1, 1), (0, 0), (0, 1), (1, 0)],
];

const O_SHAPES: [PieceShape; 1] = [[(0, -1), (0, 0), (1, -1), (1, 0)]];

const S_SHAPES: [PieceShape; 2] = [
    [(0, 0), (0, 1), (1, -1), (1, 0)],
    [(-1, 0), (0, 0), (0, 1), (1, 1)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(0, -1), (0, 0), (0, 1), (1, -1)],
    [(-1, -1), (-1, 0), (0, 0), (1, 0)],
    [(-1, 1), (0, -1), (0, 0), (0, 1)],
    [(-1, 0), (0, 0), (1, 0), (1, 1)],
];

const I_SHAPES: [PieceShape; 2] = [
    [(0, -2), (0, -1), (0, 0), (0, 1)],
    [(-2, 0), (-1, 0), (0, 0), (1, 0)],
];

/// All rotation states of a piece
pub fn rotations(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::T => &T_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::I => &I_SHAPES,
    }
}

/// Get the mino offsets for a piece kind and rotation index
///
/// Rotation indices wrap modulo the piece's rotation count, so any `u8` is
/// accepted.
pub fn get_shape(kind: PieceKind, rot: u8) -> &'static PieceShape {
    let states = rotations(kind);
    &states[rot as usize % states.len()]
}

/// Visual tag used when a piece is stamped onto the board
pub fn piece_tag(kind: PieceKind) -> BlockTag {
    match kind {
        PieceKind::T | PieceKind::O | PieceKind::I => BlockTag::Primary,
        PieceKind::J | PieceKind::S => BlockTag::Secondary,
        PieceKind::Z | PieceKind::L => BlockTag::Tertiary,
    }
}

/// Absolute cells covered by a placement, including off-board ones
pub fn footprint(kind: PieceKind, placement: Placement) -> [Coord; 4] {
    let shape = *get_shape(kind, placement.rot);
    shape.map(|(dr, dc)| {
        Coord::new(placement.row.saturating_add(dr), placement.col.saturating_add(dc))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_tables_match_rotation_counts() {
        for kind in PieceKind::ALL {
            assert_eq!(rotations(kind).len(), kind.rotation_count() as usize);
        }
    }

    #[test]
    fn every_state_has_four_distinct_minos_including_anchor() {
        for kind in PieceKind::ALL {
            for shape in rotations(kind) {
                assert!(shape.contains(&(0, 0)), "{kind:?} {shape:?}");
                for (i, a) in shape.iter().enumerate() {
                    for b in &shape[i + 1..] {
                        assert_ne!(a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(get_shape(PieceKind::I, 2), get_shape(PieceKind::I, 0));
        assert_eq!(get_shape(PieceKind::O, 3), get_shape(PieceKind::O, 0));
        assert_eq!(get_shape(PieceKind::T, 5), get_shape(PieceKind::T, 1));
    }
}
