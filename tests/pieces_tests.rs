//! Pieces module tests - classic shape table and footprints

use tetris_editor::core::pieces::rotations;
use tetris_editor::core::{footprint, get_shape, piece_tag};
use tetris_editor::types::{BlockTag, Coord, PieceKind, Placement};

#[test]
fn test_rotation_counts() {
    for kind in PieceKind::ALL {
        assert_eq!(rotations(kind).len(), kind.rotation_count() as usize, "{kind:?}");
    }
    assert_eq!(PieceKind::O.rotation_count(), 1);
    assert_eq!(PieceKind::I.rotation_count(), 2);
    assert_eq!(PieceKind::T.rotation_count(), 4);
}

#[test]
fn test_every_state_has_four_distinct_minos_including_anchor() {
    for kind in PieceKind::ALL {
        for shape in rotations(kind) {
            for (i, a) in shape.iter().enumerate() {
                for b in &shape[i + 1..] {
                    assert_ne!(a, b, "{kind:?} has overlapping minos");
                }
            }
            // The anchor cell is part of every state.
            assert!(shape.contains(&(0, 0)), "{kind:?} missing anchor");
        }
    }
}

#[test]
fn test_rotation_index_wraps() {
    assert_eq!(get_shape(PieceKind::I, 2), get_shape(PieceKind::I, 0));
    assert_eq!(get_shape(PieceKind::T, 5), get_shape(PieceKind::T, 1));
    assert_eq!(get_shape(PieceKind::O, 3), get_shape(PieceKind::O, 0));
}

#[test]
fn test_horizontal_i_footprint() {
    let cells = footprint(PieceKind::I, Placement::new(0, 19, 5));
    assert_eq!(
        cells,
        [
            Coord::new(19, 3),
            Coord::new(19, 4),
            Coord::new(19, 5),
            Coord::new(19, 6)
        ]
    );
}

#[test]
fn test_vertical_i_footprint_can_leave_the_board() {
    let cells = footprint(PieceKind::I, Placement::new(1, 0, 0));
    let off_board = cells.iter().filter(|c| !c.in_bounds()).count();
    assert_eq!(off_board, 2);
}

#[test]
fn test_piece_tags() {
    assert_eq!(piece_tag(PieceKind::T), BlockTag::Primary);
    assert_eq!(piece_tag(PieceKind::O), BlockTag::Primary);
    assert_eq!(piece_tag(PieceKind::I), BlockTag::Primary);
    assert_eq!(piece_tag(PieceKind::J), BlockTag::Secondary);
    assert_eq!(piece_tag(PieceKind::S), BlockTag::Secondary);
    assert_eq!(piece_tag(PieceKind::Z), BlockTag::Tertiary);
    assert_eq!(piece_tag(PieceKind::L), BlockTag::Tertiary);
}
