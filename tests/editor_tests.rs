//! Edit engine tests - strokes, column fill, placement, undo and events

use tetris_editor::core::{Board, ChangeEvent, Editor, EventLog};
use tetris_editor::types::{BlockTag, ChangeReason, Coord, DrawMode, PieceKind, Placement};

fn editor() -> Editor<EventLog> {
    Editor::new(EventLog::new())
}

/// Press at `from`, drag to `to`, release.
fn stroke(ed: &mut Editor<EventLog>, from: (i8, i8), to: (i8, i8)) {
    ed.pointer_down(Coord::new(from.0, from.1), false);
    ed.pointer_move(Some(Coord::new(to.0, to.1)));
    ed.pointer_up();
}

fn filled(board: &Board, row: i8, col: i8) -> bool {
    board.is_filled(row, col).unwrap()
}

#[test]
fn drag_paints_a_gap_free_stroke_and_releases_once() {
    let mut ed = editor();
    stroke(&mut ed, (10, 0), (10, 9));

    assert!(ed.board().is_row_full(10));
    assert_eq!(
        ed.listener().reasons(),
        vec![ChangeReason::Drag, ChangeReason::Drag, ChangeReason::Release]
    );
    assert_eq!(ed.history_len(), 2);
}

#[test]
fn stroke_from_filled_cell_erases_only() {
    let mut ed = editor();
    stroke(&mut ed, (19, 0), (19, 4));
    ed.listener_mut().clear();

    // Start on a filled cell and sweep into empty ones.
    stroke(&mut ed, (19, 2), (19, 9));
    for col in 0..10 {
        assert_eq!(filled(ed.board(), 19, col), col < 2, "col {col}");
    }
    assert_eq!(*ed.listener().events.last().unwrap(), ChangeEvent::Release);
}

#[test]
fn column_fill_on_empty_board() {
    let mut ed = editor();
    ed.pointer_down(Coord::new(12, 6), true);
    assert_eq!(ed.draw_mode(), DrawMode::Column);
    ed.pointer_up();

    let board = ed.board();
    for row in 0..20 {
        assert_eq!(filled(board, row, 6), row >= 12, "row {row}");
        for col in (0..10).filter(|c| *c != 6) {
            assert!(!filled(board, row, col));
        }
    }
}

#[test]
fn column_fill_clears_above_and_keeps_existing_tags() {
    let mut ed = editor();
    ed.pointer_down(Coord::new(3, 2), false);
    ed.pointer_up();
    ed.pointer_down(Coord::new(19, 2), false);
    ed.pointer_up();
    let bottom_tag = ed.board().get(19, 2).unwrap();

    ed.modifier_down();
    ed.pointer_down(Coord::new(15, 2), false);
    ed.pointer_move(Some(Coord::new(15, 3)));
    ed.pointer_up();
    ed.modifier_up();

    assert!(!filled(ed.board(), 3, 2));
    assert_eq!(ed.board().get(19, 2).unwrap(), bottom_tag);
    assert_eq!(ed.board().filled_count(), 10);
}

#[test]
fn placement_clears_rows_and_keeps_survivor_order() {
    let mut ed = editor();
    stroke(&mut ed, (19, 0), (19, 8));
    stroke(&mut ed, (17, 0), (17, 8));
    stroke(&mut ed, (18, 2), (18, 2));
    stroke(&mut ed, (16, 4), (16, 4));
    ed.listener_mut().clear();

    // Vertical I in the last column completes rows 17 and 19.
    let cleared = ed.place(PieceKind::I, Placement::new(1, 18, 9), Some(PieceKind::S));
    assert_eq!(cleared, 2);

    let board = ed.board();
    assert_eq!(board.filled_count(), 4);
    assert!(filled(board, 18, 4) && filled(board, 18, 9));
    assert!(filled(board, 19, 2) && filled(board, 19, 9));
    assert_eq!(board.get(19, 9), Ok(Some(BlockTag::Primary)));
    for row in 0..18 {
        assert!(board.row(row).iter().all(Option::is_none));
    }
    assert_eq!(
        ed.listener().events,
        vec![ChangeEvent::Placement {
            lines_cleared: 2,
            next_piece: Some(PieceKind::S)
        }]
    );
}

#[test]
fn placement_drops_off_board_minos() {
    let mut ed = editor();
    let cleared = ed.place(PieceKind::I, Placement::new(1, 0, 0), None);
    assert_eq!(cleared, 0);
    assert_eq!(ed.board().filled_count(), 2);
    assert!(filled(ed.board(), 0, 0) && filled(ed.board(), 1, 0));
}

#[test]
fn undo_restores_previous_grid_exactly() {
    let mut ed = editor();
    stroke(&mut ed, (19, 0), (19, 6));
    stroke(&mut ed, (18, 3), (14, 3));
    let before = ed.board().clone();

    ed.place(PieceKind::T, Placement::new(2, 17, 7), None);
    assert_ne!(ed.board(), &before);
    assert!(ed.undo());
    assert_eq!(ed.board(), &before);
    assert_eq!(ed.listener().events.last(), Some(&ChangeEvent::Undo));
}

#[test]
fn history_cap_bounds_undo_depth() {
    let cap = 5;
    let mut ed = Editor::with_history_cap(EventLog::new(), cap, 7);
    for col in 0..8 {
        ed.pointer_down(Coord::new(19, col), false);
        ed.pointer_up();
    }
    assert_eq!(ed.history_len(), cap);

    for _ in 0..cap - 1 {
        assert!(ed.undo());
    }
    // Oldest kept state: commits 1..=4.
    assert_eq!(ed.board().filled_count(), 4);
    assert!(!ed.undo());
    assert!(!ed.undo());
    assert_eq!(ed.board().filled_count(), 4);
}

#[test]
fn preview_never_touches_the_board_or_listener() {
    let mut ed = editor();
    stroke(&mut ed, (19, 0), (19, 3));
    let before = ed.board().clone();
    let events = ed.listener().events.len();

    ed.preview_piece(PieceKind::L, Placement::new(0, 10, 5));
    assert_eq!(ed.preview_cells().len(), 4);
    ed.preview_piece(PieceKind::I, Placement::new(1, 0, 0));
    assert_eq!(ed.preview_cells().len(), 2);
    ed.clear_preview();

    assert!(ed.preview().is_none());
    assert_eq!(ed.board(), &before);
    assert_eq!(ed.listener().events.len(), events);
}

#[test]
fn leaving_the_board_mid_stroke_commits_it() {
    let mut ed = editor();
    ed.pointer_down(Coord::new(5, 5), false);
    ed.pointer_move(Some(Coord::new(5, 7)));
    ed.pointer_move(None);

    assert!(!ed.is_stroke_active());
    assert!(ed.cursor().is_none());
    assert_eq!(ed.history_len(), 2);
    assert_eq!(ed.listener().events.last(), Some(&ChangeEvent::Release));
}

#[test]
fn clear_is_one_undoable_commit() {
    let mut ed = editor();
    stroke(&mut ed, (19, 0), (19, 9));
    let before = ed.board().clone();
    ed.clear();
    assert!(ed.board().is_empty());
    ed.clear();
    assert_eq!(ed.history_len(), 3);
    assert!(ed.undo());
    assert_eq!(ed.board(), &before);
}

#[test]
fn closure_listener_sees_board_after_mutation() {
    let mut seen = Vec::new();
    {
        let mut ed = Editor::new(|board: &Board, event: &ChangeEvent| {
            seen.push((event.reason(), board.filled_count()));
        });
        ed.pointer_down(Coord::new(0, 0), false);
        ed.pointer_up();
        ed.undo();
    }
    assert_eq!(
        seen,
        vec![
            (ChangeReason::Drag, 1),
            (ChangeReason::Release, 1),
            (ChangeReason::Undo, 0)
        ]
    );
}
