use tetris_editor::core::{Editor, NoopListener};
use tetris_editor::term::{palette_for_level, BoardView, FrameBuffer, PanelView, Viewport};
use tetris_editor::types::{BlockTag, Coord, PieceKind, Placement};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

fn ch_at_cell(fb: &FrameBuffer, view: &BoardView, vp: Viewport, row: u16, col: u16) -> [char; 2] {
    let layout = view.layout(vp);
    let x = layout.origin_x + col * 2;
    let y = layout.origin_y + row;
    [fb.get(x, y).unwrap().ch, fb.get(x + 1, y).unwrap().ch]
}

#[test]
fn board_view_renders_border_corners() {
    let editor = Editor::new(NoopListener);
    let view = BoardView::default();
    // 10*2 by 20*1 cells plus border: 22x22.
    let fb = view.render(&editor, &PanelView::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn filled_cell_is_two_chars_wide_in_level_color() {
    let mut editor = Editor::new(NoopListener);
    editor.place(PieceKind::O, Placement::new(0, 19, 1), None);
    editor.set_level(22);

    let view = BoardView::default();
    let vp = Viewport::new(40, 22);
    let fb = view.render(&editor, &PanelView::default(), vp);

    assert_eq!(ch_at_cell(&fb, &view, vp, 19, 0), ['█', '█']);
    let layout = view.layout(vp);
    let glyph = fb.get(layout.origin_x, layout.origin_y + 19).unwrap();
    assert_eq!(glyph.style.fg, palette_for_level(22).color(BlockTag::Primary));
    assert_eq!(ch_at_cell(&fb, &view, vp, 0, 0), ['·', '·']);
}

#[test]
fn column_hover_covers_cursor_to_bottom() {
    let mut editor = Editor::new(NoopListener);
    editor.modifier_down();
    editor.pointer_move(Some(Coord::new(15, 4)));

    let view = BoardView::default();
    let vp = Viewport::new(40, 22);
    let fb = view.render(&editor, &PanelView::default(), vp);

    for row in 0..20 {
        let expected = if row >= 15 { '▒' } else { '·' };
        assert_eq!(ch_at_cell(&fb, &view, vp, row, 4)[0], expected, "row {row}");
    }
    assert!(screen_text(&fb).contains("COLUMN"));
}

#[test]
fn preview_footprint_is_drawn_without_touching_board() {
    let mut editor = Editor::new(NoopListener);
    editor.preview_piece(PieceKind::I, Placement::new(0, 10, 5));

    let view = BoardView::default();
    let vp = Viewport::new(40, 22);
    let fb = view.render(&editor, &PanelView::default(), vp);

    for col in 3..=6 {
        assert_eq!(ch_at_cell(&fb, &view, vp, 10, col)[0], '▓');
    }
    assert_eq!(editor.board().filled_count(), 0);
}

#[test]
fn side_panel_shows_params_and_warnings() {
    let mut editor = Editor::new(NoopListener);
    editor.pointer_down(Coord::new(19, 0), false);
    editor.pointer_up();

    let warnings = ["odd cell count"];
    let panel = PanelView {
        piece: PieceKind::Z,
        rotation: 1,
        lines: 31,
        warnings: &warnings,
        status: "ready",
        ..PanelView::default()
    };
    let fb = BoardView::default().render(&editor, &panel, Viewport::new(60, 24));
    let text = screen_text(&fb);

    assert!(text.contains("PIECE  Z r1"));
    assert!(text.contains("LINES  31"));
    assert!(text.contains("CELLS  1"));
    assert!(text.contains("UNDO   1"));
    assert!(text.contains("odd cell count"));
    assert!(text.contains("ready"));
}

#[test]
fn narrow_viewport_drops_the_panel() {
    let editor = Editor::new(NoopListener);
    let fb = BoardView::default().render(&editor, &PanelView::default(), Viewport::new(30, 22));
    assert!(!screen_text(&fb).contains("LEVEL"));
}
