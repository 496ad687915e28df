use macroquad_tile_editor::spatial::coords::CELL_SIZE;
use macroquad_tile_editor::{Editor, EditorConfig, NoIcons, Tool};

fn editor() -> Editor {
    Editor::with_standard_catalogs(EditorConfig::default(), &NoIcons)
}

fn center(row: usize, col: usize) -> (f32, f32) {
    (
        (col as f32 + 0.5) * CELL_SIZE,
        (row as f32 + 0.5) * CELL_SIZE,
    )
}

fn paint(ed: &mut Editor, visual_id: u32, cells: &[(usize, usize)]) {
    assert!(ed.select_tile(visual_id));
    ed.begin_gesture();
    for &(r, c) in cells {
        let (x, y) = center(r, c);
        ed.apply_at_point(x, y, false);
    }
}

#[test]
fn undo_then_redo_returns_to_the_edited_state() {
    let mut ed = editor();
    paint(&mut ed, 5, &[(0, 0), (0, 1)]);
    let after_first = ed.map().tiles().clone();
    paint(&mut ed, 7, &[(3, 3)]);
    let after_second = ed.map().tiles().clone();

    assert!(ed.undo());
    assert_eq!(ed.map().tiles(), &after_first);
    assert!(ed.undo());
    assert!(ed.map().tiles().as_slice().iter().all(|&t| t == 0));
    assert!(!ed.undo());

    assert!(ed.redo());
    assert!(ed.redo());
    assert_eq!(ed.map().tiles(), &after_second);
    assert!(!ed.can_redo());
}

#[test]
fn new_edit_discards_redo() {
    let mut ed = editor();
    paint(&mut ed, 5, &[(0, 0)]);
    ed.undo();
    assert!(ed.can_redo());
    paint(&mut ed, 7, &[(1, 1)]);
    assert!(!ed.can_redo());
    assert_eq!(ed.map().tile(0, 0), Some(0));
}

#[test]
fn shrink_then_grow_keeps_the_overlap() {
    let mut ed = editor();
    paint(&mut ed, 5, &[(5, 5), (20, 33)]);
    ed.select_object("crabby");
    let (x, y) = center(15, 30);
    ed.place_object_at(x, y);

    ed.resize(12, 12);
    ed.resize(21, 34);
    assert_eq!(ed.map().tile(5, 5), Some(5));
    assert_eq!(ed.map().tile(20, 33), Some(0));
    assert!(ed.map().object(15, 30).is_none());

    ed.undo();
    ed.undo();
    assert_eq!(ed.map().tile(20, 33), Some(5));
    assert!(ed.map().object(15, 30).is_some());
}

#[test]
fn resize_clamps_to_ten() {
    let mut ed = editor();
    ed.resize(2, 0);
    assert_eq!((ed.map().rows(), ed.map().cols()), (10, 10));
}

#[test]
fn only_one_finish_survives() {
    let mut ed = editor();
    ed.select_object("finish");
    for (r, c) in [(2, 3), (6, 6), (9, 1)] {
        let (x, y) = center(r, c);
        ed.place_object_at(x, y);
    }
    let finishes: Vec<_> = ed.map().placed().filter(|h| h.object.key == "finish").collect();
    assert_eq!(finishes.len(), 1);
    assert_eq!((finishes[0].row, finishes[0].col), (9, 1));

    ed.undo();
    assert_eq!(ed.map().find_key("finish").map(|h| (h.row, h.col)), Some((6, 6)));
}

#[test]
fn object_tool_drag_places_and_erases() {
    let mut ed = editor();
    ed.select_object("goldCoin");
    assert_eq!(ed.tool(), Tool::Objects);

    ed.begin_gesture();
    for c in 0..4 {
        let (x, y) = center(8, c);
        ed.apply_at_point(x, y, false);
    }
    assert_eq!(ed.map().placed().count(), 4);

    ed.begin_gesture();
    let (x, y) = center(8, 1);
    assert!(ed.apply_at_point(x, y, true));
    assert_eq!(ed.map().placed().count(), 3);

    ed.undo();
    assert_eq!(ed.map().placed().count(), 4);
    ed.undo();
    assert_eq!(ed.map().placed().count(), 0);
}

#[test]
fn clear_empties_and_undoes() {
    let mut ed = editor();
    paint(&mut ed, 5, &[(1, 1)]);
    ed.select_object("spikes");
    let (x, y) = center(2, 2);
    ed.place_object_at(x, y);

    ed.clear();
    assert_eq!(ed.map().placed().count(), 0);
    assert_eq!(ed.map().tile(1, 1), Some(0));
    ed.undo();
    assert_eq!(ed.map().placed().count(), 1);
    assert_eq!(ed.map().tile(1, 1), Some(5));
}
