//! Buffer editing tests - row lifecycle, clamping, and session state

mod common;

use common::session_for;
use stanza::Highlight;

// ========================================================================
// Row lifecycle
// ========================================================================

#[test]
fn test_insert_and_delete_rows_renumber() {
    let mut session = session_for("main.c", &["a;", "b;", "c;"]);

    session.insert_row(1, "x;".to_string());
    assert_eq!(session.contents(), "a;\nx;\nb;\nc;");

    session.delete_row(0);
    assert_eq!(session.contents(), "x;\nb;\nc;");

    for at in 0..session.row_count() {
        assert_eq!(session.row(at).unwrap().idx(), at);
    }
}

#[test]
fn test_char_edits_rebuild_render_and_highlight() {
    let mut session = session_for("main.c", &["nt x;"]);

    session.insert_char(0, 0, 'i');
    let row = session.row(0).unwrap();
    assert_eq!(row.text(), "int x;");
    assert_eq!(row.highlight()[0..3], [Highlight::Keyword2; 3]);

    session.delete_char(0, 0);
    let row = session.row(0).unwrap();
    assert_eq!(row.text(), "nt x;");
    assert_eq!(row.highlight()[0], Highlight::Normal);
}

#[test]
fn test_newline_and_backspace_at_line_start() {
    let mut session = session_for("main.c", &["int x;int y;"]);

    // Enter in the middle of a row.
    session.split_row(0, 6);
    assert_eq!(session.contents(), "int x;\nint y;");
    assert_eq!(session.highlight_at(1, 0), Highlight::Keyword2);

    // Backspace at column 0 joins back.
    session.join_rows(0);
    assert_eq!(session.contents(), "int x;int y;");
}

#[test]
fn test_edit_splitting_block_comment_reseeds_downstream() {
    let mut session = session_for("main.c", &["int a; /* c */ int b;", "int c;"]);
    assert!(!session.row(0).unwrap().ends_in_block_comment());

    // Split between the open and close delimiters: the first row now ends
    // inside the comment and the tail row starts inside it.
    session.split_row(0, 10);
    assert!(session.row(0).unwrap().ends_in_block_comment());
    assert_eq!(session.highlight_at(1, 0), Highlight::Comment);
    assert!(!session.row(1).unwrap().ends_in_block_comment());

    // The row below is reseeded to normal once the tail closes the comment.
    assert_eq!(session.highlight_at(2, 0), Highlight::Keyword2);
}

// ========================================================================
// Out-of-range handling
// ========================================================================

#[test]
fn test_out_of_range_indices_never_corrupt_state() {
    let mut session = session_for("main.c", &["int x;"]);

    session.insert_row(9, "nope".to_string());
    session.delete_row(9);
    session.set_row_text(9, "nope".to_string());
    session.delete_char(0, 99);
    session.split_row(9, 0);
    session.join_rows(9);
    assert_eq!(session.contents(), "int x;");

    // Rejected operations do not mark the buffer dirty.
    assert_eq!(session.dirty(), 0);

    // Insert clamps the column to end of row.
    session.insert_char(0, 99, '!');
    assert_eq!(session.contents(), "int x;!");
    assert_eq!(session.dirty(), 1);

    assert_eq!(session.highlight_at(9, 0), Highlight::Normal);
}

// ========================================================================
// Dirty tracking
// ========================================================================

#[test]
fn test_dirty_counter_tracks_mutations() {
    let mut session = session_for("main.c", &["int x;"]);
    assert_eq!(session.dirty(), 0);

    session.insert_char(0, 6, ' ');
    session.split_row(0, 3);
    session.join_rows(0);
    assert_eq!(session.dirty(), 3);

    session.mark_clean();
    assert_eq!(session.dirty(), 0);

    // The search overlay is not an edit.
    session.apply_transient_match(0, 0, 3);
    session.clear_transient_match();
    assert!(!session.is_dirty());
}
