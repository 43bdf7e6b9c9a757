//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use stanza::{EditorConfig, EditorSession};

/// Create a session with the given filename and lines opened.
pub fn session_for(filename: &str, lines: &[&str]) -> EditorSession {
    let mut session = EditorSession::new(EditorConfig::default()).expect("builtin profiles valid");
    session.open(Some(filename), lines.iter().copied());
    session
}

/// Create a session in plain-text mode (no filename, no profile).
pub fn plain_session(lines: &[&str]) -> EditorSession {
    let mut session = EditorSession::new(EditorConfig::default()).expect("builtin profiles valid");
    session.open(None, lines.iter().copied());
    session
}

/// Highlight categories of one row as a Vec, for whole-row assertions.
pub fn row_highlights(session: &EditorSession, at: usize) -> Vec<stanza::Highlight> {
    session.row(at).expect("row exists").highlight().to_vec()
}
