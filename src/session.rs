//! Editor session: one open file and its surrounding state
//!
//! The session is the single object the input, render, file-I/O, and search
//! layers talk to. It owns the syntax registry, the buffer of the open
//! file, the user's persisted preferences, and the dirty counter those
//! layers consult. There is exactly one writer (the input layer) and every
//! mutation returns with the buffer fully re-highlighted, so collaborators
//! never observe partial state.

use crate::buffer::{Buffer, Row};
use crate::config::EditorConfig;
use crate::syntax::{Highlight, LanguageProfile, ProfileError, SyntaxRegistry};

/// Session state for one open buffer.
#[derive(Debug)]
pub struct EditorSession {
    registry: SyntaxRegistry,
    buffer: Buffer,
    filename: Option<String>,
    config: EditorConfig,
    dirty: usize,
}

impl EditorSession {
    /// Create a session with an empty unnamed buffer.
    ///
    /// Registry canonicalization runs here, once; a broken profile table is
    /// fatal before any file is opened.
    pub fn new(config: EditorConfig) -> Result<Self, ProfileError> {
        let registry = SyntaxRegistry::with_builtin_profiles()?;
        Ok(Self {
            registry,
            buffer: Buffer::from_lines(None, std::iter::empty::<String>()),
            filename: None,
            config,
            dirty: 0,
        })
    }

    /// Open a file's lines, selecting the language profile by filename.
    /// A session with no filename, or one matching no profile, runs in
    /// plain-text mode.
    pub fn open<I, S>(&mut self, filename: Option<&str>, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let profile = filename
            .and_then(|name| self.registry.select_profile(name))
            .cloned();
        tracing::debug!(
            filename,
            profile = profile.as_ref().map(|p| p.name),
            "opening buffer"
        );
        self.buffer = Buffer::from_lines(profile, lines);
        self.filename = filename.map(str::to_string);
        self.dirty = 0;
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Display label of the active profile, for the status bar.
    pub fn filetype(&self) -> Option<&'static str> {
        self.buffer.profile().map(|p| p.name)
    }

    pub fn profile(&self) -> Option<&LanguageProfile> {
        self.buffer.profile()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.buffer.row(at)
    }

    pub fn row_count(&self) -> usize {
        self.buffer.row_count()
    }

    /// Newline-joined row text, for the save collaborator.
    pub fn contents(&self) -> String {
        self.buffer.contents()
    }

    /// Unsaved-change counter; each mutation bumps it.
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Called by the save collaborator after a successful write.
    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    // ------------------------------------------------------------------
    // Buffer mutations
    // ------------------------------------------------------------------

    pub fn insert_row(&mut self, at: usize, text: String) {
        if self.buffer.insert_row(at, text) {
            self.dirty += 1;
        }
    }

    pub fn delete_row(&mut self, at: usize) {
        if self.buffer.delete_row(at) {
            self.dirty += 1;
        }
    }

    pub fn set_row_text(&mut self, at: usize, text: String) {
        if self.buffer.set_row_text(at, text) {
            self.dirty += 1;
        }
    }

    pub fn insert_char(&mut self, at: usize, col: usize, ch: char) {
        if self.buffer.insert_char(at, col, ch) {
            self.dirty += 1;
        }
    }

    pub fn delete_char(&mut self, at: usize, col: usize) {
        if self.buffer.delete_char(at, col) {
            self.dirty += 1;
        }
    }

    pub fn split_row(&mut self, at: usize, col: usize) {
        if self.buffer.split_row(at, col) {
            self.dirty += 1;
        }
    }

    pub fn join_rows(&mut self, at: usize) {
        if self.buffer.join_rows(at) {
            self.dirty += 1;
        }
    }

    // ------------------------------------------------------------------
    // Renderer and search queries
    // ------------------------------------------------------------------

    /// Category at a render column. When the user has highlighting toggled
    /// off, everything reads `Normal`; stored highlight state is untouched
    /// so toggling back on costs nothing.
    pub fn highlight_at(&self, at: usize, rx: usize) -> Highlight {
        if !self.config.highlighting {
            return Highlight::Normal;
        }
        self.buffer.highlight_at(at, rx)
    }

    /// Overlay a search match; not an edit, so the dirty counter is
    /// untouched.
    pub fn apply_transient_match(&mut self, at: usize, rx: usize, len: usize) {
        self.buffer.apply_transient_match(at, rx, len);
    }

    pub fn clear_transient_match(&mut self) {
        self.buffer.clear_transient_match();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession {
        EditorSession::new(EditorConfig::default()).unwrap()
    }

    #[test]
    fn test_open_selects_profile_by_filename() {
        let mut session = session();
        session.open(Some("main.c"), ["int x;"]);
        assert_eq!(session.filetype(), Some("C"));

        session.open(Some("notes"), ["int x;"]);
        assert_eq!(session.filetype(), None);
    }

    #[test]
    fn test_mutations_bump_dirty_counter() {
        let mut session = session();
        session.open(Some("main.c"), ["int x;"]);
        assert!(!session.is_dirty());

        session.insert_char(0, 0, '/');
        session.delete_char(0, 0);
        session.insert_row(1, "y".to_string());
        session.delete_row(1);
        assert_eq!(session.dirty(), 4);

        session.mark_clean();
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_highlighting_toggle_masks_categories() {
        let mut session = session();
        session.open(Some("main.c"), ["int x;"]);
        assert_eq!(session.highlight_at(0, 0), Highlight::Keyword2);

        session.config_mut().highlighting = false;
        assert_eq!(session.highlight_at(0, 0), Highlight::Normal);

        // Stored state survives the toggle.
        session.config_mut().highlighting = true;
        assert_eq!(session.highlight_at(0, 0), Highlight::Keyword2);
    }

    #[test]
    fn test_contents_round_trip() {
        let mut session = session();
        session.open(Some("main.c"), ["int x;", "", "int y;"]);
        assert_eq!(session.contents(), "int x;\n\nint y;");
    }
}
