//! The row buffer
//!
//! An ordered, index-addressable sequence of [`Row`]s. The buffer owns the
//! full row lifecycle: every mutation renumbers downstream rows, rebuilds
//! the affected row's render cache, and re-runs the highlighter before
//! returning, cascading across rows while the trailing block-comment flag
//! keeps changing. Between operations the buffer is always fully rendered
//! and fully highlighted.

mod row;

pub use row::{Row, TAB_STOP};

use crate::syntax::{Highlight, LanguageProfile};

/// Undo record for the transient search-match overlay.
#[derive(Debug, Clone)]
struct SavedMatch {
    row: usize,
    hl: Vec<Highlight>,
}

/// The line buffer for one open file.
#[derive(Debug)]
pub struct Buffer {
    rows: Vec<Row>,
    /// Owned copy of the selected language profile; `None` is plain-text
    /// mode and leaves every character `Normal`.
    profile: Option<LanguageProfile>,
    saved_match: Option<SavedMatch>,
}

impl Buffer {
    /// Build a fully-highlighted buffer from raw lines.
    pub fn from_lines<I, S>(profile: Option<LanguageProfile>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| Row::new(idx, line.into()))
            .collect();
        let mut buffer = Self {
            rows,
            profile,
            saved_match: None,
        };
        buffer.highlight_all();
        buffer
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn profile(&self) -> Option<&LanguageProfile> {
        self.profile.as_ref()
    }

    /// Buffer content as the file-I/O collaborator persists it: row text
    /// joined with newlines.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(row.text());
        }
        out
    }

    /// Category at a render column, for the renderer's color lookup.
    pub fn highlight_at(&self, at: usize, rx: usize) -> Highlight {
        self.rows
            .get(at)
            .map(|row| row.highlight_at(rx))
            .unwrap_or(Highlight::Normal)
    }

    // ------------------------------------------------------------------
    // Mutations. All of them clamp or reject out-of-range indices rather
    // than corrupt state, then restore the fully-highlighted invariant.
    // ------------------------------------------------------------------

    /// Insert a row at `at`, shifting the rest down. `at` past the end is
    /// rejected as a no-op. Returns whether the buffer changed.
    pub fn insert_row(&mut self, at: usize, text: String) -> bool {
        if at > self.rows.len() {
            return false;
        }
        self.drop_transient_match();
        self.rows.insert(at, Row::new(at, text));
        self.renumber_from(at + 1);
        self.rehighlight_from(at);
        true
    }

    /// Delete the row at `at`, shifting the rest up. The row that moves
    /// into the gap may now follow a different predecessor, so it is
    /// rescanned (and the scan cascades as usual).
    pub fn delete_row(&mut self, at: usize) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.drop_transient_match();
        self.rows.remove(at);
        self.renumber_from(at);
        self.rehighlight_from(at);
        true
    }

    /// Replace a row's raw text wholesale.
    pub fn set_row_text(&mut self, at: usize, text: String) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.drop_transient_match();
        self.rows[at].set_text(text);
        self.rehighlight_from(at);
        true
    }

    /// Insert one character; a column past end of row appends.
    pub fn insert_char(&mut self, at: usize, col: usize, ch: char) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.drop_transient_match();
        self.rows[at].insert_char(col, ch);
        self.rehighlight_from(at);
        true
    }

    /// Delete one character; a column past end of row is a no-op.
    pub fn delete_char(&mut self, at: usize, col: usize) -> bool {
        if at >= self.rows.len() || col >= self.rows[at].text().len() {
            return false;
        }
        self.drop_transient_match();
        self.rows[at].delete_char(col);
        self.rehighlight_from(at);
        true
    }

    /// Split a row at a column: the tail becomes a new row below it.
    pub fn split_row(&mut self, at: usize, col: usize) -> bool {
        if at >= self.rows.len() {
            return false;
        }
        self.drop_transient_match();
        let tail = self.rows[at].split_text(col);
        self.rows.insert(at + 1, Row::new(at + 1, tail));
        self.renumber_from(at + 1);
        self.rehighlight_from(at);
        true
    }

    /// Join the row below `at` onto the end of row `at`.
    pub fn join_rows(&mut self, at: usize) -> bool {
        if at + 1 >= self.rows.len() {
            return false;
        }
        self.drop_transient_match();
        let tail = self.rows.remove(at + 1);
        self.rows[at].append_text(tail.text());
        self.renumber_from(at + 1);
        self.rehighlight_from(at);
        true
    }

    // ------------------------------------------------------------------
    // Transient search-match overlay
    // ------------------------------------------------------------------

    /// Overlay `Match` over a span of rendered characters, saving the row's
    /// highlight array first. Only one overlay exists at a time: applying a
    /// second restores the first. The overlay is not part of persisted
    /// highlight state and any buffer mutation restores it.
    pub fn apply_transient_match(&mut self, at: usize, rx: usize, len: usize) {
        self.clear_transient_match();
        let Some(row) = self.rows.get_mut(at) else {
            return;
        };
        let hl = row.hl_mut();
        if rx >= hl.len() || len == 0 {
            return;
        }
        let saved = hl.clone();
        let end = (rx + len).min(hl.len());
        hl[rx..end].fill(Highlight::Match);
        self.saved_match = Some(SavedMatch { row: at, hl: saved });
    }

    /// Restore the highlight array saved by the last
    /// [`Buffer::apply_transient_match`].
    pub fn clear_transient_match(&mut self) {
        if let Some(saved) = self.saved_match.take() {
            if let Some(row) = self.rows.get_mut(saved.row) {
                *row.hl_mut() = saved.hl;
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Mutations restore the overlay before touching rows, so a stale
    /// overlay can never survive an edit or outlive its row.
    fn drop_transient_match(&mut self) {
        self.clear_transient_match();
    }

    fn renumber_from(&mut self, at: usize) {
        for (idx, row) in self.rows.iter_mut().enumerate().skip(at) {
            row.set_idx(idx);
        }
    }

    /// One unconditional pass over every row, used when the buffer is
    /// first built. Edits go through [`Buffer::rehighlight_from`] instead,
    /// which stops as soon as the trailing flag settles.
    fn highlight_all(&mut self) {
        let profile = self.profile.as_ref();
        let rows = &mut self.rows;
        for current in 0..rows.len() {
            let seeded = current > 0 && rows[current - 1].ends_in_block_comment();
            rows[current].rescan(seeded, profile);
        }
    }

    /// Rescan rows starting at `at`, walking forward while the trailing
    /// block-comment flag keeps changing. Expressed as a loop rather than
    /// recursion so a pathological file cannot grow the call stack; it
    /// halts at the first row whose recomputed flag matches its stored one.
    fn rehighlight_from(&mut self, at: usize) {
        let profile = self.profile.as_ref();
        let rows = &mut self.rows;

        let mut current = at;
        while current < rows.len() {
            let seeded = current > 0 && rows[current - 1].ends_in_block_comment();
            let changed = rows[current].rescan(seeded, profile);
            if !changed {
                break;
            }
            current += 1;
        }
        if current > at + 1 {
            tracing::trace!(start = at, rows = current - at, "highlight cascade");
        }
    }
}
