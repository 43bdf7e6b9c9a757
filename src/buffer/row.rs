//! One line of the buffer
//!
//! A row stores its raw text plus two derived caches: the tab-expanded
//! render form and the per-rendered-character highlight array. The caches
//! are rebuilt whole whenever the text changes, never patched in place.

use crate::syntax::{scan_row, Highlight, LanguageProfile};

/// Tab stops sit at every multiple of this rendered column count.
pub const TAB_STOP: usize = 8;

/// A single line: raw text, render cache, highlight cache, and the flag
/// recording whether an unterminated block comment is still open at end of
/// line (seeding the next row's scan).
#[derive(Debug, Clone)]
pub struct Row {
    idx: usize,
    text: String,
    render: String,
    hl: Vec<Highlight>,
    ends_in_block_comment: bool,
}

impl Row {
    pub(crate) fn new(idx: usize, text: String) -> Self {
        let render = expand_tabs(&text);
        Self {
            idx,
            text,
            render,
            hl: Vec::new(),
            ends_in_block_comment: false,
        }
    }

    /// Position in the buffer; always equals the storage index.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Raw characters, tabs included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tab-expanded form, what the renderer draws.
    pub fn render(&self) -> &str {
        &self.render
    }

    /// One category per rendered character, same length as [`Row::render`].
    pub fn highlight(&self) -> &[Highlight] {
        &self.hl
    }

    /// Category at a render column, `Normal` past end of row.
    pub fn highlight_at(&self, rx: usize) -> Highlight {
        self.hl.get(rx).copied().unwrap_or(Highlight::Normal)
    }

    pub fn ends_in_block_comment(&self) -> bool {
        self.ends_in_block_comment
    }

    /// Render column the cursor occupies for a character index.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &byte in self.text.as_bytes().iter().take(cx) {
            if byte == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Inverse of [`Row::cx_to_rx`]: first character index whose rendered
    /// width exceeds `rx`. Landing inside a tab's expansion resolves to the
    /// character owning the tab; at or past end of row, `text.len()`.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &byte) in self.text.as_bytes().iter().enumerate() {
            if byte == b'\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.text.len()
    }

    pub(crate) fn set_idx(&mut self, idx: usize) {
        self.idx = idx;
    }

    /// Replace the raw text and rebuild the render cache. The highlight
    /// cache is stale until the owning buffer rescans the row.
    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
        self.render = expand_tabs(&self.text);
    }

    pub(crate) fn insert_char(&mut self, at: usize, ch: char) {
        let at = at.min(self.text.len());
        self.text.insert(at, ch);
        self.render = expand_tabs(&self.text);
    }

    /// Out-of-range deletes are a no-op.
    pub(crate) fn delete_char(&mut self, at: usize) {
        if at >= self.text.len() {
            return;
        }
        self.text.remove(at);
        self.render = expand_tabs(&self.text);
    }

    pub(crate) fn append_text(&mut self, tail: &str) {
        self.text.push_str(tail);
        self.render = expand_tabs(&self.text);
    }

    /// Truncate at `at` and return the tail.
    pub(crate) fn split_text(&mut self, at: usize) -> String {
        let at = at.min(self.text.len());
        let tail = self.text.split_off(at);
        self.render = expand_tabs(&self.text);
        tail
    }

    /// Re-run the highlighter over this row. Returns whether the trailing
    /// block-comment flag changed, which tells the buffer to cascade to the
    /// next row.
    pub(crate) fn rescan(&mut self, seeded: bool, profile: Option<&LanguageProfile>) -> bool {
        let (hl, open) = scan_row(&self.render, seeded, profile);
        self.hl = hl;
        let changed = self.ends_in_block_comment != open;
        self.ends_in_block_comment = open;
        changed
    }

    pub(crate) fn hl_mut(&mut self) -> &mut Vec<Highlight> {
        &mut self.hl
    }
}

/// Expand tabs so the next character starts at the next multiple-of-8
/// rendered column. Stops are measured against the rendered length
/// accumulated so far, not the raw character index.
fn expand_tabs(text: &str) -> String {
    let mut render = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\t' {
            render.push(' ');
            while render.len() % TAB_STOP != 0 {
                render.push(' ');
            }
        } else {
            render.push(ch);
        }
    }
    render
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_expands_to_next_stop() {
        let row = Row::new(0, "\tif".to_string());
        assert_eq!(row.render(), "        if");

        // A tab after one character pads to the same stop.
        let row = Row::new(0, "x\ty".to_string());
        assert_eq!(row.render(), "x       y");
    }

    #[test]
    fn test_tab_stops_measured_in_render_columns() {
        // The second tab's stop is computed from the rendered width, not
        // the raw index.
        let row = Row::new(0, "\t\tx".to_string());
        assert_eq!(row.render(), " ".repeat(16) + "x");
    }

    #[test]
    fn test_cx_to_rx_across_tab() {
        let row = Row::new(0, "\tif".to_string());
        assert_eq!(row.cx_to_rx(0), 0);
        assert_eq!(row.cx_to_rx(1), 8);
        assert_eq!(row.cx_to_rx(2), 9);
        assert_eq!(row.cx_to_rx(3), 10);
    }

    #[test]
    fn test_rx_to_cx_inside_tab_resolves_to_owner() {
        let row = Row::new(0, "\tif".to_string());
        for rx in 0..8 {
            assert_eq!(row.rx_to_cx(rx), 0, "rx {rx}");
        }
        assert_eq!(row.rx_to_cx(8), 1);
        assert_eq!(row.rx_to_cx(9), 2);
    }

    #[test]
    fn test_rx_past_end_maps_to_text_len() {
        let row = Row::new(0, "ab\tc".to_string());
        assert_eq!(row.rx_to_cx(1000), 4);
    }

    #[test]
    fn test_mapping_round_trips_at_char_boundaries() {
        let row = Row::new(0, "\ta\tbc\t\td".to_string());
        for cx in 0..=row.text().len() {
            assert_eq!(row.rx_to_cx(row.cx_to_rx(cx)), cx, "cx {cx}");
        }
    }

    #[test]
    fn test_highlight_at_past_end_is_normal() {
        let row = Row::new(0, "x".to_string());
        assert_eq!(row.highlight_at(1000), Highlight::Normal);
    }
}
