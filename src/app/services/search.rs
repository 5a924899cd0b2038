//! Wrap-around search against the editing widget.
//!
//! Matching is an exact, case-sensitive substring match. The search starts at
//! the widget's insertion point, so repeated searches walk forward through the
//! buffer and wrap to the top once.

use tracing::debug;

use crate::app::infrastructure::widget::EditorWidget;

use super::text_ops::{find_in_text, floor_char_boundary};

/// Pixels of context kept around a match when scrolling to it.
pub const SCROLL_MARGIN: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Found,
    WrappedFound,
    NotFound,
}

/// Cursor over a snapshot of the buffer text.
pub struct SearchCursor {
    text: String,
    query: String,
    pos: usize,
    found: Option<(usize, usize)>,
}

impl SearchCursor {
    pub fn new(text: String, query: &str, from: usize) -> Self {
        let pos = floor_char_boundary(&text, from);
        Self {
            text,
            query: query.to_string(),
            pos,
            found: None,
        }
    }

    /// Advance to the next occurrence at or after the cursor.
    pub fn find_next(&mut self) -> bool {
        match find_in_text(&self.text, &self.query, self.pos) {
            Some(start) => {
                let end = start + self.query.len();
                self.found = Some((start, end));
                self.pos = end;
                true
            }
            None => {
                self.found = None;
                false
            }
        }
    }

    /// Start of the current match.
    pub fn from(&self) -> Option<usize> {
        self.found.map(|(start, _)| start)
    }

    /// End of the current match.
    pub fn to(&self) -> Option<usize> {
        self.found.map(|(_, end)| end)
    }

    pub fn jump_to(&mut self, pos: usize) {
        self.pos = floor_char_boundary(&self.text, pos);
        self.found = None;
    }
}

pub struct SearchEngine {
    margin: u32,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self {
            margin: SCROLL_MARGIN,
        }
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the next occurrence of `query`, wrapping to the start once.
    ///
    /// A match is selected and scrolled into view. On a miss the selection is
    /// left untouched. Never modifies the buffer text.
    pub fn search(&self, widget: &mut dyn EditorWidget, query: &str) -> MatchOutcome {
        let mut cursor = widget.search_cursor(query);
        if cursor.find_next() {
            self.select_match(widget, &cursor);
            return MatchOutcome::Found;
        }

        cursor.jump_to(0);
        if cursor.find_next() {
            debug!(query, "search wrapped to start of buffer");
            self.select_match(widget, &cursor);
            return MatchOutcome::WrappedFound;
        }

        MatchOutcome::NotFound
    }

    fn select_match(&self, widget: &mut dyn EditorWidget, cursor: &SearchCursor) {
        if let (Some(from), Some(to)) = (cursor.from(), cursor.to()) {
            widget.set_selection(from, to);
            widget.scroll_into_view(from, self.margin);
        }
    }
}
