//! Incremental filtering and cursor movement for a picker list.
//!
//! Items keep their original indices; the filter only decides which of
//! them are visible. Every mutating call reports whether the highlighted
//! item changed so the caller knows when to emit a highlight event.

/// Visible subset of a picker's items plus the cursor within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredList {
    items: Vec<String>,
    query: String,
    visible: Vec<usize>,
    cursor: usize,
}

impl FilteredList {
    /// All items visible, cursor on `highlighted` (clamped).
    pub fn new(items: Vec<String>, highlighted: usize) -> Self {
        let visible: Vec<usize> = (0..items.len()).collect();
        let cursor = highlighted.min(visible.len().saturating_sub(1));
        Self {
            items,
            query: String::new(),
            visible,
            cursor,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Original indices of the visible items, in display order.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Cursor position within [`FilteredList::visible`]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Original index of the highlighted item, if anything is visible.
    pub fn highlighted(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn move_up(&mut self) -> bool {
        self.move_to(self.cursor.saturating_sub(1))
    }

    pub fn move_down(&mut self) -> bool {
        self.move_to(self.cursor + 1)
    }

    pub fn page_up(&mut self, page: usize) -> bool {
        self.move_to(self.cursor.saturating_sub(page.max(1)))
    }

    pub fn page_down(&mut self, page: usize) -> bool {
        self.move_to(self.cursor + page.max(1))
    }

    pub fn first(&mut self) -> bool {
        self.move_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.move_to(self.visible.len().saturating_sub(1))
    }

    pub fn push_char(&mut self, c: char) -> bool {
        self.query.push(c);
        self.refilter()
    }

    pub fn pop_char(&mut self) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.refilter()
    }

    fn move_to(&mut self, position: usize) -> bool {
        if self.visible.is_empty() {
            return false;
        }
        let before = self.cursor;
        self.cursor = position.min(self.visible.len() - 1);
        self.cursor != before
    }

    /// Recompute the visible set, keeping the highlighted item when it
    /// still matches and falling back to the first match otherwise.
    fn refilter(&mut self) -> bool {
        let before = self.highlighted();
        let needle = self.query.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect();
        self.cursor = before
            .and_then(|h| self.visible.iter().position(|&v| v == h))
            .unwrap_or(0);
        let after = self.highlighted();
        after.is_some() && after != before
    }
}
