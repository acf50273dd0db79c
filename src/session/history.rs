//! Per-session command history with up/down navigation

/// Append-only log of submitted lines plus a browsing cursor.
///
/// The cursor ranges over `0..=entries.len()`; `entries.len()` means the user
/// is not currently browsing history.
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    entries: Vec<String>,
    cursor: usize,
}

impl HistoryLedger {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and stop browsing.
    ///
    /// Callers filter blank input before calling; nothing is deduplicated.
    pub fn add(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = self.entries.len();
    }

    /// Step back to the previous (older) entry
    pub fn previous(&mut self) -> Option<&str> {
        if self.cursor > 0 {
            self.cursor -= 1;
            return self.entries.get(self.cursor).map(String::as_str);
        }
        None
    }

    /// Step forward to the next (newer) entry.
    ///
    /// Returns `Some("")` when stepping past the newest entry, which tells the
    /// caller to blank the input line. Returns `None` when not browsing.
    pub fn next(&mut self) -> Option<&str> {
        let len = self.entries.len();
        if len == 0 || self.cursor >= len {
            return None;
        }

        if self.cursor < len - 1 {
            self.cursor += 1;
            self.entries.get(self.cursor).map(String::as_str)
        } else {
            self.cursor = len;
            Some("")
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
