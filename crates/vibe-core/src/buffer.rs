//! Text buffer — an ordered sequence of lines.
//!
//! A `Buffer` is a `Vec<String>` of lines with one hard invariant: **at
//! least one line always exists**. An empty file loads as a single empty
//! line, and no operation may leave the line vector empty.
//!
//! Columns are char offsets, lines are 0-indexed. All editing goes through
//! the handful of splice operations here; the [`crate::action::ActionLog`]
//! is the only component that calls them, and only from committed actions.
//!
//! File I/O is deliberately plain: load
//! reads the whole file and splits on `\n`; save joins with `\n` and
//! overwrites in place — synchronous, best-effort, non-atomic.

use std::fs;
use std::io;
use std::path::Path;

use crate::position::Position;

// ---------------------------------------------------------------------------
// Buffer
// ---------------------------------------------------------------------------

/// The editable text: lines of chars, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

impl Buffer {
    /// Create a buffer with a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Build a buffer from text, splitting on `\n`.
    ///
    /// Empty input seeds the buffer with one empty line, preserving the
    /// at-least-one-line invariant. A trailing newline yields a trailing
    /// empty line, matching what split produces.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Load a buffer from a file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Write the buffer to a file: lines joined with `\n`, full overwrite.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.contents())
    }

    // ── Reading ────────────────────────────────────────────────────────

    /// Number of lines. Always at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= line_count()` — callers clamp first.
    #[inline]
    #[must_use]
    pub fn line(&self, idx: usize) -> &str {
        &self.lines[idx]
    }

    /// Length of the line at `idx`, in chars.
    #[inline]
    #[must_use]
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines[idx].chars().count()
    }

    /// The whole buffer as one string, lines joined with `\n`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    /// Clamp a position into the buffer: line into `[0, line_count)`,
    /// column into `[0, line_len(line)]`.
    ///
    /// The column bound is inclusive of the line length — the cursor may
    /// sit just past the last character.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count() - 1);
        let col = pos.col.min(self.line_len(line));
        Position::new(line, col)
    }

    /// Find the first occurrence of `pattern`, scanning lines from the top.
    ///
    /// Literal substring match. Returns the match's position with a
    /// char-offset column, or `None` for no match or an empty pattern.
    #[must_use]
    pub fn find(&self, pattern: &str) -> Option<Position> {
        if pattern.is_empty() {
            return None;
        }
        self.lines.iter().enumerate().find_map(|(idx, line)| {
            line.find(pattern)
                .map(|byte| Position::new(idx, line[..byte].chars().count()))
        })
    }

    // ── Splicing ───────────────────────────────────────────────────────
    //
    // The mutation surface. Positions are clamped here so that actions
    // stay total: replaying against any buffer state cannot panic.

    /// Insert one char at `pos`.
    pub fn insert_char(&mut self, pos: Position, ch: char) {
        let pos = self.clamp(pos);
        let byte = char_to_byte(&self.lines[pos.line], pos.col);
        self.lines[pos.line].insert(byte, ch);
    }

    /// Split the line at `pos` in two: the prefix stays at `pos.line`,
    /// the suffix becomes a new line at `pos.line + 1`.
    pub fn split_line(&mut self, pos: Position) {
        let pos = self.clamp(pos);
        let byte = char_to_byte(&self.lines[pos.line], pos.col);
        let suffix = self.lines[pos.line].split_off(byte);
        self.lines.insert(pos.line + 1, suffix);
    }

    /// Delete the char immediately before `pos`. No-op at column 0.
    pub fn delete_char_before(&mut self, pos: Position) {
        let pos = self.clamp(pos);
        if pos.col == 0 {
            return;
        }
        let byte = char_to_byte(&self.lines[pos.line], pos.col - 1);
        self.lines[pos.line].remove(byte);
    }

    /// Merge line `idx` into the line above it, deleting the newline
    /// between them. Returns the char length of the old previous line —
    /// the column where the cursor lands. No-op on line 0.
    pub fn merge_line_up(&mut self, idx: usize) -> usize {
        let idx = idx.min(self.line_count() - 1);
        if idx == 0 {
            return 0;
        }
        let merged = self.lines.remove(idx);
        let prev_len = self.lines[idx - 1].chars().count();
        self.lines[idx - 1].push_str(&merged);
        prev_len
    }

    /// Replace every occurrence of `pattern` on every line — all matches
    /// per line, literal. Returns `true` if anything changed.
    pub fn replace_all(&mut self, pattern: &str, replacement: &str) -> bool {
        if pattern.is_empty() {
            return false;
        }
        let mut changed = false;
        for line in &mut self.lines {
            if line.contains(pattern) {
                *line = line.replace(pattern, replacement);
                changed = true;
            }
        }
        changed
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a char offset into a byte offset within `line`, saturating at
/// the end of the line.
fn char_to_byte(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(byte, _)| byte)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
