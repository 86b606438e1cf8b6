//! Command-line mode — the `:` prompt.
//!
//! When the user presses `:` in normal mode, the editor enters command
//! mode. Typed characters accumulate in a [`CommandLine`]; Enter resolves
//! the text against the registry, Escape discards it.
//!
//! # Supported commands
//!
//! | Command          | Action                                          |
//! |------------------|-------------------------------------------------|
//! | `:q`             | Quit, ignoring unsaved changes                  |
//! | `:w <path>`      | Write the buffer to `<path>` (full overwrite)   |
//! | `:f <path>`      | Load `<path>`, replacing buffer and history     |
//! | `:debug`         | Toggle the diagnostic status-line display       |
//! | `:/pattern`      | Move the cursor to the first match              |
//! | `:s/pat/rep`     | Substitute every match on every line            |
//!
//! # Resolution
//!
//! A submitted name resolves by scanning prefixes of increasing length
//! and taking the first registered name that equals a prefix exactly; the
//! rest of the input is passed through as the raw argument string. The
//! shortest registration therefore always wins: `file x` resolves to `f`
//! with arguments `"ile x"`, shadowing the longer `file` registration.
//! That is the historical behavior and it is pinned by tests here. A name
//! with no matching prefix resolves to nothing and is dropped without
//! feedback.

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// The accumulating `:` input buffer.
///
/// Live only while the editor is in command mode. The leading `:` is not
/// stored — the render layer draws it.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    input: String,
}

impl CommandLine {
    /// Create an empty command line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: String::new(),
        }
    }

    /// The current input text (without the leading `:`).
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Append a character.
    pub fn push(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Remove the last character. Returns `true` if one was removed.
    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Take the accumulated input, leaving the command line empty.
    #[must_use]
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Discard the accumulated input.
    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// True if nothing has been typed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// What a resolved command does. The dispatcher executes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdKind {
    /// `q` — quit, ignoring unsaved changes.
    Quit,
    /// `w` — write the buffer to the file named in the arguments.
    Write,
    /// `f` / `file` — load a file, replacing the buffer and its history.
    File,
    /// `debug` — toggle the diagnostic display.
    Debug,
    /// `/` — search; argument is the pattern.
    Search,
    /// `s` — substitute; argument is `/search/replace`.
    Substitute,
}

/// Registered command names, in registration order.
///
/// Both `f` and `file` are registered; prefix resolution means `file` can
/// never be reached (see module docs).
const REGISTRY: &[(&str, CmdKind)] = &[
    ("q", CmdKind::Quit),
    ("w", CmdKind::Write),
    ("f", CmdKind::File),
    ("file", CmdKind::File),
    ("debug", CmdKind::Debug),
    ("/", CmdKind::Search),
    ("s", CmdKind::Substitute),
];

/// Resolve a submitted command string.
///
/// Scans prefix lengths from one char up to the whole input; the first
/// prefix exactly equal to a registered name wins. Returns the command
/// and the raw remainder of the input (argument string, untrimmed), or
/// `None` if no prefix matches.
#[must_use]
pub fn resolve(input: &str) -> Option<(CmdKind, &str)> {
    let ends = input
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(input.len()));

    for end in ends {
        let prefix = &input[..end];
        if let Some((_, kind)) = REGISTRY.iter().find(|(name, _)| *name == prefix) {
            return Some((*kind, &input[end..]));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
