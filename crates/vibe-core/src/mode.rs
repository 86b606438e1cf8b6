//! Modal editing.
//!
//! The editor is always in exactly one [`Mode`]. Each mode changes how a
//! keystroke is interpreted:
//!
//! | Mode    | Keys mean                                  |
//! |---------|--------------------------------------------|
//! | Insert  | Text input into the buffer                 |
//! | Normal  | Navigation (`h`/`j`/`k`/`l`), `i`, `:`     |
//! | Command | Characters accumulate on the `:` line      |
//!
//! The mode belongs to the editor process, not to the buffer — opening a
//! new file replaces the buffer but leaves the mode alone.
//!
//! The editor starts in **Insert** mode: vibe drops you straight into
//! typing. This is a fixed choice, not configuration.

use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// The current editing mode.
///
/// This is a pure data type — it holds what mode we're in, not the logic
/// for handling keys. Key dispatch and mode transitions live in
/// [`crate::dispatch`]. The Mode enum just says "what are we doing right
/// now."
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Text entry mode. Keys produce characters in the buffer.
    #[default]
    Insert,
    /// Navigation mode. Keys are commands, not text input.
    Normal,
    /// Command-line mode (`:`). Keys accumulate into the command buffer.
    Command,
}

impl Mode {
    /// Human-readable name for the status line.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Normal => "NORMAL",
            Self::Command => "COMMAND",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Mode::Insert.display_name(), "INSERT");
        assert_eq!(Mode::Normal.display_name(), "NORMAL");
        assert_eq!(Mode::Command.display_name(), "COMMAND");
    }

    #[test]
    fn display_trait_matches_name() {
        assert_eq!(format!("{}", Mode::Normal), "NORMAL");
    }

    #[test]
    fn default_is_insert() {
        // The editor starts in insert mode — straight into typing.
        assert_eq!(Mode::default(), Mode::Insert);
    }
}
