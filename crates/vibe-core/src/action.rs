//! Action log — replay-based undo/redo.
//!
//! Every committed mutation is recorded as a replayable `(EditOp, carried
//! position)` pair. Undo does **not** invert the last edit; it pops the
//! history entry, clones the pristine starting buffer, and replays every
//! remaining entry in order. Correct for any action — including
//! whole-buffer substitution, which has no cheap inverse — at the cost of
//! O(history) work per undo. Acceptable for an interactively-sized buffer;
//! a production-scale version would add periodic checkpoints.
//!
//! The *carried* position is the cursor snapshot taken when the key was
//! pressed, not the cursor at replay time. That decoupling is what makes
//! replay deterministic: each edit reproduces itself at its original
//! location no matter what later (since undone) edits did to the cursor.
//!
//! Invariants:
//!
//! - Replaying the pristine buffer through the history always reproduces
//!   the live buffer exactly.
//! - A fresh committed edit clears the redo stack — no branching history.
//! - Undo/redo on empty stacks are silent no-ops, never errors.
//! - An edit that does not materially change the buffer (backspace at the
//!   origin, substitution with no match) is executed but not recorded.

use crate::buffer::Buffer;
use crate::position::Position;

// ---------------------------------------------------------------------------
// EditOp
// ---------------------------------------------------------------------------

/// A buffer mutation, carrying only its constructor arguments.
///
/// Each op is a pure function of `(buffer, carried)`: applying the same op
/// with the same carried position to the same buffer state always produces
/// the same result. The returned position is where the live cursor lands
/// after the edit — replay during undo ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Splice one char into the carried line at the carried column.
    Insert(char),

    /// Split the carried line at the carried column: prefix stays, suffix
    /// becomes the next line.
    Newline,

    /// Delete backwards from the carried position. At column 0 this merges
    /// the carried line into the previous one; at (0,0) nothing precedes
    /// the start of the buffer and the op does nothing.
    Backspace,

    /// Literal substitution of every match on every line.
    Replace {
        pattern: String,
        replacement: String,
    },
}

impl EditOp {
    /// Mutate `buf` in place and return the post-edit cursor position.
    ///
    /// The carried position is clamped against the current buffer first,
    /// keeping the op total over any buffer state.
    pub fn apply(&self, buf: &mut Buffer, carried: Position) -> Position {
        match self {
            Self::Insert(ch) => {
                let at = buf.clamp(carried);
                buf.insert_char(at, *ch);
                Position::new(at.line, at.col + 1)
            }
            Self::Newline => {
                let at = buf.clamp(carried);
                buf.split_line(at);
                Position::new(at.line + 1, 0)
            }
            Self::Backspace => {
                let at = buf.clamp(carried);
                if at.col > 0 {
                    buf.delete_char_before(at);
                    Position::new(at.line, at.col - 1)
                } else if at.line > 0 {
                    let col = buf.merge_line_up(at.line);
                    Position::new(at.line - 1, col)
                } else {
                    // (0,0): nothing precedes the start of the buffer.
                    at
                }
            }
            Self::Replace {
                pattern,
                replacement,
            } => {
                buf.replace_all(pattern, replacement);
                // The carried line may have shortened — re-clamp onto it.
                buf.clamp(carried)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// What the dispatcher submits to the log.
///
/// `Undo`, `Redo`, and `Noop` are control signals consumed by the engine
/// itself — they are never stored in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Commit and execute a mutation.
    Edit(EditOp),
    /// Read the current state without mutating anything.
    Noop,
    /// Pop the last history entry and rebuild by replay.
    Undo,
    /// Re-commit the most recently undone entry.
    Redo,
}

// ---------------------------------------------------------------------------
// ActionLog
// ---------------------------------------------------------------------------

/// The undo engine. Exclusive owner of the buffer and its history.
///
/// Nothing else mutates the buffer — the dispatcher reads it through
/// [`buffer`](Self::buffer) and submits every change through
/// [`apply`](Self::apply).
#[derive(Debug)]
pub struct ActionLog {
    /// The starting state, cloned and replayed on every undo.
    pristine: Buffer,

    /// The live state: pristine + every history entry, in order.
    buffer: Buffer,

    /// Committed edits, oldest first. Append-only except for undo's pop.
    history: Vec<(EditOp, Position)>,

    /// Undone edits, most recently undone last.
    redo_stack: Vec<(EditOp, Position)>,
}

impl ActionLog {
    /// Wrap a starting buffer. The log keeps a pristine copy for replay.
    #[must_use]
    pub fn new(buffer: Buffer) -> Self {
        Self {
            pristine: buffer.clone(),
            buffer,
            history: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// The live buffer, read-only.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Number of committed entries that can be undone.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Number of undone entries that can be redone.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Submit an action with the carried cursor snapshot.
    ///
    /// Returns the cursor position the dispatcher should adopt, or `None`
    /// when the action has no cursor effect (`Noop`, and `Undo`/`Redo` on
    /// an empty stack).
    ///
    /// - `Edit`: executed immediately against live state; committed to the
    ///   history only if the buffer materially changed, in which case the
    ///   redo stack is cleared.
    /// - `Noop`: nothing happens.
    /// - `Undo`: pops the last history entry onto the redo stack and
    ///   rebuilds the live buffer by replaying the rest from the pristine
    ///   copy. Returns the undone entry's carried position, clamped.
    /// - `Redo`: pops the redo stack and re-commits through the same
    ///   commit path as a fresh edit — without touching the entries still
    ///   waiting on the redo stack.
    pub fn apply(&mut self, action: Action, carried: Position) -> Option<Position> {
        match action {
            Action::Edit(op) => {
                let (cursor, committed) = self.commit(op, carried);
                if committed {
                    self.redo_stack.clear();
                }
                Some(cursor)
            }
            Action::Noop => None,
            Action::Undo => {
                let (op, undone_carried) = self.history.pop()?;
                self.redo_stack.push((op, undone_carried));
                self.buffer = self.pristine.clone();
                for (op, at) in &self.history {
                    op.apply(&mut self.buffer, *at);
                }
                Some(self.buffer.clamp(undone_carried))
            }
            Action::Redo => {
                let (op, redo_carried) = self.redo_stack.pop()?;
                let (cursor, _) = self.commit(op, redo_carried);
                Some(cursor)
            }
        }
    }

    /// Execute an op against live state and record it if it changed
    /// anything. Returns the cursor hint and whether the op was committed.
    ///
    /// The material-change check is a content compare against the pre-edit
    /// state — O(buffer), which is fine at interactive sizes and keeps
    /// no-ops like backspace-at-origin out of the history.
    fn commit(&mut self, op: EditOp, carried: Position) -> (Position, bool) {
        let before = self.buffer.clone();
        let cursor = op.apply(&mut self.buffer, carried);
        let committed = self.buffer != before;
        if committed {
            self.history.push((op, carried));
        }
        (cursor, committed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
