//! Key dispatch — the (mode, key) → handler state machine.
//!
//! [`Editor`] holds everything a handler touches as explicit fields: the
//! action log (which owns the buffer), the live cursor, the mode, the
//! command line, and the pending notice. Handlers never reach the buffer
//! directly — every mutation goes through [`ActionLog::apply`], and every
//! committed edit carries the cursor snapshot taken the instant its key
//! arrived.
//!
//! Dispatch itself is a `match` over `(mode, key)`, so the compiler checks
//! the transition table is total. Unbound keys fall through to a silent
//! no-op — an unbound key is never an error the user sees.
//!
//! # Transitions
//!
//! - insert → normal on Escape
//! - normal → insert on `i`
//! - normal → command on `:`
//! - command → normal on Escape (command text discarded) or on Enter
//!   (command resolved and executed first)
//!
//! Ctrl-Z is undo and Ctrl-X is redo in both insert and normal mode.
//! Redo on Ctrl-X is non-standard, but it's a fixed choice. Ctrl-C quits
//! unconditionally from any mode.

use std::path::{Path, PathBuf};

use vibe_term::key::Key;

use crate::action::{Action, ActionLog, EditOp};
use crate::buffer::Buffer;
use crate::command::{self, CmdKind, CommandLine};
use crate::mode::Mode;
use crate::position::Position;

/// Startup greeting shown on the message line of the first frame.
pub const SPLASH: &str = "vibe — vi Barebones Editor";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// What the caller should do after a keystroke is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Keep reading keys.
    Continue,
    /// Exit the editor.
    Quit,
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// The editor state machine.
///
/// One instance per process. The render layer reads it; keystrokes drive
/// it through [`handle_key`](Self::handle_key).
#[derive(Debug)]
pub struct Editor {
    /// Owns the buffer, the history, and the redo stack.
    log: ActionLog,

    /// The live cursor. Always clamped into the buffer.
    cursor: Position,

    /// The current mode. Survives buffer replacement (`:f`).
    mode: Mode,

    /// The `:` input, live only in command mode.
    cmdline: CommandLine,

    /// A pending interactive notice. While set, the next key only
    /// acknowledges it — nothing else happens.
    notice: Option<String>,

    /// Diagnostic display flag, toggled by `:debug`.
    debug: bool,

    /// Where the buffer came from / was last written, for the status line.
    path: Option<PathBuf>,
}

impl Editor {
    /// An editor over a single empty line, in insert mode.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(Buffer::new(), None)
    }

    /// An editor over a file loaded from disk.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let buffer = Buffer::from_file(path)?;
        Ok(Self::with_buffer(buffer, Some(path.to_path_buf())))
    }

    fn with_buffer(buffer: Buffer, path: Option<PathBuf>) -> Self {
        Self {
            log: ActionLog::new(buffer),
            cursor: Position::ZERO,
            mode: Mode::Insert,
            cmdline: CommandLine::new(),
            notice: None,
            debug: false,
            path,
        }
    }

    /// Queue the [`SPLASH`] greeting. It rides the notice mechanism: the
    /// render layer shows it on the message line, and the first keystroke
    /// acknowledges it like any other notice.
    pub fn greet(&mut self) {
        self.notice = Some(SPLASH.to_string());
    }

    // ── Read accessors (render layer) ──────────────────────────────────

    /// The live buffer.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        self.log.buffer()
    }

    /// The live cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    /// The current mode.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The in-progress command text, when in command mode.
    #[must_use]
    pub fn command_input(&self) -> Option<&str> {
        (self.mode == Mode::Command).then(|| self.cmdline.input())
    }

    /// The pending notice awaiting acknowledgment, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the diagnostic display is on.
    #[inline]
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Undo and redo stack depths, for the diagnostic display.
    #[must_use]
    pub fn history_depths(&self) -> (usize, usize) {
        (self.log.history_len(), self.log.redo_len())
    }

    /// The file backing the buffer, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ── Dispatch ───────────────────────────────────────────────────────

    /// Process one keystroke to completion.
    pub fn handle_key(&mut self, key: Key) -> Status {
        // Ctrl-C: immediate, unconditional exit — even over a notice.
        if key == Key::Ctrl('c') {
            return Status::Quit;
        }

        // A pending notice blocks: this key acknowledges it and is
        // otherwise swallowed.
        if self.notice.take().is_some() {
            return Status::Continue;
        }

        // Carried-state capture: the cursor as it stands when the key
        // arrives. Every edit submitted below carries this snapshot.
        let carried = self.cursor;

        match self.mode {
            Mode::Insert => self.insert_key(key, carried),
            Mode::Normal => self.normal_key(key, carried),
            Mode::Command => self.command_key(key, carried),
        }
    }

    fn insert_key(&mut self, key: Key, carried: Position) -> Status {
        match key {
            Key::Escape => self.mode = Mode::Normal,
            Key::Enter => self.submit(EditOp::Newline, carried),
            Key::Backspace => self.submit(EditOp::Backspace, carried),
            Key::Ctrl('z') => self.undo(carried),
            Key::Ctrl('x') => self.redo(carried),
            Key::Char(ch) => self.submit(EditOp::Insert(ch), carried),
            Key::Ctrl(_) | Key::Other(_) => {}
        }
        Status::Continue
    }

    fn normal_key(&mut self, key: Key, carried: Position) -> Status {
        match key {
            Key::Char('i') => self.mode = Mode::Insert,
            Key::Char(':') => {
                self.cmdline.clear();
                self.mode = Mode::Command;
            }
            Key::Char('h') => self.move_cursor(0, -1),
            Key::Char('l') => self.move_cursor(0, 1),
            Key::Char('j') => self.move_cursor(1, 0),
            Key::Char('k') => self.move_cursor(-1, 0),
            Key::Ctrl('z') => self.undo(carried),
            Key::Ctrl('x') => self.redo(carried),
            Key::Escape | Key::Enter | Key::Backspace | Key::Char(_) | Key::Ctrl(_)
            | Key::Other(_) => {}
        }
        Status::Continue
    }

    fn command_key(&mut self, key: Key, carried: Position) -> Status {
        match key {
            Key::Escape => {
                self.cmdline.clear();
                self.mode = Mode::Normal;
            }
            Key::Backspace => {
                self.cmdline.backspace();
            }
            Key::Enter => {
                let input = self.cmdline.take();
                self.mode = Mode::Normal;
                return self.run_command(&input, carried);
            }
            Key::Char(ch) => self.cmdline.push(ch),
            Key::Ctrl(_) | Key::Other(_) => {}
        }
        Status::Continue
    }

    // ── Buffer operations ──────────────────────────────────────────────

    /// Submit an edit with its carried snapshot and adopt the resulting
    /// cursor.
    fn submit(&mut self, op: EditOp, carried: Position) {
        if let Some(cursor) = self.log.apply(Action::Edit(op), carried) {
            self.cursor = cursor;
        }
    }

    fn undo(&mut self, carried: Position) {
        if let Some(cursor) = self.log.apply(Action::Undo, carried) {
            self.cursor = cursor;
        }
    }

    fn redo(&mut self, carried: Position) {
        if let Some(cursor) = self.log.apply(Action::Redo, carried) {
            self.cursor = cursor;
        }
    }

    /// Move the cursor by whole lines/columns, clamping against the
    /// destination: the line into the buffer, then the column against the
    /// *destination* line's length — stepping onto a shorter line snaps
    /// the column inward.
    fn move_cursor(&mut self, dline: isize, dcol: isize) {
        let buf = self.buffer();
        let line = step(self.cursor.line, dline);
        let col = step(self.cursor.col, dcol);
        self.cursor = buf.clamp(Position::new(line, col));
    }

    // ── Commands ───────────────────────────────────────────────────────

    fn run_command(&mut self, input: &str, carried: Position) -> Status {
        // Unresolvable names are dropped without feedback.
        let Some((kind, args)) = command::resolve(input) else {
            return Status::Continue;
        };

        match kind {
            CmdKind::Quit => return Status::Quit,
            CmdKind::Write => self.cmd_write(args),
            CmdKind::File => self.cmd_load(args),
            CmdKind::Debug => self.debug = !self.debug,
            CmdKind::Search => self.cmd_search(args),
            CmdKind::Substitute => self.cmd_substitute(args, carried),
        }
        Status::Continue
    }

    fn cmd_write(&mut self, args: &str) {
        let Some(name) = filename_arg(args) else {
            self.notice = Some("usage: w <filename>".into());
            return;
        };
        match self.buffer().save(Path::new(name)) {
            Ok(()) => self.path = Some(PathBuf::from(name)),
            Err(e) => self.notice = Some(format!("w: {name}: {e}")),
        }
    }

    fn cmd_load(&mut self, args: &str) {
        let Some(name) = filename_arg(args) else {
            self.notice = Some("usage: f <filename>".into());
            return;
        };
        match Buffer::from_file(Path::new(name)) {
            Ok(buffer) => {
                // Fresh log: the loaded file is the new pristine state and
                // the old history does not apply to it.
                self.log = ActionLog::new(buffer);
                self.cursor = Position::ZERO;
                self.path = Some(PathBuf::from(name));
            }
            Err(e) => self.notice = Some(format!("f: {name}: {e}")),
        }
    }

    fn cmd_search(&mut self, pattern: &str) {
        match self.buffer().find(pattern) {
            Some(pos) => self.cursor = pos,
            None => self.notice = Some(format!("pattern not found: {pattern}")),
        }
    }

    fn cmd_substitute(&mut self, args: &str, carried: Position) {
        let Some((pattern, replacement)) = parse_substitute(args) else {
            self.notice = Some("usage: s/search/replace".into());
            return;
        };
        let before = self.log.history_len();
        self.submit(
            EditOp::Replace {
                pattern: pattern.clone(),
                replacement,
            },
            carried,
        );
        if self.log.history_len() == before {
            self.notice = Some(format!("pattern not found: {pattern}"));
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Step an unsigned coordinate by a signed delta, saturating at zero.
fn step(value: usize, delta: isize) -> usize {
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta.unsigned_abs())
    }
}

/// Extract the filename from a command remainder. The remainder must be
/// `" <filename>"` — a leading space, then a non-empty name.
fn filename_arg(args: &str) -> Option<&str> {
    let rest = args.strip_prefix(' ')?;
    let name = rest.trim();
    if name.is_empty() { None } else { Some(name) }
}

/// Parse a substitution argument of the form `/search/replace`.
///
/// The search part must be non-empty; the replacement may be empty
/// (deletion). Malformed input — no leading `/`, no second `/` — is `None`.
fn parse_substitute(args: &str) -> Option<(String, String)> {
    let body = args.strip_prefix('/')?;
    let (pattern, replacement) = body.split_once('/')?;
    if pattern.is_empty() {
        return None;
    }
    Some((pattern.to_string(), replacement.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor_with(text: &str) -> Editor {
        Editor::with_buffer(Buffer::from_text(text), None)
    }

    /// Feed a string of printable keys.
    fn type_chars(e: &mut Editor, text: &str) {
        for ch in text.chars() {
            assert_eq!(e.handle_key(Key::Char(ch)), Status::Continue);
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("vibe-dispatch-test");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    // -- Mode transitions ---------------------------------------------------

    #[test]
    fn starts_in_insert_mode() {
        assert_eq!(Editor::new().mode(), Mode::Insert);
    }

    #[test]
    fn escape_leaves_insert_for_normal() {
        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        assert_eq!(e.mode(), Mode::Normal);
    }

    #[test]
    fn i_enters_insert_from_normal() {
        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char('i'));
        assert_eq!(e.mode(), Mode::Insert);
    }

    #[test]
    fn colon_enters_command_from_normal() {
        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        assert_eq!(e.mode(), Mode::Command);
        assert_eq!(e.command_input(), Some(""));
    }

    #[test]
    fn escape_cancels_command_and_discards_input() {
        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "q");
        e.handle_key(Key::Escape);
        assert_eq!(e.mode(), Mode::Normal);

        // The discarded `q` must not have executed — we're still running,
        // and re-entering command mode starts empty.
        e.handle_key(Key::Char(':'));
        assert_eq!(e.command_input(), Some(""));
    }

    #[test]
    fn mode_survives_buffer_replacement() {
        let path = temp_path("mode-survives.txt");
        std::fs::write(&path, "content").unwrap();

        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, &format!("f {}", path.display()));
        e.handle_key(Key::Enter);

        assert_eq!(e.buffer().contents(), "content");
        assert_eq!(e.mode(), Mode::Normal);
        std::fs::remove_file(&path).unwrap();
    }

    // -- Insert mode editing ------------------------------------------------

    #[test]
    fn typing_inserts_and_advances() {
        let mut e = Editor::new();
        type_chars(&mut e, "hi");
        assert_eq!(e.buffer().contents(), "hi");
        assert_eq!(e.cursor(), Position::new(0, 2));
    }

    #[test]
    fn enter_splits_line() {
        let mut e = Editor::new();
        type_chars(&mut e, "ab");
        e.handle_key(Key::Enter);
        type_chars(&mut e, "cd");
        assert_eq!(e.buffer().contents(), "ab\ncd");
        assert_eq!(e.cursor(), Position::new(1, 2));
    }

    #[test]
    fn backspace_deletes_before_cursor() {
        let mut e = Editor::new();
        type_chars(&mut e, "abc");
        e.handle_key(Key::Backspace);
        assert_eq!(e.buffer().contents(), "ab");
        assert_eq!(e.cursor(), Position::new(0, 2));
    }

    #[test]
    fn backspace_at_line_start_merges_up() {
        let mut e = Editor::new();
        type_chars(&mut e, "ab");
        e.handle_key(Key::Enter);
        e.handle_key(Key::Backspace);
        assert_eq!(e.buffer().contents(), "ab");
        // Cursor at the old previous-line length.
        assert_eq!(e.cursor(), Position::new(0, 2));
    }

    #[test]
    fn backspace_at_origin_is_silent_noop() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Backspace);
        assert_eq!(e.buffer().contents(), "ab");
        assert_eq!(e.cursor(), Position::ZERO);
        assert_eq!(e.history_depths(), (0, 0));
    }

    #[test]
    fn extended_bytes_insert_as_chars() {
        let mut e = Editor::new();
        e.handle_key(Key::Char('é'));
        assert_eq!(e.buffer().contents(), "é");
        assert_eq!(e.cursor(), Position::new(0, 1));
    }

    #[test]
    fn unbound_insert_keys_are_noops() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Ctrl('q'));
        e.handle_key(Key::Other(0));
        assert_eq!(e.buffer().contents(), "ab");
    }

    // -- Undo / redo through dispatch ---------------------------------------

    #[test]
    fn typing_then_single_undo() {
        // Start [""], type "ab", Enter, "cd" → ["ab","cd"], cursor (1,2).
        // One undo reverts only the last commit (the 'd').
        let mut e = Editor::new();
        type_chars(&mut e, "ab");
        e.handle_key(Key::Enter);
        type_chars(&mut e, "cd");
        assert_eq!(e.buffer().contents(), "ab\ncd");
        assert_eq!(e.cursor(), Position::new(1, 2));

        e.handle_key(Key::Ctrl('z'));
        assert_eq!(e.buffer().contents(), "ab\nc");
        assert_eq!(e.cursor(), Position::new(1, 1));
    }

    #[test]
    fn full_undo_redo_cycle_restores_buffer_and_cursor() {
        let mut e = Editor::new();
        type_chars(&mut e, "abc");
        let (buffer, cursor) = (e.buffer().contents(), e.cursor());

        for _ in 0..3 {
            e.handle_key(Key::Ctrl('z'));
        }
        assert_eq!(e.buffer().contents(), "");

        for _ in 0..3 {
            e.handle_key(Key::Ctrl('x'));
        }
        assert_eq!(e.buffer().contents(), buffer);
        assert_eq!(e.cursor(), cursor);
    }

    #[test]
    fn undo_redo_bound_in_normal_mode_too() {
        let mut e = Editor::new();
        type_chars(&mut e, "x");
        e.handle_key(Key::Escape);

        e.handle_key(Key::Ctrl('z'));
        assert_eq!(e.buffer().contents(), "");
        e.handle_key(Key::Ctrl('x'));
        assert_eq!(e.buffer().contents(), "x");
    }

    #[test]
    fn commit_after_undo_discards_redo() {
        let mut e = Editor::new();
        type_chars(&mut e, "ab");
        e.handle_key(Key::Ctrl('z'));
        type_chars(&mut e, "z");
        assert_eq!(e.buffer().contents(), "az");

        // Redo must now be a no-op.
        e.handle_key(Key::Ctrl('x'));
        assert_eq!(e.buffer().contents(), "az");
    }

    #[test]
    fn undo_on_fresh_editor_is_silent() {
        let mut e = Editor::new();
        assert_eq!(e.handle_key(Key::Ctrl('z')), Status::Continue);
        assert_eq!(e.handle_key(Key::Ctrl('x')), Status::Continue);
        assert_eq!(e.buffer().contents(), "");
    }

    // -- Normal mode movement -----------------------------------------------

    #[test]
    fn hjkl_move_and_clamp() {
        let mut e = editor_with("abc\nx");
        e.handle_key(Key::Escape);

        e.handle_key(Key::Char('l'));
        e.handle_key(Key::Char('l'));
        assert_eq!(e.cursor(), Position::new(0, 2));

        e.handle_key(Key::Char('h'));
        assert_eq!(e.cursor(), Position::new(0, 1));

        e.handle_key(Key::Char('j'));
        assert_eq!(e.cursor().line, 1);

        e.handle_key(Key::Char('k'));
        assert_eq!(e.cursor().line, 0);
    }

    #[test]
    fn vertical_move_snaps_col_to_destination_line() {
        let mut e = editor_with("abcdef\nab");
        e.handle_key(Key::Escape);
        for _ in 0..5 {
            e.handle_key(Key::Char('l'));
        }
        assert_eq!(e.cursor(), Position::new(0, 5));

        // Down onto the shorter line: col snaps to min(5, 2).
        e.handle_key(Key::Char('j'));
        assert_eq!(e.cursor(), Position::new(1, 2));
    }

    #[test]
    fn movement_clamps_at_buffer_edges() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char('h'));
        e.handle_key(Key::Char('k'));
        assert_eq!(e.cursor(), Position::ZERO);

        for _ in 0..10 {
            e.handle_key(Key::Char('l'));
            e.handle_key(Key::Char('j'));
        }
        assert_eq!(e.cursor(), Position::new(0, 2));
    }

    // -- Command mode -------------------------------------------------------

    #[test]
    fn command_chars_accumulate_and_backspace_trims() {
        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "wq");
        assert_eq!(e.command_input(), Some("wq"));

        e.handle_key(Key::Backspace);
        assert_eq!(e.command_input(), Some("w"));

        // Backspace on an empty command line is a no-op.
        e.handle_key(Key::Backspace);
        e.handle_key(Key::Backspace);
        assert_eq!(e.command_input(), Some(""));
    }

    #[test]
    fn q_quits() {
        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "q");
        assert_eq!(e.handle_key(Key::Enter), Status::Quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        assert_eq!(Editor::new().handle_key(Key::Ctrl('c')), Status::Quit);

        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        assert_eq!(e.handle_key(Key::Ctrl('c')), Status::Quit);

        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        assert_eq!(e.handle_key(Key::Ctrl('c')), Status::Quit);
    }

    #[test]
    fn unknown_command_is_dropped_silently() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "nope");
        assert_eq!(e.handle_key(Key::Enter), Status::Continue);
        assert_eq!(e.mode(), Mode::Normal);
        assert_eq!(e.notice(), None);
        assert_eq!(e.buffer().contents(), "ab");
    }

    #[test]
    fn debug_toggles() {
        let mut e = Editor::new();
        e.handle_key(Key::Escape);
        assert!(!e.debug());

        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "debug");
        e.handle_key(Key::Enter);
        assert!(e.debug());

        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "debug");
        e.handle_key(Key::Enter);
        assert!(!e.debug());
    }

    // -- Write / load -------------------------------------------------------

    #[test]
    fn write_without_filename_notices_and_touches_nothing() {
        let path = temp_path("untouched.txt");
        std::fs::write(&path, "original").unwrap();

        let mut e = editor_with("changed");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "w");
        e.handle_key(Key::Enter);

        assert!(e.notice().is_some());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn write_saves_buffer_to_named_file() {
        let path = temp_path("saved.txt");

        let mut e = Editor::new();
        type_chars(&mut e, "ab");
        e.handle_key(Key::Enter);
        type_chars(&mut e, "cd");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, &format!("w {}", path.display()));
        e.handle_key(Key::Enter);

        assert_eq!(e.notice(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ab\ncd");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn write_failure_notices_and_keeps_editing() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "w /nonexistent-dir/deeply/nope.txt");
        assert_eq!(e.handle_key(Key::Enter), Status::Continue);
        assert!(e.notice().is_some());
        assert_eq!(e.buffer().contents(), "ab");
    }

    #[test]
    fn load_replaces_buffer_and_resets_history() {
        let path = temp_path("load-me.txt");
        std::fs::write(&path, "fresh\nfile").unwrap();

        let mut e = Editor::new();
        type_chars(&mut e, "old");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, &format!("f {}", path.display()));
        e.handle_key(Key::Enter);

        assert_eq!(e.buffer().contents(), "fresh\nfile");
        assert_eq!(e.cursor(), Position::ZERO);
        assert_eq!(e.history_depths(), (0, 0));

        // The old history must not leak into the new buffer.
        e.handle_key(Key::Ctrl('z'));
        assert_eq!(e.buffer().contents(), "fresh\nfile");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_file_notices_and_keeps_state() {
        let mut e = editor_with("keep");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "f /nonexistent/vibe-nope.txt");
        e.handle_key(Key::Enter);

        assert!(e.notice().is_some());
        assert_eq!(e.buffer().contents(), "keep");
    }

    #[test]
    fn long_form_file_resolves_to_f_with_mangled_args() {
        // The shortest-prefix quirk: `:file x` resolves to `f` with
        // arguments "ile x" — no leading space, so it's a usage notice,
        // not a load.
        let mut e = editor_with("keep");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "file x");
        e.handle_key(Key::Enter);

        assert!(e.notice().is_some());
        assert_eq!(e.buffer().contents(), "keep");
    }

    // -- Search / substitute ------------------------------------------------

    #[test]
    fn search_moves_cursor_to_first_match() {
        let mut e = editor_with("xxx\nab cd");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "/cd");
        e.handle_key(Key::Enter);
        assert_eq!(e.cursor(), Position::new(1, 3));
    }

    #[test]
    fn search_miss_notices() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "/zz");
        e.handle_key(Key::Enter);
        assert_eq!(e.notice(), Some("pattern not found: zz"));
    }

    #[test]
    fn substitute_hits_all_lines() {
        // :s/ab/xy on ["ab","cab"] → ["xy","cxy"], cursor clamped onto
        // the line it was issued from.
        let mut e = editor_with("ab\ncab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "s/ab/xy");
        e.handle_key(Key::Enter);

        assert_eq!(e.buffer().contents(), "xy\ncxy");
        assert_eq!(e.cursor().line, 0);
        assert!(e.cursor().col <= e.buffer().line_len(0));
    }

    #[test]
    fn substitute_is_undoable_as_one_action() {
        let mut e = editor_with("ab ab\nab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "s/ab/z");
        e.handle_key(Key::Enter);
        assert_eq!(e.buffer().contents(), "z z\nz");

        e.handle_key(Key::Ctrl('z'));
        assert_eq!(e.buffer().contents(), "ab ab\nab");
    }

    #[test]
    fn malformed_substitute_notices() {
        for bad in ["s", "sab/xy", "s/ab"] {
            let mut e = editor_with("ab");
            e.handle_key(Key::Escape);
            e.handle_key(Key::Char(':'));
            type_chars(&mut e, bad);
            e.handle_key(Key::Enter);
            assert!(e.notice().is_some(), "expected notice for {bad:?}");
            assert_eq!(e.buffer().contents(), "ab");
        }
    }

    #[test]
    fn substitute_without_match_notices() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "s/zz/y");
        e.handle_key(Key::Enter);
        assert!(e.notice().is_some());
        assert_eq!(e.history_depths(), (0, 0));
    }

    // -- Notices ------------------------------------------------------------

    #[test]
    fn splash_shows_until_first_key() {
        let mut e = Editor::new();
        e.greet();
        assert_eq!(e.notice(), Some(SPLASH));

        // The first keystroke only acknowledges the greeting.
        e.handle_key(Key::Escape);
        assert_eq!(e.notice(), None);
        assert_eq!(e.mode(), Mode::Insert);

        e.handle_key(Key::Escape);
        assert_eq!(e.mode(), Mode::Normal);
    }

    #[test]
    fn fresh_editor_has_no_pending_notice() {
        // The greeting is opt-in; construction alone queues nothing.
        assert_eq!(Editor::new().notice(), None);
    }

    #[test]
    fn notice_blocks_until_acknowledged() {
        let mut e = editor_with("ab");
        e.handle_key(Key::Escape);
        e.handle_key(Key::Char(':'));
        type_chars(&mut e, "/zz");
        e.handle_key(Key::Enter);
        assert!(e.notice().is_some());

        // The acknowledging key is swallowed — it must not execute.
        e.handle_key(Key::Char('i'));
        assert_eq!(e.notice(), None);
        assert_eq!(e.mode(), Mode::Normal);

        // The next key works normally again.
        e.handle_key(Key::Char('i'));
        assert_eq!(e.mode(), Mode::Insert);
    }
}
