// SPDX-License-Identifier: MIT
//
// vibe — a barebones modal terminal text editor.
//
// This is the main binary that wires together the two crates:
//
//   vibe-term → raw mode, ANSI output, byte-level key input
//   vibe-core → buffer, action log (undo/redo), modes, key dispatch
//
// Each keypress flows through:
//
//   stdin → read_key → Editor::handle_key → action log → buffer
//   render → full-screen repaint → stdout
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area                    │  ← rows - 2
//   ├──────────────────────────────┤
//   │ status line (INVERSE)        │  ← 1 row
//   ├──────────────────────────────┤
//   │ command / message line       │  ← 1 row
//   └──────────────────────────────┘
//
// Rendering is a full clear-and-repaint on every keystroke. The buffers
// this editor exists for are small; simplicity beats a diff renderer here.

use std::borrow::Cow;
use std::env;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use std::process;

use unicode_width::UnicodeWidthChar;

use vibe_core::dispatch::{Editor, Status};
use vibe_term::ansi;
use vibe_term::key::read_key;
use vibe_term::terminal::{self, Size, Terminal};

fn main() {
    let mut args = env::args().skip(1);
    let path = args.next();
    if args.next().is_some() {
        eprintln!("usage: vibe [file]");
        process::exit(2);
    }

    if !terminal::is_tty() {
        eprintln!("vibe: stdin is not a terminal");
        process::exit(1);
    }

    let editor = match path.as_deref() {
        Some(p) => match Editor::open(Path::new(p)) {
            Ok(editor) => editor,
            Err(e) => {
                eprintln!("vibe: {p}: {e}");
                process::exit(1);
            }
        },
        None => Editor::new(),
    };

    terminal::install_panic_hook();

    if let Err(e) = run(editor) {
        // The Terminal drop has already restored the screen by now.
        eprintln!("vibe: {e}");
        process::exit(1);
    }
}

/// The blocking read-dispatch-repaint loop. Returns when the editor quits.
fn run(mut editor: Editor) -> io::Result<()> {
    let mut term = Terminal::new()?;
    term.enter()?;

    // Greeting on the first frame; the first keystroke clears it.
    editor.greet();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    render(&mut out, &editor, term.size())?;

    loop {
        let Some(key) = read_key(&mut input)? else {
            // EOF on stdin: nothing more will ever arrive.
            break;
        };
        if editor.handle_key(key) == Status::Quit {
            break;
        }
        // Window may have been resized between keystrokes.
        term.refresh_size();
        render(&mut out, &editor, term.size())?;
    }

    term.leave()?;
    Ok(())
}

// ─── Rendering ──────────────────────────────────────────────────────────────

/// Move the cursor to 0-indexed `(col, row)`, saturating into u16 range.
fn move_to(out: &mut impl Write, col: usize, row: usize) -> io::Result<()> {
    ansi::cursor_to(out, saturate(col), saturate(row))
}

fn saturate(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// Repaint the whole screen: text area, status line, message line, then
/// park the hardware cursor.
fn render(out: &mut BufWriter<Stdout>, editor: &Editor, size: Size) -> io::Result<()> {
    let cols = size.cols as usize;
    let rows = size.rows as usize;
    let text_rows = rows.saturating_sub(2);

    ansi::cursor_hide(out)?;
    ansi::clear_screen(out)?;

    for row in 0..text_rows {
        move_to(out, 0, row)?;
        if row < editor.buffer().line_count() {
            let line = editor.buffer().line(row);
            out.write_all(truncate_cols(line, cols).as_bytes())?;
        } else {
            // Rows past the end of the buffer, vi style.
            out.write_all(b"~")?;
        }
    }

    render_status(out, editor, cols, rows)?;
    render_message(out, editor, cols, rows)?;
    place_cursor(out, editor, cols, rows)?;

    ansi::cursor_show(out)?;
    out.flush()
}

/// The inverse-video status line: mode, file name, cursor position, and
/// (with `:debug`) the undo/redo depths.
fn render_status(out: &mut impl Write, editor: &Editor, cols: usize, rows: usize) -> io::Result<()> {
    let cursor = editor.cursor();
    let name = editor
        .path()
        .map_or_else(|| "[no file]".to_string(), |p| p.display().to_string());

    let mut status = format!(" {} | {} | {} ", editor.mode(), name, cursor);
    if editor.debug() {
        let (undo, redo) = editor.history_depths();
        status.push_str(&format!("| undo:{undo} redo:{redo} "));
    }

    let mut status = truncate_cols(&status, cols).into_owned();
    while display_width(&status) < cols {
        status.push(' ');
    }

    move_to(out, 0, rows.saturating_sub(2))?;
    ansi::inverse(out)?;
    out.write_all(status.as_bytes())?;
    ansi::reset(out)
}

/// The bottom line: the live `:` input in command mode, else any pending
/// notice, else blank.
fn render_message(
    out: &mut impl Write,
    editor: &Editor,
    cols: usize,
    rows: usize,
) -> io::Result<()> {
    move_to(out, 0, rows.saturating_sub(1))?;
    ansi::clear_line(out)?;

    if let Some(input) = editor.command_input() {
        let line = format!(":{input}");
        out.write_all(truncate_cols(&line, cols).as_bytes())?;
    } else if let Some(notice) = editor.notice() {
        out.write_all(truncate_cols(notice, cols).as_bytes())?;
    }
    Ok(())
}

/// Put the hardware cursor where the user is working: on the command line
/// while typing a command, otherwise at the buffer cursor.
fn place_cursor(out: &mut impl Write, editor: &Editor, cols: usize, rows: usize) -> io::Result<()> {
    if let Some(input) = editor.command_input() {
        let col = 1 + display_width(input);
        return move_to(out, col.min(cols), rows.saturating_sub(1));
    }

    let cursor = editor.cursor();
    let line = editor.buffer().line(cursor.line);
    let col: usize = line
        .chars()
        .take(cursor.col)
        .map(|ch| ch.width().unwrap_or(0))
        .sum();
    // A buffer taller than the text area would otherwise park the cursor
    // on the status or message line.
    let row = cursor.line.min(rows.saturating_sub(3));
    move_to(out, col.min(cols.saturating_sub(1)), row)
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Total display width of a string in terminal columns.
fn display_width(s: &str) -> usize {
    s.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

/// Truncate a line to fit within `cols` display columns, never splitting
/// a wide character.
fn truncate_cols(line: &str, cols: usize) -> Cow<'_, str> {
    if display_width(line) <= cols {
        return Cow::Borrowed(line);
    }
    let mut width = 0;
    let mut end = 0;
    for (i, ch) in line.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > cols {
            break;
        }
        width += w;
        end = i + ch.len_utf8();
    }
    Cow::Borrowed(&line[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_lines_intact() {
        assert_eq!(truncate_cols("hello", 80), "hello");
    }

    #[test]
    fn truncate_cuts_at_column_budget() {
        assert_eq!(truncate_cols("hello world", 5), "hello");
    }

    #[test]
    fn truncate_never_splits_a_wide_char() {
        // "日" is two columns wide; a 3-column budget fits one and a half,
        // so only the first survives.
        assert_eq!(truncate_cols("日本", 3), "日");
    }

    #[test]
    fn display_width_counts_columns_not_chars() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn saturate_clamps_oversized_coordinates() {
        assert_eq!(saturate(3), 3);
        assert_eq!(saturate(usize::MAX), u16::MAX);
    }

    #[test]
    fn cursor_row_stays_inside_text_area() {
        use vibe_term::key::Key;

        let mut editor = Editor::new();
        for _ in 0..9 {
            editor.handle_key(Key::Enter);
        }
        assert_eq!(editor.cursor().line, 9);

        // 6 rows leave 4 text rows; the cursor must land on the last of
        // them (row index 3 → 1-indexed CUP row 4), not on the chrome.
        let mut out = Vec::new();
        place_cursor(&mut out, &editor, 80, 6).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[4;1H");
    }

    #[test]
    fn cursor_row_unclamped_when_buffer_fits() {
        use vibe_term::key::Key;

        let mut editor = Editor::new();
        editor.handle_key(Key::Enter);

        let mut out = Vec::new();
        place_cursor(&mut out, &editor, 80, 24).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[2;1H");
    }
}
