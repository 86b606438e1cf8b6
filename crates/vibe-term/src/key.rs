// SPDX-License-Identifier: MIT
//
// Key decoding — one raw byte in, one `Key` out.
//
// The editor runs a blocking read loop: one byte per iteration, fully
// processed before the next read. There is deliberately no multi-byte
// escape sequence parser here — arrow keys and friends arrive as an ESC
// byte followed by bytes the editor sees as ordinary input. Movement is
// h/j/k/l; that's the deal with a barebones editor.
//
// Extended bytes 128–255 are decoded as Latin-1 so they round-trip as a
// single `char` per keystroke.

use std::io::{self, Read};

// ─── Key ─────────────────────────────────────────────────────────────────────

/// A decoded keystroke.
///
/// Control bytes with a dedicated editing meaning get their own variant;
/// the remaining C0 bytes surface as `Ctrl(letter)` so bindings like
/// Ctrl-Z / Ctrl-X read naturally at the dispatch site. Bytes with no
/// sensible decoding become [`Key::Other`] and default to a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// ESC (27).
    Escape,
    /// CR or LF (13, 10).
    Enter,
    /// DEL or BS (127, 8).
    Backspace,
    /// Any other C0 control byte (1–26), as its letter: 3 → `Ctrl('c')`.
    Ctrl(char),
    /// Printable ASCII (32–126) or an extended byte (128–255).
    Char(char),
    /// Anything else (NUL, 28–31).
    Other(u8),
}

impl Key {
    /// Decode a single raw byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            27 => Self::Escape,
            b'\r' | b'\n' => Self::Enter,
            127 | 8 => Self::Backspace,
            1..=26 => Self::Ctrl((b'a' + byte - 1) as char),
            32..=126 => Self::Char(byte as char),
            // Latin-1: byte value == code point.
            128..=255 => Self::Char(byte as char),
            _ => Self::Other(byte),
        }
    }
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// Block until one byte is available and decode it.
///
/// Returns `Ok(None)` on EOF (stdin closed). The reader is generic so
/// tests can feed byte slices instead of a terminal.
///
/// # Errors
///
/// Propagates any I/O error from the underlying reader.
pub fn read_key(r: &mut impl Read) -> io::Result<Option<Key>> {
    let mut byte = [0u8; 1];
    match r.read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(Key::from_byte(byte[0]))),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
