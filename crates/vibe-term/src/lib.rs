// SPDX-License-Identifier: MIT
//
// vibe-term — Terminal backend for vibe.
//
// The smallest terminal layer an editor can get away with: cbreak-style
// raw mode with RAII restore, a handful of ANSI escape helpers, and a
// one-byte-at-a-time key decoder for a blocking read loop.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of direct terminal control via ANSI escape
// sequences and raw termios. The editor reads exactly one byte per
// iteration and repaints the whole screen — no frame diffing, no
// background reader thread, no escape-sequence state machine.

pub mod ansi;
pub mod key;
pub mod terminal;
