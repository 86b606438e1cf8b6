//! # vibe-core — Editor core for vibe
//!
//! This crate contains the fundamental building blocks of the editor:
//!
//! - **[`position`]** — `Position` (line, col), 0-indexed
//! - **[`buffer`]** — `Buffer`, an ordered sequence of lines with file I/O
//! - **[`action`]** — `ActionLog`, the action-replay undo/redo engine
//! - **[`mode`]** — modal editing (`Insert`, `Normal`, `Command`)
//! - **[`command`]** — the `:` command buffer and prefix-match registry
//! - **[`dispatch`]** — `Editor`, the (mode, key) → handler state machine
//!
//! The ownership story is strict: the [`action::ActionLog`] exclusively
//! owns the buffer and its history; the [`dispatch::Editor`] owns the
//! mode, cursor, and command line, and reaches the buffer only through
//! the log's `apply` entry point.

pub mod action;
pub mod buffer;
pub mod command;
pub mod dispatch;
pub mod mode;
pub mod position;
