#![forbid(unsafe_code)]

//! Terminfo/POSIX terminal backend.
//!
//! The [`TermScreen`] drives a terminal through capability strings
//! resolved from `$TERM`, raw-mode termios, and a SIGWINCH resize task.

pub mod acs;
pub mod screen;
pub mod terminfo;
pub mod writer;

pub use screen::TermScreen;
pub use terminfo::{lookup, Terminfo};
