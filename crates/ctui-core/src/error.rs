#![forbid(unsafe_code)]

//! Error types for screen initialization and terminal I/O.

use std::io;
use thiserror::Error;

/// Errors surfaced by the screen backends.
///
/// `init()` is the only fallible public operation; everything after it
/// degrades rather than erroring (bad input bytes become raw rune events,
/// out-of-bounds grid writes are no-ops, operations after `fini()` do
/// nothing).
#[derive(Error, Debug)]
pub enum Error {
    /// `$TERM` names a terminal we have no capabilities for, or names
    /// nothing at all.
    #[error("terminal not supported: {0:?}")]
    UnsupportedTerminal(String),

    /// The locale demands a character set with no registered codec.
    #[error("no support for charset {0:?}")]
    UnsupportedCharset(String),

    /// Terminal read/write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The platform console could not be opened.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// Result alias for screen operations.
pub type Result<T> = std::result::Result<T, Error>;
