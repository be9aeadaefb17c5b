//! Windows console backend.
//!
//! Presents the common [`ctui_core::Screen`] contract over the Win32
//! console API. Input-record decoding and attribute mapping are pure and
//! platform-independent; only the [`sys`] bindings touch Win32.

pub mod attr;
pub mod record;
pub mod screen;
#[cfg(windows)]
pub mod sys;

pub use screen::{Console, ConsoleScreen, CursorInfo, ScreenInfo};
