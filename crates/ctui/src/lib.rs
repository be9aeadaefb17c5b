#![forbid(unsafe_code)]

//! celltui: a cell-grid terminal display engine with a concurrent input
//! event pipeline.
//!
//! Applications mutate a grid of styled character cells and call
//! [`Screen::show`]; the engine emits the minimal terminal output to
//! reconcile the display, while a background task decodes raw input
//! bytes into key, mouse, and resize events served by
//! [`Screen::poll_event`].
//!
//! ```no_run
//! use ctui::{new_screen, Color, Event, Key, Style};
//!
//! let screen = new_screen()?;
//! screen.init()?;
//! let style = Style::DEFAULT.with_fg(Color::Green);
//! for (i, ch) in "hello".chars().enumerate() {
//!     screen.set_cell(i as i32, 0, style, &[ch]);
//! }
//! screen.show();
//! while let Some(event) = screen.poll_event() {
//!     if let Event::Key { key: Key::Esc, .. } = event {
//!         break;
//!     }
//! }
//! screen.fini();
//! # Ok::<(), ctui::Error>(())
//! ```

pub use ctui_core::{
    ButtonMask, DecoderCharset, Error, Event, InputDecoder, Key, ModMask, Result, Screen,
};
pub use ctui_render::{rune_width, AttrMask, Cell, Color, Grid, Style};

pub use ctui_console::ConsoleScreen;
pub use ctui_term::{Terminfo, TermScreen};

/// Open the screen backend for this platform: the Windows console on
/// Windows, the terminfo terminal everywhere else.
pub fn new_screen() -> Result<Box<dyn Screen>> {
    #[cfg(windows)]
    {
        Ok(Box::new(ConsoleScreen::new()?))
    }
    #[cfg(not(windows))]
    {
        Ok(Box::new(TermScreen::new()?))
    }
}
