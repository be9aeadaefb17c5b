#![forbid(unsafe_code)]

//! The backend contract.
//!
//! Every backend exposes the same surface: grid mutation, cursor control,
//! reconciliation, and the event pipeline. Upper layers hold a
//! `Box<dyn Screen>` and never know which backend they drive.
//!
//! All methods take `&self`; screens synchronize internally (they are
//! shared between application threads, the input task, and the resize
//! task). After `fini()`, every operation is a no-op and `poll_event()`
//! returns `None`.

use ctui_render::{Cell, Style};

use crate::error::Result;
use crate::event::Event;

/// A terminal screen backend.
pub trait Screen: Send + Sync {
    /// Acquire the terminal: enter the alternate screen, switch to raw
    /// mode, clear, hide the cursor, and start the input pipeline.
    ///
    /// The only fallible operation in the contract.
    fn init(&self) -> Result<()>;

    /// Release the terminal: restore modes, stop the input pipeline, and
    /// turn every later operation into a no-op.
    fn fini(&self);

    /// Current grid dimensions (columns, rows).
    fn size(&self) -> (usize, usize);

    /// Set the default style used by [`Screen::clear`] and substituted
    /// for `Style::DEFAULT` cells when drawing.
    fn set_style(&self, style: Style);

    /// Write runes and style at (x, y). Out of bounds is a no-op.
    fn set_cell(&self, x: i32, y: i32, style: Style, chars: &[char]);

    /// Copy a cell's runes and style to (x, y). Out of bounds is a no-op.
    fn put_cell(&self, x: i32, y: i32, cell: &Cell);

    /// Read the cell at (x, y), or `None` out of bounds.
    fn get_cell(&self, x: i32, y: i32) -> Option<Cell>;

    /// Place the cursor at (x, y) on the next [`Screen::show`].
    /// Out-of-range coordinates hide it.
    fn show_cursor(&self, x: i32, y: i32);

    /// Hide the cursor on the next [`Screen::show`].
    fn hide_cursor(&self);

    /// Rewrite the whole grid to spaces in the default style and erase
    /// the physical screen on the next [`Screen::show`].
    fn clear(&self);

    /// Reconcile the physical terminal with the grid, emitting the
    /// minimal byte sequence for every dirty cell.
    fn show(&self);

    /// Force a full redraw: invalidate everything, then reconcile.
    fn sync(&self);

    /// Number of colors the terminal supports.
    fn colors(&self) -> i32;

    /// Name of the active character set (for example `UTF-8`).
    fn character_set(&self) -> String;

    /// Ask the terminal to report mouse activity.
    fn enable_mouse(&self);

    /// Stop mouse reporting.
    fn disable_mouse(&self);

    /// Block until an event arrives. Returns `None` once the screen is
    /// finalized and the pipeline has drained.
    fn poll_event(&self) -> Option<Event>;

    /// Publish an event to [`Screen::poll_event`] consumers without
    /// blocking; dropped when the channel is full.
    fn post_event(&self, event: Event);
}
