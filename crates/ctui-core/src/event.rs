#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Events are a tagged sum; consumers pattern-match on the variant. Key
//! events carry a [`Key`] plus a rune: for ordinary characters the key is
//! the [`Key::Rune`] sentinel and the rune is the character itself, for
//! named keys the rune is usually `'\0'`.

use std::any::Any;
use std::sync::Arc;

bitflags::bitflags! {
    /// Modifier keys active during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModMask: u8 {
        /// Shift key.
        const SHIFT = 0b0001;
        /// Control key.
        const CTRL  = 0b0010;
        /// Alt/Option key.
        const ALT   = 0b0100;
        /// Meta/Super key.
        const META  = 0b1000;
    }
}

bitflags::bitflags! {
    /// Mouse buttons (and synthetic wheel impulses) active in a mouse
    /// event. Empty means "all buttons released".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u16 {
        /// Primary (usually left) button.
        const BUTTON1    = 0b0_0000_0001;
        /// Secondary button.
        const BUTTON2    = 0b0_0000_0010;
        /// Tertiary button.
        const BUTTON3    = 0b0_0000_0100;
        /// Fourth button.
        const BUTTON4    = 0b0_0000_1000;
        /// Fifth button.
        const BUTTON5    = 0b0_0001_0000;
        /// Wheel rolled away from the user.
        const WHEEL_UP    = 0b0_0010_0000;
        /// Wheel rolled toward the user.
        const WHEEL_DOWN  = 0b0_0100_0000;
        /// Horizontal wheel, leftward.
        const WHEEL_LEFT  = 0b0_1000_0000;
        /// Horizontal wheel, rightward.
        const WHEEL_RIGHT = 0b1_0000_0000;
    }
}

/// Named keys.
///
/// `Rune` is the sentinel meaning "the event's rune field carries an
/// ordinary character".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// An ordinary character; see the event's rune.
    Rune,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Shift-Tab.
    Backtab,
    /// Enter / Return.
    Enter,
    /// Escape.
    Esc,
    /// Help.
    Help,
    /// Print / PrtScr.
    Print,
    /// Cancel / Break.
    Cancel,
    /// Exit.
    Exit,
    /// Clear.
    Clear,
    /// Pause.
    Pause,
    /// Function key F1..=F64.
    F(u8),
}

/// Payload type for application-posted events.
pub type UserPayload = Arc<dyn Any + Send + Sync>;

/// An input or lifecycle event.
#[derive(Clone)]
pub enum Event {
    /// A key press (or decoded character).
    Key {
        /// Which key, or [`Key::Rune`] for ordinary characters.
        key: Key,
        /// The character, when `key` is [`Key::Rune`] (or the raw byte
        /// of a single-byte key escape).
        ch: char,
        /// Active modifiers.
        mods: ModMask,
    },
    /// A mouse report. Coordinates are zero-based cell positions,
    /// clipped to the grid.
    Mouse {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Buttons currently pressed, or wheel impulses.
        buttons: ButtonMask,
        /// Active modifiers.
        mods: ModMask,
    },
    /// The terminal changed size.
    Resize {
        /// New width in columns.
        width: usize,
        /// New height in rows.
        height: usize,
    },
    /// An application-posted event; the library never produces these.
    User(UserPayload),
}

impl Event {
    /// Build a key event.
    #[must_use]
    pub fn key(key: Key, ch: char, mods: ModMask) -> Self {
        Event::Key { key, ch, mods }
    }

    /// Build a mouse event.
    #[must_use]
    pub fn mouse(x: i32, y: i32, buttons: ButtonMask, mods: ModMask) -> Self {
        Event::Mouse {
            x,
            y,
            buttons,
            mods,
        }
    }

    /// Build a resize event.
    #[must_use]
    pub fn resize(width: usize, height: usize) -> Self {
        Event::Resize { width, height }
    }

    /// Build a user event around an arbitrary payload.
    #[must_use]
    pub fn user<T: Any + Send + Sync>(payload: T) -> Self {
        Event::User(Arc::new(payload))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Event::Key { key, ch, mods },
                Event::Key {
                    key: k2,
                    ch: c2,
                    mods: m2,
                },
            ) => key == k2 && ch == c2 && mods == m2,
            (
                Event::Mouse {
                    x,
                    y,
                    buttons,
                    mods,
                },
                Event::Mouse {
                    x: x2,
                    y: y2,
                    buttons: b2,
                    mods: m2,
                },
            ) => x == x2 && y == y2 && buttons == b2 && mods == m2,
            (
                Event::Resize { width, height },
                Event::Resize {
                    width: w2,
                    height: h2,
                },
            ) => width == w2 && height == h2,
            // User payloads are opaque; identity comparison only.
            (Event::User(a), Event::User(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Key { key, ch, mods } => f
                .debug_struct("Key")
                .field("key", key)
                .field("ch", ch)
                .field("mods", mods)
                .finish(),
            Event::Mouse {
                x,
                y,
                buttons,
                mods,
            } => f
                .debug_struct("Mouse")
                .field("x", x)
                .field("y", y)
                .field("buttons", buttons)
                .field("mods", mods)
                .finish(),
            Event::Resize { width, height } => f
                .debug_struct("Resize")
                .field("width", width)
                .field("height", height)
                .finish(),
            Event::User(_) => f.write_str("User(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ButtonMask, Event, Key, ModMask};

    #[test]
    fn key_events_compare_componentwise() {
        let a = Event::key(Key::Rune, 'q', ModMask::empty());
        let b = Event::key(Key::Rune, 'q', ModMask::empty());
        assert_eq!(a, b);
        assert_ne!(a, Event::key(Key::Rune, 'q', ModMask::CTRL));
        assert_ne!(a, Event::key(Key::Up, 'q', ModMask::empty()));
    }

    #[test]
    fn mouse_events_compare_componentwise() {
        let a = Event::mouse(3, 4, ButtonMask::BUTTON1, ModMask::SHIFT);
        assert_eq!(a, Event::mouse(3, 4, ButtonMask::BUTTON1, ModMask::SHIFT));
        assert_ne!(a, Event::mouse(3, 4, ButtonMask::BUTTON2, ModMask::SHIFT));
    }

    #[test]
    fn user_events_compare_by_identity() {
        let a = Event::user(42u32);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Event::user(42u32));
    }

    #[test]
    fn variants_are_disjoint() {
        assert_ne!(
            Event::resize(80, 24),
            Event::mouse(80, 24, ButtonMask::empty(), ModMask::empty())
        );
    }

    #[test]
    fn function_keys_span_the_range() {
        assert_ne!(Key::F(1), Key::F(64));
        assert_eq!(Key::F(12), Key::F(12));
    }

    #[test]
    fn wheel_buttons_are_distinct_from_buttons() {
        let wheel = ButtonMask::WHEEL_UP | ButtonMask::WHEEL_DOWN;
        assert!((wheel & ButtonMask::BUTTON1).is_empty());
    }
}
