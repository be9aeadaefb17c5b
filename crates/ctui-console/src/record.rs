#![forbid(unsafe_code)]

//! Console input-record decoding.
//!
//! `ReadConsoleInput` hands back fixed-layout records; this module turns
//! their little-endian payloads into the common event model. Decoding is
//! pure so it can be exercised without a console.

use ctui_core::{ButtonMask, Event, Key, ModMask};

/// Record type tags (menu and focus records are ignored).
pub const KEY_EVENT: u16 = 1;
/// Mouse record tag.
pub const MOUSE_EVENT: u16 = 2;
/// Window-resize record tag.
pub const RESIZE_EVENT: u16 = 4;

/// One raw input record: the type tag plus the 16-byte event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputRecord {
    /// Record type (`KEY_EVENT`, `MOUSE_EVENT`, `RESIZE_EVENT`, ...).
    pub kind: u16,
    /// Event payload, little-endian.
    pub data: [u8; 16],
}

/// A decoded record.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Key events; a record with a repeat count expands to one event per
    /// repeat.
    Keys(Vec<Event>),
    /// A mouse event.
    Mouse(Event),
    /// The console window changed size.
    Resize {
        /// New width in columns.
        width: usize,
        /// New height in rows.
        height: usize,
    },
}

fn getu16(data: &[u8]) -> u16 {
    u16::from_le_bytes([data[0], data[1]])
}

fn geti16(data: &[u8]) -> i16 {
    getu16(data) as i16
}

fn getu32(data: &[u8]) -> u32 {
    u32::from_le_bytes([data[0], data[1], data[2], data[3]])
}

fn geti32(data: &[u8]) -> i32 {
    getu32(data) as i32
}

/// Control-key state bits to modifier mask. Left and right variants of
/// control and alt are folded together.
fn mod_mask(control_key_state: u32) -> ModMask {
    let mut mods = ModMask::empty();
    if control_key_state & (0x0008 | 0x0004) != 0 {
        mods |= ModMask::CTRL;
    }
    if control_key_state & (0x0002 | 0x0001) != 0 {
        mods |= ModMask::ALT;
    }
    if control_key_state & 0x0010 != 0 {
        mods |= ModMask::SHIFT;
    }
    mods
}

/// Virtual-key code to named key.
fn named_key(virtual_key: u16) -> Option<Key> {
    Some(match virtual_key {
        0x03 => Key::Cancel,
        0x08 => Key::Backspace,
        0x09 => Key::Tab,
        0x0c => Key::Clear,
        0x0d => Key::Enter,
        0x13 => Key::Pause,
        0x1b => Key::Esc,
        0x21 => Key::PageUp,
        0x22 => Key::PageDown,
        0x23 => Key::End,
        0x24 => Key::Home,
        0x25 => Key::Left,
        0x26 => Key::Up,
        0x27 => Key::Right,
        0x28 => Key::Down,
        0x2a | 0x2c => Key::Print,
        0x2d => Key::Insert,
        0x2e => Key::Delete,
        0x2f => Key::Help,
        0x70..=0x87 => Key::F((virtual_key - 0x70 + 1) as u8),
        _ => return None,
    })
}

/// Decode a raw record, or `None` when it carries nothing (key releases,
/// zero-repeat records, unrecognized types).
#[must_use]
pub fn decode_record(record: &RawInputRecord) -> Option<Decoded> {
    match record.kind {
        KEY_EVENT => decode_key(&record.data),
        MOUSE_EVENT => Some(decode_mouse(&record.data)),
        RESIZE_EVENT => {
            let width = geti16(&record.data[0..]).max(0) as usize;
            let height = geti16(&record.data[2..]).max(0) as usize;
            Some(Decoded::Resize { width, height })
        }
        _ => None,
    }
}

fn decode_key(data: &[u8]) -> Option<Decoded> {
    let is_down = geti32(&data[0..]);
    let repeat = getu16(&data[4..]);
    let virtual_key = getu16(&data[6..]);
    let ch = getu16(&data[10..]);
    let mods = mod_mask(getu32(&data[12..]));

    if is_down == 0 || repeat < 1 {
        // Key releases carry no information we deliver.
        return None;
    }

    let (key, rune) = if ch != 0 {
        let rune = char::from_u32(u32::from(ch)).unwrap_or(char::REPLACEMENT_CHARACTER);
        (Key::Rune, rune)
    } else {
        (named_key(virtual_key)?, '\0')
    };

    let events = (0..repeat)
        .map(|_| Event::key(key, rune, mods))
        .collect();
    Some(Decoded::Keys(events))
}

fn decode_mouse(data: &[u8]) -> Decoded {
    const V_WHEELED: u32 = 0x4;
    const H_WHEELED: u32 = 0x8;

    let x = geti16(&data[0..]);
    let y = geti16(&data[2..]);
    let button_state = getu32(&data[4..]);
    let mods = mod_mask(getu32(&data[8..]));
    let flags = getu32(&data[12..]);

    let mut buttons = ButtonMask::empty();
    if button_state & 0x1 != 0 {
        buttons |= ButtonMask::BUTTON1;
    }
    if button_state & 0x2 != 0 {
        buttons |= ButtonMask::BUTTON2;
    }
    if button_state & 0x4 != 0 {
        buttons |= ButtonMask::BUTTON3;
    }
    if button_state & 0x8 != 0 {
        buttons |= ButtonMask::BUTTON4;
    }
    if button_state & 0x10 != 0 {
        buttons |= ButtonMask::BUTTON5;
    }

    // Wheel direction rides the sign bit of the button word.
    if flags & V_WHEELED != 0 {
        buttons |= if button_state & 0x8000_0000 == 0 {
            ButtonMask::WHEEL_UP
        } else {
            ButtonMask::WHEEL_DOWN
        };
    }
    if flags & H_WHEELED != 0 {
        buttons |= if button_state & 0x8000_0000 == 0 {
            ButtonMask::WHEEL_RIGHT
        } else {
            ButtonMask::WHEEL_LEFT
        };
    }

    // Double clicks are delivered as ordinary press events.
    Decoded::Mouse(Event::mouse(i32::from(x), i32::from(y), buttons, mods))
}
