#![forbid(unsafe_code)]

//! Style to console-attribute mapping.
//!
//! The console renders 16 colors as 4-bit RGB-intensity codes (red=4,
//! green=2, blue=1, +8 for bright) packed as `bg << 4 | fg`. Reverse
//! video has to be simulated by swapping the colors before packing;
//! underline is best-effort via the DBCS attribute bit; blink does not
//! exist and is silently dropped.

use ctui_render::{AttrMask, Color, Style};

/// Bright-intensity bit.
const INTENSITY: u16 = 0x8;
/// Best-effort underline (COMMON_LVB_UNDERSCORE).
const UNDERSCORE: u16 = 0x8000;

/// Map a color to its 4-bit console code. `Default` resolves per
/// `is_foreground` (white foreground, black background). Palette
/// entries beyond the console's 16 wrap into them.
#[must_use]
pub fn color_attr(color: Color, is_foreground: bool) -> u16 {
    let index = match color.index() {
        None => return if is_foreground { 0x7 } else { 0x0 },
        Some(i) => i % 16,
    };
    match index {
        0 => 0x0,  // black
        1 => 0x4,  // red
        2 => 0x2,  // green
        3 => 0x6,  // yellow
        4 => 0x1,  // blue
        5 => 0x5,  // magenta
        6 => 0x3,  // cyan
        7 => 0x7,  // white
        8 => 0x8,  // gray
        9 => 0xc,  // bright red
        10 => 0xa, // bright green
        11 => 0xe, // bright yellow
        12 => 0x9, // bright blue
        13 => 0xd, // bright magenta
        14 => 0xb, // bright cyan
        _ => 0xf,  // bright white
    }
}

/// Compose the console attribute word for a style.
#[must_use]
pub fn map_style(style: Style) -> u16 {
    let (fg, bg, attrs) = style.decompose();
    let f = color_attr(fg, true);
    let b = color_attr(bg, false);

    // The console cannot reverse video; swap the colors ourselves.
    let mut attr = if attrs.contains(AttrMask::REVERSE) {
        b | (f << 4)
    } else {
        f | (b << 4)
    };

    if attrs.contains(AttrMask::BOLD) {
        attr |= INTENSITY;
    }
    if attrs.contains(AttrMask::DIM) {
        attr &= !INTENSITY;
    }
    if attrs.contains(AttrMask::UNDERLINE) {
        attr |= UNDERSCORE;
    }
    // Blink is unsupported.
    attr
}
