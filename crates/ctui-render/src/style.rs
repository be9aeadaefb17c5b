#![forbid(unsafe_code)]

//! Styles: a packed (foreground, background, attributes) triple.
//!
//! A [`Style`] packs into a single `u32` so cells stay small and style
//! comparison during reconciliation is one integer compare. The packing is
//! private; [`Style::decompose`] is the lossless public view.
//!
//! # Layout
//!
//! ```text
//! [22-18: AttrMask (5 bits)][17-9: bg (9 bits)][8-0: fg (9 bits)]
//! ```
//!
//! Color fields store `0` for the terminal default and `palette index + 1`
//! otherwise, so `Default` is distinct from palette entry 0 (black).

bitflags::bitflags! {
    /// Per-cell display attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrMask: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM       = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
        /// Reverse video (swap fg/bg).
        const REVERSE   = 0b0000_1000;
        /// Blinking text.
        const BLINK     = 0b0001_0000;
    }
}

/// A terminal color: the terminal default, a named ANSI entry, or an
/// indexed palette entry.
///
/// `Default` means "whatever the terminal renders when no color is set"
/// and is distinct from every palette entry. Named colors are aliases for
/// palette indices 0-15; equality is by palette index, so
/// `Color::Indexed(1) == Color::Red`.
#[derive(Debug, Clone, Copy)]
pub enum Color {
    /// The terminal's default color (no color emitted).
    Default,
    /// ANSI 0.
    Black,
    /// ANSI 1.
    Red,
    /// ANSI 2.
    Green,
    /// ANSI 3.
    Yellow,
    /// ANSI 4.
    Blue,
    /// ANSI 5.
    Magenta,
    /// ANSI 6.
    Cyan,
    /// ANSI 7.
    White,
    /// ANSI 8 (bright black).
    Gray,
    /// ANSI 9.
    BrightRed,
    /// ANSI 10.
    BrightGreen,
    /// ANSI 11.
    BrightYellow,
    /// ANSI 12.
    BrightBlue,
    /// ANSI 13.
    BrightMagenta,
    /// ANSI 14.
    BrightCyan,
    /// ANSI 15.
    BrightWhite,
    /// An entry in the 256-color palette.
    Indexed(u8),
}

impl Color {
    /// The palette index, or `None` for the terminal default.
    #[must_use]
    pub const fn index(self) -> Option<u16> {
        match self {
            Color::Default => None,
            Color::Black => Some(0),
            Color::Red => Some(1),
            Color::Green => Some(2),
            Color::Yellow => Some(3),
            Color::Blue => Some(4),
            Color::Magenta => Some(5),
            Color::Cyan => Some(6),
            Color::White => Some(7),
            Color::Gray => Some(8),
            Color::BrightRed => Some(9),
            Color::BrightGreen => Some(10),
            Color::BrightYellow => Some(11),
            Color::BrightBlue => Some(12),
            Color::BrightMagenta => Some(13),
            Color::BrightCyan => Some(14),
            Color::BrightWhite => Some(15),
            Color::Indexed(n) => Some(n as u16),
        }
    }

    /// Reconstruct a color from a palette index. Indices 0-15 resolve to
    /// the named variants.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Color::Black,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            7 => Color::White,
            8 => Color::Gray,
            9 => Color::BrightRed,
            10 => Color::BrightGreen,
            11 => Color::BrightYellow,
            12 => Color::BrightBlue,
            13 => Color::BrightMagenta,
            14 => Color::BrightCyan,
            15 => Color::BrightWhite,
            n => Color::Indexed(n),
        }
    }

    /// True when this is the terminal default.
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Color::Default)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.index() == other.index()
    }
}

impl Eq for Color {}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Default
    }
}

const COLOR_BITS: u32 = 9;
const COLOR_MASK: u32 = (1 << COLOR_BITS) - 1;
const ATTR_SHIFT: u32 = 2 * COLOR_BITS;

/// A packed (fg, bg, attrs) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Style(u32);

impl Style {
    /// The default style: default colors, no attributes.
    pub const DEFAULT: Self = Self(0);

    /// Compose a style from its parts.
    #[must_use]
    pub const fn new(fg: Color, bg: Color, attrs: AttrMask) -> Self {
        let f = match fg.index() {
            Some(i) => i as u32 + 1,
            None => 0,
        };
        let b = match bg.index() {
            Some(i) => i as u32 + 1,
            None => 0,
        };
        Self(f | (b << COLOR_BITS) | ((attrs.bits() as u32) << ATTR_SHIFT))
    }

    /// Split into (fg, bg, attrs). Lossless with respect to [`Style::new`].
    #[must_use]
    pub const fn decompose(self) -> (Color, Color, AttrMask) {
        (self.fg(), self.bg(), self.attrs())
    }

    /// The foreground color.
    #[must_use]
    pub const fn fg(self) -> Color {
        Self::unpack_color(self.0 & COLOR_MASK)
    }

    /// The background color.
    #[must_use]
    pub const fn bg(self) -> Color {
        Self::unpack_color((self.0 >> COLOR_BITS) & COLOR_MASK)
    }

    /// The attribute set.
    #[must_use]
    pub const fn attrs(self) -> AttrMask {
        AttrMask::from_bits_truncate((self.0 >> ATTR_SHIFT) as u8)
    }

    /// Replace the foreground.
    #[must_use]
    pub const fn with_fg(self, fg: Color) -> Self {
        Self::new(fg, self.bg(), self.attrs())
    }

    /// Replace the background.
    #[must_use]
    pub const fn with_bg(self, bg: Color) -> Self {
        Self::new(self.fg(), bg, self.attrs())
    }

    /// Replace the attribute set.
    #[must_use]
    pub const fn with_attrs(self, attrs: AttrMask) -> Self {
        Self::new(self.fg(), self.bg(), attrs)
    }

    const fn unpack_color(field: u32) -> Color {
        if field == 0 {
            Color::Default
        } else {
            Color::from_index((field - 1) as u8)
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::{AttrMask, Color, Style};

    #[test]
    fn style_is_4_bytes() {
        assert_eq!(core::mem::size_of::<Style>(), 4);
    }

    #[test]
    fn default_style_decomposes_to_defaults() {
        let (fg, bg, attrs) = Style::DEFAULT.decompose();
        assert_eq!(fg, Color::Default);
        assert_eq!(bg, Color::Default);
        assert!(attrs.is_empty());
    }

    #[test]
    fn default_color_is_distinct_from_black() {
        assert_ne!(Color::Default, Color::Black);
        let s = Style::new(Color::Black, Color::Default, AttrMask::empty());
        assert_eq!(s.fg(), Color::Black);
        assert_eq!(s.bg(), Color::Default);
    }

    #[test]
    fn named_colors_equal_their_indices() {
        assert_eq!(Color::Red, Color::Indexed(1));
        assert_eq!(Color::BrightWhite, Color::Indexed(15));
        assert_ne!(Color::Red, Color::Indexed(2));
    }

    #[test]
    fn decompose_round_trips_named_colors() {
        let s = Style::new(Color::Red, Color::Blue, AttrMask::BOLD | AttrMask::BLINK);
        let (fg, bg, attrs) = s.decompose();
        assert_eq!(fg, Color::Red);
        assert_eq!(bg, Color::Blue);
        assert_eq!(attrs, AttrMask::BOLD | AttrMask::BLINK);
    }

    #[test]
    fn decompose_round_trips_indexed_colors() {
        let s = Style::new(Color::Indexed(231), Color::Indexed(16), AttrMask::empty());
        assert_eq!(s.fg(), Color::Indexed(231));
        assert_eq!(s.bg(), Color::Indexed(16));
    }

    #[test]
    fn builders_preserve_other_fields() {
        let s = Style::new(Color::Green, Color::Black, AttrMask::UNDERLINE);
        let s2 = s.with_fg(Color::Yellow);
        assert_eq!(s2.fg(), Color::Yellow);
        assert_eq!(s2.bg(), Color::Black);
        assert_eq!(s2.attrs(), AttrMask::UNDERLINE);

        let s3 = s.with_attrs(AttrMask::REVERSE);
        assert_eq!(s3.fg(), Color::Green);
        assert_eq!(s3.attrs(), AttrMask::REVERSE);
    }

    #[test]
    fn styles_compare_componentwise() {
        let a = Style::new(Color::Red, Color::Default, AttrMask::BOLD);
        let b = Style::new(Color::Indexed(1), Color::Default, AttrMask::BOLD);
        assert_eq!(a, b);
        assert_ne!(a, b.with_attrs(AttrMask::DIM));
    }
}

#[cfg(test)]
mod style_proptests {
    use super::{AttrMask, Color, Style};
    use proptest::prelude::*;

    fn arb_color() -> impl Strategy<Value = Color> {
        prop_oneof![
            Just(Color::Default),
            any::<u8>().prop_map(Color::from_index),
        ]
    }

    fn arb_attrs() -> impl Strategy<Value = AttrMask> {
        any::<u8>().prop_map(AttrMask::from_bits_truncate)
    }

    proptest! {
        #[test]
        fn pack_unpack_is_lossless(tuple in (arb_color(), arb_color(), arb_attrs())) {
            let (fg, bg, attrs) = tuple;
            let (f, b, a) = Style::new(fg, bg, attrs).decompose();
            prop_assert_eq!(f, fg);
            prop_assert_eq!(b, bg);
            prop_assert_eq!(a, attrs);
        }

        #[test]
        fn color_index_round_trips(index in any::<u8>()) {
            let c = Color::from_index(index);
            prop_assert_eq!(c.index(), Some(index as u16));
        }
    }
}
