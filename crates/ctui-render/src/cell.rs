#![forbid(unsafe_code)]

//! Cell types and invariants.
//!
//! A [`Cell`] is one character position in the grid: a primary rune plus
//! any combining runes, a [`Style`], a display width, and a dirty flag the
//! reconciler uses to find work.
//!
//! # Invariants
//!
//! - `width` is 0, 1, or 2. Width 0 marks the follower half of a wide
//!   rune; cells holding content always report 1 or 2.
//! - Content writes set `dirty` only when the runes or style actually
//!   change. Only the reconciler clears `dirty`.

use smallvec::SmallVec;
use unicode_width::UnicodeWidthChar;

use crate::style::Style;

/// Display width of a single rune.
///
/// Controls and combining marks contribute 0; East-Asian Wide/Fullwidth
/// runes contribute 2; everything else 1.
#[must_use]
pub fn rune_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// One character position in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    ch: SmallVec<[char; 4]>,
    style: Style,
    width: u8,
    dirty: bool,
}

impl Cell {
    /// An empty cell: no runes (rendered as a space), default style,
    /// width 1, dirty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ch: SmallVec::new(),
            style: Style::DEFAULT,
            width: 1,
            dirty: true,
        }
    }

    /// Replace both content and style, as one write.
    pub fn set(&mut self, chars: &[char], style: Style) {
        self.put_chars(chars);
        self.put_style(style);
    }

    /// Replace the rune sequence. The primary rune determines the width;
    /// combining runes contribute nothing. A zero-width primary (a lone
    /// combining mark or a control) still occupies one column, so content
    /// never reports width 0.
    pub fn put_chars(&mut self, chars: &[char]) {
        if self.ch.as_slice() == chars {
            return;
        }
        self.ch.clear();
        self.ch.extend_from_slice(chars);
        self.width = match chars.first() {
            Some(&c) => rune_width(c).clamp(1, 2) as u8,
            None => 1,
        };
        self.dirty = true;
    }

    /// Replace the style.
    pub fn put_style(&mut self, style: Style) {
        if self.style != style {
            self.style = style;
            self.dirty = true;
        }
    }

    /// Turn this cell into the follower half of a wide rune: occupied,
    /// width 0, sharing the leader's style.
    pub fn put_follower(&mut self, style: Style) {
        if self.width != 0 || !self.ch.is_empty() {
            self.ch.clear();
            self.width = 0;
            self.dirty = true;
        }
        self.put_style(style);
    }

    /// Reset to (no runes, `style`, width 1, dirty).
    pub fn reset(&mut self, style: Style) {
        self.ch.clear();
        self.style = style;
        self.width = 1;
        self.dirty = true;
    }

    /// The rune sequence. Empty means "render a space".
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.ch
    }

    /// The cell's style.
    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Stored display width (0 only for wide-rune followers).
    #[must_use]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Whether the reconciler still owes this cell an update.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set or clear the dirty flag. Reconciler use only.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
