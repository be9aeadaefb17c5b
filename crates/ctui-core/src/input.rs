#![forbid(unsafe_code)]

//! Incremental input decoder.
//!
//! Turns raw terminal bytes into [`Event`]s. The same stream interleaves
//! UTF-8 (or charset-encoded) runes, terminfo-declared function-key
//! escapes, and two mouse-report encodings, and any of them can arrive
//! split across reads, so every sub-parser distinguishes "matched",
//! "needs more bytes", and "not mine".
//!
//! The decoder is a step function over `(buffer, expire)`: callers feed
//! bytes into a buffer and call [`InputDecoder::scan`] after each read.
//! `expire` is set when the read timed out, which flushes ambiguous
//! prefixes as raw runes instead of waiting forever.
//!
//! Only two pieces of state persist between calls: the wheel-debounce
//! flag and the charset decoder's internal state. Everything else lives
//! in the buffer, which keeps the decoder directly testable.

use crate::charset::{DecodeStep, RuneDecoder};
use crate::event::{ButtonMask, Event, Key, ModMask};

/// Charset mode for the rune sub-parser.
pub enum DecoderCharset {
    /// Native UTF-8: decode multi-byte sequences directly.
    Utf8,
    /// US-ASCII: a high bit means the byte arrived as an Alt chord.
    Ascii,
    /// Anything else: feed bytes through the charset's transformer.
    Codec(Box<dyn RuneDecoder>),
}

/// Result of one sub-parser attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parsed {
    /// Bytes consumed, event(s) emitted.
    Complete,
    /// The buffer is a prefix of something this parser recognizes.
    Partial,
    /// Definitely not this parser's input.
    Miss,
}

/// Incremental decoder for terminal input bytes.
pub struct InputDecoder {
    keys: Vec<(Key, Vec<u8>)>,
    charset: DecoderCharset,
    mouse_support: bool,
    /// Wheel debounce: a press was seen without an intervening release,
    /// so wheel-looking reports are reinterpreted as click-drag buttons.
    was_btn: bool,
    width: i32,
    height: i32,
}

impl std::fmt::Debug for InputDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDecoder")
            .field("keys", &self.keys.len())
            .field("mouse_support", &self.mouse_support)
            .field("was_btn", &self.was_btn)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl InputDecoder {
    /// Create a decoder for the given charset, with no keys registered
    /// and mouse reports disabled.
    #[must_use]
    pub fn new(charset: DecoderCharset) -> Self {
        Self {
            keys: Vec::new(),
            charset,
            mouse_support: false,
            was_btn: false,
            width: 0,
            height: 0,
        }
    }

    /// Declare a function-key escape sequence. Empty sequences are
    /// ignored.
    pub fn register_key(&mut self, key: Key, escape: &[u8]) {
        if !escape.is_empty() {
            self.keys.push((key, escape.to_vec()));
        }
    }

    /// Recognize mouse reports (only terminals that declare mouse
    /// support produce them).
    pub fn set_mouse_support(&mut self, enabled: bool) {
        self.mouse_support = enabled;
    }

    /// Update the grid dimensions used to clip mouse coordinates.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width as i32;
        self.height = height as i32;
    }

    /// Drain as many complete events as possible from `buf`.
    ///
    /// With `expire == false`, ambiguous prefixes are left in the buffer
    /// for the next read. With `expire == true` (read timeout), nothing
    /// more is coming: ambiguous bytes are delivered one at a time as
    /// raw [`Key::Rune`] events.
    pub fn scan(&mut self, buf: &mut Vec<u8>, expire: bool) -> Vec<Event> {
        let mut events = Vec::new();
        loop {
            if buf.is_empty() {
                break;
            }

            let mut partials = 0;

            match self.parse_rune(buf, &mut events) {
                Parsed::Complete => continue,
                Parsed::Partial => partials += 1,
                Parsed::Miss => {}
            }

            match self.parse_function_key(buf, expire, &mut events) {
                Parsed::Complete => continue,
                Parsed::Partial => partials += 1,
                Parsed::Miss => {}
            }

            if self.mouse_support {
                match self.parse_xterm_mouse(buf, &mut events) {
                    Parsed::Complete => continue,
                    Parsed::Partial => partials += 1,
                    Parsed::Miss => {}
                }
                match self.parse_sgr_mouse(buf, &mut events) {
                    Parsed::Complete => continue,
                    Parsed::Partial => partials += 1,
                    Parsed::Miss => {}
                }
            }

            if partials == 0 || expire {
                // Nothing can match, or we timed out waiting: deliver the
                // byte raw and let the application sort it out.
                let b = buf.remove(0);
                tracing::trace!(byte = b, expire, "unmatched input byte delivered raw");
                events.push(Event::key(Key::Rune, b as char, ModMask::empty()));
                continue;
            }

            // Partial match pending; wait for more bytes.
            break;
        }
        events
    }

    fn parse_rune(&mut self, buf: &mut Vec<u8>, events: &mut Vec<Event>) -> Parsed {
        let b0 = buf[0];

        if (0x20..=0x7E).contains(&b0) {
            // Printable ASCII: identical in every charset we accept.
            events.push(Event::key(Key::Rune, b0 as char, ModMask::empty()));
            buf.drain(..1);
            return Parsed::Complete;
        }
        if b0 < 0x80 {
            // No charset sequence starts with a low control byte.
            return Parsed::Miss;
        }

        match &mut self.charset {
            DecoderCharset::Utf8 => match utf8_sequence_len(b0) {
                Some(n) if buf.len() >= n => match std::str::from_utf8(&buf[..n]) {
                    Ok(s) => {
                        let ch = s.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                        events.push(Event::key(Key::Rune, ch, ModMask::empty()));
                        buf.drain(..n);
                        Parsed::Complete
                    }
                    Err(_) => {
                        events.push(Event::key(Key::Rune, char::REPLACEMENT_CHARACTER, ModMask::empty()));
                        buf.drain(..1);
                        Parsed::Complete
                    }
                },
                Some(_) => Parsed::Partial,
                None => {
                    // Stray continuation or illegal lead byte.
                    events.push(Event::key(Key::Rune, char::REPLACEMENT_CHARACTER, ModMask::empty()));
                    buf.drain(..1);
                    Parsed::Complete
                }
            },
            DecoderCharset::Ascii => {
                // ASCII cannot produce a high bit; it was an Alt chord.
                events.push(Event::key(Key::Rune, (b0 - 128) as char, ModMask::ALT));
                buf.drain(..1);
                Parsed::Complete
            }
            DecoderCharset::Codec(decoder) => {
                for len in 1..=buf.len() {
                    decoder.reset();
                    match decoder.decode(&buf[..len]) {
                        DecodeStep::Rune { ch, consumed } => {
                            events.push(Event::key(Key::Rune, ch, ModMask::empty()));
                            buf.drain(..consumed.max(1));
                            return Parsed::Complete;
                        }
                        DecodeStep::Incomplete => continue,
                        DecodeStep::Invalid { consumed } => {
                            buf.drain(..consumed.max(1));
                            return Parsed::Complete;
                        }
                    }
                }
                Parsed::Partial
            }
        }
    }

    /// Match terminfo-declared key escapes at the front of the buffer.
    ///
    /// Entries can be prefixes of one another (`ESC O` vs `ESC O A`), so
    /// a short match is only emitted once no longer escape can still
    /// complete — or on expire, when no more bytes are coming.
    fn parse_function_key(
        &mut self,
        buf: &mut Vec<u8>,
        expire: bool,
        events: &mut Vec<Event>,
    ) -> Parsed {
        let mut best: Option<(Key, usize)> = None;
        let mut longer_possible = false;

        for (key, escape) in &self.keys {
            if buf.starts_with(escape) {
                if best.map_or(true, |(_, len)| escape.len() > len) {
                    best = Some((*key, escape.len()));
                }
            } else if escape.starts_with(buf.as_slice()) {
                longer_possible = true;
            }
        }

        if let Some((key, len)) = best {
            if longer_possible && !expire {
                return Parsed::Partial;
            }
            // Single-byte escapes keep their raw byte as the rune.
            let ch = if len == 1 { buf[0] as char } else { '\0' };
            events.push(Event::key(key, ch, ModMask::empty()));
            buf.drain(..len);
            return Parsed::Complete;
        }
        if longer_possible {
            Parsed::Partial
        } else {
            Parsed::Miss
        }
    }

    /// Legacy X11 mouse report: `ESC [ M b x y`, trailing bytes offset
    /// by 32 with 1-based coordinates.
    fn parse_xterm_mouse(&mut self, buf: &mut Vec<u8>, events: &mut Vec<Event>) -> Parsed {
        let mut state = 0u8;
        let mut btn = 0i32;
        let mut x = 0i32;

        for i in 0..buf.len() {
            let b = buf[i];
            match state {
                0 => match b {
                    0x1b => state = 1,
                    0x9b => state = 2,
                    _ => return Parsed::Miss,
                },
                1 => {
                    if b != b'[' {
                        return Parsed::Miss;
                    }
                    state = 2;
                }
                2 => {
                    if b != b'M' {
                        return Parsed::Miss;
                    }
                    state = 3;
                }
                3 => {
                    btn = i32::from(b);
                    state = 4;
                }
                4 => {
                    x = i32::from(b) - 32 - 1;
                    state = 5;
                }
                _ => {
                    let y = i32::from(b) - 32 - 1;
                    buf.drain(..=i);
                    events.push(self.mouse_event(x, y, btn));
                    return Parsed::Complete;
                }
            }
        }
        Parsed::Partial
    }

    /// SGR mouse report: `ESC [ < btn ; x ; y (M|m)` with decimal
    /// parameters and 1-based coordinates. `m` is a release and forces
    /// an all-buttons-up synthesis.
    fn parse_sgr_mouse(&mut self, buf: &mut Vec<u8>, events: &mut Vec<Event>) -> Parsed {
        let mut state = 0u8;
        let mut btn = 0i32;
        let mut x = 0i32;
        let mut val = 0i32;
        let mut dig = false;
        let mut neg = false;

        for i in 0..buf.len() {
            let b = buf[i];
            match b {
                0x1b => {
                    if state != 0 {
                        return Parsed::Miss;
                    }
                    state = 1;
                }
                0x9b => {
                    if state != 0 {
                        return Parsed::Miss;
                    }
                    state = 2;
                }
                b'[' => {
                    if state != 1 {
                        return Parsed::Miss;
                    }
                    state = 2;
                }
                b'<' => {
                    if state != 2 {
                        return Parsed::Miss;
                    }
                    val = 0;
                    dig = false;
                    neg = false;
                    state = 3;
                }
                b'-' => {
                    if !matches!(state, 3..=5) || dig || neg {
                        return Parsed::Miss;
                    }
                    neg = true;
                }
                b'0'..=b'9' => {
                    if !matches!(state, 3..=5) {
                        return Parsed::Miss;
                    }
                    val = val * 10 + i32::from(b - b'0');
                    dig = true;
                }
                b';' => {
                    if neg {
                        val = -val;
                    }
                    match state {
                        3 => {
                            btn = val;
                            val = 0;
                            neg = false;
                            dig = false;
                            state = 4;
                        }
                        4 => {
                            x = val;
                            val = 0;
                            neg = false;
                            dig = false;
                            state = 5;
                        }
                        _ => return Parsed::Miss,
                    }
                }
                b'M' | b'm' => {
                    if state != 5 {
                        return Parsed::Miss;
                    }
                    if neg {
                        val = -val;
                    }
                    let y = val;

                    // The motion bit carries no button state.
                    btn &= !0x20;
                    if b == b'm' {
                        // Release: synthesize "all buttons up".
                        btn |= 3;
                        btn &= !0x40;
                    }
                    buf.drain(..=i);
                    events.push(self.mouse_event(x - 1, y - 1, btn));
                    return Parsed::Complete;
                }
                _ => return Parsed::Miss,
            }
        }
        Parsed::Partial
    }

    /// Decode a raw button word into an event, applying the wheel
    /// debounce and clipping coordinates to the grid.
    ///
    /// Wheel impulses are sometimes misdelivered during a click-drag;
    /// after a press with no intervening release, wheel-looking codes
    /// are treated as the dragged button instead.
    fn mouse_event(&mut self, x: i32, y: i32, btn: i32) -> Event {
        let mut buttons = ButtonMask::empty();
        match btn & 0x43 {
            0 => {
                buttons = ButtonMask::BUTTON1;
                self.was_btn = true;
            }
            1 => {
                buttons = ButtonMask::BUTTON2;
                self.was_btn = true;
            }
            2 => {
                buttons = ButtonMask::BUTTON3;
                self.was_btn = true;
            }
            3 => {
                self.was_btn = false;
            }
            0x40 => {
                buttons = if self.was_btn {
                    ButtonMask::BUTTON1
                } else {
                    ButtonMask::WHEEL_UP
                };
            }
            0x41 => {
                buttons = if self.was_btn {
                    ButtonMask::BUTTON2
                } else {
                    ButtonMask::WHEEL_DOWN
                };
            }
            0x42 => {
                buttons = if self.was_btn {
                    ButtonMask::BUTTON3
                } else {
                    ButtonMask::WHEEL_LEFT
                };
            }
            _ => {
                if !self.was_btn {
                    buttons = ButtonMask::WHEEL_RIGHT;
                }
            }
        }

        let mut mods = ModMask::empty();
        if btn & 0x04 != 0 {
            mods |= ModMask::SHIFT;
        }
        if btn & 0x08 != 0 {
            mods |= ModMask::META;
        }
        if btn & 0x10 != 0 {
            mods |= ModMask::CTRL;
        }

        // Click-drag reports can land outside the screen; clip.
        let x = x.clamp(0, (self.width - 1).max(0));
        let y = y.clamp(0, (self.height - 1).max(0));
        Event::mouse(x, y, buttons, mods)
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` when the
/// byte cannot begin one.
const fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{DecoderCharset, InputDecoder};
    use crate::charset::lookup_encoding;
    use crate::event::{ButtonMask, Event, Key, ModMask};

    fn decoder() -> InputDecoder {
        let mut d = InputDecoder::new(DecoderCharset::Utf8);
        d.set_size(80, 24);
        d.register_key(Key::Up, b"\x1b[A");
        d.register_key(Key::Down, b"\x1b[B");
        d.register_key(Key::F(1), b"\x1bOP");
        d.register_key(Key::Backspace, b"\x7f");
        d.set_mouse_support(true);
        d
    }

    fn scan_all(d: &mut InputDecoder, bytes: &[u8], expire: bool) -> (Vec<Event>, usize) {
        let mut buf = bytes.to_vec();
        let events = d.scan(&mut buf, expire);
        (events, buf.len())
    }

    #[test]
    fn printable_ascii_is_immediate() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, b"hi", false);
        assert_eq!(left, 0);
        assert_eq!(
            events,
            vec![
                Event::key(Key::Rune, 'h', ModMask::empty()),
                Event::key(Key::Rune, 'i', ModMask::empty()),
            ]
        );
    }

    #[test]
    fn utf8_rune_decodes_whole_sequence() {
        // U+2603 SNOWMAN.
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, &[0xE2, 0x98, 0x83], false);
        assert_eq!(left, 0);
        assert_eq!(events, vec![Event::key(Key::Rune, '\u{2603}', ModMask::empty())]);
    }

    #[test]
    fn utf8_partial_sequence_waits() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, &[0xE2, 0x98], false);
        assert!(events.is_empty());
        assert_eq!(left, 2);
    }

    #[test]
    fn invalid_utf8_degrades_to_replacement() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, &[0xFF], false);
        assert_eq!(left, 0);
        assert_eq!(
            events,
            vec![Event::key(Key::Rune, char::REPLACEMENT_CHARACTER, ModMask::empty())]
        );
    }

    #[test]
    fn function_key_consumes_whole_escape() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, b"\x1b[A", false);
        assert_eq!(left, 0);
        assert_eq!(events, vec![Event::key(Key::Up, '\0', ModMask::empty())]);
    }

    #[test]
    fn single_byte_escape_carries_raw_rune() {
        let mut d = decoder();
        let (events, _) = scan_all(&mut d, b"\x7f", false);
        assert_eq!(events, vec![Event::key(Key::Backspace, '\x7f', ModMask::empty())]);
    }

    #[test]
    fn lone_escape_waits_then_expires_raw() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, b"\x1b", false);
        assert!(events.is_empty());
        assert_eq!(left, 1);

        let (events, left) = scan_all(&mut d, b"\x1b", true);
        assert_eq!(left, 0);
        assert_eq!(events, vec![Event::key(Key::Rune, '\x1b', ModMask::empty())]);
    }

    #[test]
    fn ambiguous_prefix_waits_for_longer_match() {
        let mut d = InputDecoder::new(DecoderCharset::Utf8);
        d.set_size(80, 24);
        d.register_key(Key::Esc, b"\x1bO");
        d.register_key(Key::F(1), b"\x1bOP");

        // "\x1bO" alone must not emit Esc while F1 is still possible.
        let mut buf = b"\x1bO".to_vec();
        assert!(d.scan(&mut buf, false).is_empty());
        assert_eq!(buf.len(), 2);

        // Completing the longer escape wins.
        buf.push(b'P');
        assert_eq!(
            d.scan(&mut buf, false),
            vec![Event::key(Key::F(1), '\0', ModMask::empty())]
        );

        // On expire the shorter match is delivered rather than lost.
        let mut buf = b"\x1bO".to_vec();
        assert_eq!(
            d.scan(&mut buf, true),
            vec![Event::key(Key::Esc, '\0', ModMask::empty())]
        );
    }

    #[test]
    fn shorter_match_emits_when_no_longer_possible() {
        let mut d = InputDecoder::new(DecoderCharset::Utf8);
        d.set_size(80, 24);
        d.register_key(Key::Esc, b"\x1bO");
        d.register_key(Key::F(1), b"\x1bOP");

        // 'Q' rules out F1, so Esc is emitted and 'Q' becomes a rune.
        let mut buf = b"\x1bOQ".to_vec();
        assert_eq!(
            d.scan(&mut buf, false),
            vec![
                Event::key(Key::Esc, '\0', ModMask::empty()),
                Event::key(Key::Rune, 'Q', ModMask::empty()),
            ]
        );
    }

    #[test]
    fn sgr_press_and_release() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, b"\x1b[<0;10;20M", false);
        assert_eq!(left, 0);
        assert_eq!(
            events,
            vec![Event::mouse(9, 19, ButtonMask::BUTTON1, ModMask::empty())]
        );

        let (events, _) = scan_all(&mut d, b"\x1b[<0;10;20m", false);
        assert_eq!(
            events,
            vec![Event::mouse(9, 19, ButtonMask::empty(), ModMask::empty())]
        );
    }

    #[test]
    fn sgr_partial_report_waits() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, b"\x1b[<0;10", false);
        assert!(events.is_empty());
        assert_eq!(left, 7);
    }

    #[test]
    fn sgr_modifier_bits() {
        let mut d = decoder();
        // Shift (4) + Ctrl (16) on button 0 = 20.
        let (events, _) = scan_all(&mut d, b"\x1b[<20;1;1M", false);
        assert_eq!(
            events,
            vec![Event::mouse(
                0,
                0,
                ButtonMask::BUTTON1,
                ModMask::SHIFT | ModMask::CTRL
            )]
        );
    }

    #[test]
    fn sgr_coordinates_clip_to_grid() {
        let mut d = decoder();
        d.set_size(10, 5);
        let (events, _) = scan_all(&mut d, b"\x1b[<0;500;500M", false);
        assert_eq!(
            events,
            vec![Event::mouse(9, 4, ButtonMask::BUTTON1, ModMask::empty())]
        );
    }

    #[test]
    fn sgr_motion_bit_is_discarded() {
        let mut d = decoder();
        // 32 (motion) + button 0 during drag.
        let (events, _) = scan_all(&mut d, b"\x1b[<32;3;3M", false);
        assert_eq!(
            events,
            vec![Event::mouse(2, 2, ButtonMask::BUTTON1, ModMask::empty())]
        );
    }

    #[test]
    fn wheel_debounced_during_click_drag() {
        let mut d = decoder();
        // Press button 1.
        scan_all(&mut d, b"\x1b[<0;1;1M", false);
        // A "wheel up" with the button still down is really the button.
        let (events, _) = scan_all(&mut d, b"\x1b[<64;1;1M", false);
        assert_eq!(
            events,
            vec![Event::mouse(0, 0, ButtonMask::BUTTON1, ModMask::empty())]
        );
        // After the release it is a wheel again.
        scan_all(&mut d, b"\x1b[<0;1;1m", false);
        let (events, _) = scan_all(&mut d, b"\x1b[<64;1;1M", false);
        assert_eq!(
            events,
            vec![Event::mouse(0, 0, ButtonMask::WHEEL_UP, ModMask::empty())]
        );
    }

    #[test]
    fn xterm_mouse_report_round_trips() {
        let mut d = decoder();
        // Button 0 press (cb = 32), at column 11, row 21 (1-based + 32).
        let bytes = [0x1b, b'[', b'M', 32, 33 + 10, 33 + 20];
        let (events, left) = scan_all(&mut d, &bytes, false);
        assert_eq!(left, 0);
        assert_eq!(
            events,
            vec![Event::mouse(10, 20, ButtonMask::BUTTON1, ModMask::empty())]
        );
    }

    #[test]
    fn xterm_mouse_partial_waits() {
        let mut d = decoder();
        let (events, left) = scan_all(&mut d, &[0x1b, b'[', b'M', 32], false);
        assert!(events.is_empty());
        assert_eq!(left, 4);
    }

    #[test]
    fn mouse_reports_ignored_without_support() {
        let mut d = InputDecoder::new(DecoderCharset::Utf8);
        d.set_size(80, 24);
        let (events, _) = scan_all(&mut d, b"\x1b[<0;1;1M", false);
        // Degrades to raw runes instead of a mouse event.
        assert!(events
            .iter()
            .all(|e| matches!(e, Event::Key { key: Key::Rune, .. })));
    }

    #[test]
    fn ascii_charset_maps_high_bit_to_alt() {
        let mut d = InputDecoder::new(DecoderCharset::Ascii);
        d.set_size(80, 24);
        let (events, _) = scan_all(&mut d, &[b'a' + 128], false);
        assert_eq!(events, vec![Event::key(Key::Rune, 'a', ModMask::ALT)]);
    }

    #[test]
    fn codec_charset_feeds_transformer() {
        let enc = lookup_encoding("latin1").unwrap();
        let mut d = InputDecoder::new(DecoderCharset::Codec(enc.decoder()));
        d.set_size(80, 24);
        let (events, left) = scan_all(&mut d, &[0xE9], false);
        assert_eq!(left, 0);
        assert_eq!(events, vec![Event::key(Key::Rune, 'é', ModMask::empty())]);
    }

    #[test]
    fn control_bytes_without_match_deliver_raw() {
        let mut d = decoder();
        let (events, _) = scan_all(&mut d, &[0x01], false);
        assert_eq!(events, vec![Event::key(Key::Rune, '\x01', ModMask::empty())]);
    }

    #[test]
    fn interleaved_stream_stays_in_sync() {
        let mut d = decoder();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"a\x1b[A");
        bytes.extend_from_slice(&[0xE2, 0x98, 0x83]);
        bytes.extend_from_slice(b"\x1b[<0;2;2M");
        bytes.extend_from_slice(b"z");
        let (events, left) = scan_all(&mut d, &bytes, false);
        assert_eq!(left, 0);
        assert_eq!(
            events,
            vec![
                Event::key(Key::Rune, 'a', ModMask::empty()),
                Event::key(Key::Up, '\0', ModMask::empty()),
                Event::key(Key::Rune, '\u{2603}', ModMask::empty()),
                Event::mouse(1, 1, ButtonMask::BUTTON1, ModMask::empty()),
                Event::key(Key::Rune, 'z', ModMask::empty()),
            ]
        );
    }
}

#[cfg(test)]
mod decoder_proptests {
    use super::{DecoderCharset, InputDecoder};
    use crate::event::{Event, Key, ModMask};
    use proptest::prelude::*;

    fn decoder() -> InputDecoder {
        let mut d = InputDecoder::new(DecoderCharset::Utf8);
        d.set_size(200, 200);
        d.register_key(Key::Up, b"\x1b[A");
        d.register_key(Key::Down, b"\x1b[B");
        d.register_key(Key::Home, b"\x1b[1~");
        d.register_key(Key::F(5), b"\x1b[15~");
        d.set_mouse_support(true);
        d
    }

    proptest! {
        /// A strict prefix of a complete sequence yields no
        /// events without expire.
        #[test]
        fn strict_prefix_emits_nothing(cut in 1usize..10) {
            let complete: &[u8] = b"\x1b[<0;10;20M";
            prop_assume!(cut < complete.len());
            let mut d = decoder();
            let mut buf = complete[..cut].to_vec();
            let events = d.scan(&mut buf, false);
            prop_assert!(events.is_empty());
            prop_assert_eq!(buf.len(), cut);
        }

        /// Every printable rune round-trips through UTF-8.
        #[test]
        fn utf8_round_trip(cp in 0x20u32..0x2_0000) {
            prop_assume!(!(0xD800..=0xDFFF).contains(&cp));
            let ch = char::from_u32(cp).unwrap();
            prop_assume!(ch as u32 >= 0x20 && !ch.is_control());
            let mut d = decoder();
            let mut buf = ch.to_string().into_bytes();
            let events = d.scan(&mut buf, false);
            prop_assert_eq!(events, vec![Event::key(Key::Rune, ch, ModMask::empty())]);
            prop_assert!(buf.is_empty());
        }

        /// SGR press reports round-trip with clipping.
        #[test]
        fn sgr_round_trip((btn, x, y) in (0u8..3, 1i32..500, 1i32..500)) {
            let mut d = decoder();
            d.set_size(80, 24);
            let mut buf = format!("\x1b[<{btn};{x};{y}M").into_bytes();
            let events = d.scan(&mut buf, false);
            prop_assert!(buf.is_empty());
            prop_assert_eq!(events.len(), 1);
            match events[0] {
                Event::Mouse { x: ex, y: ey, .. } => {
                    prop_assert_eq!(ex, (x - 1).clamp(0, 79));
                    prop_assert_eq!(ey, (y - 1).clamp(0, 23));
                }
                _ => prop_assert!(false, "expected mouse event"),
            }
        }

        /// Registered escapes decode to exactly their key.
        #[test]
        fn registered_escape_round_trip(idx in 0usize..4) {
            let table: [(&[u8], Key); 4] = [
                (b"\x1b[A", Key::Up),
                (b"\x1b[B", Key::Down),
                (b"\x1b[1~", Key::Home),
                (b"\x1b[15~", Key::F(5)),
            ];
            let (esc, key) = table[idx];
            let mut d = decoder();
            let mut buf = esc.to_vec();
            let events = d.scan(&mut buf, false);
            prop_assert_eq!(events, vec![Event::key(key, '\0', ModMask::empty())]);
            prop_assert!(buf.is_empty());
        }
    }
}
