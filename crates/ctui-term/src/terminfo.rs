#![forbid(unsafe_code)]

//! Terminal capability provider.
//!
//! [`Terminfo`] carries the capability strings the reconciler emits and
//! the key escapes the decoder matches. Database parsing lives outside
//! this crate: [`lookup`] resolves a small set of built-in entries whose
//! capability strings are stored fully expanded, and embedders with more
//! exotic terminals construct a [`Terminfo`] themselves.
//!
//! The parametric capabilities every built-in entry shares (cursor
//! position, foreground/background selection, mouse mode) use the
//! standard CSI forms, produced by the methods below. They are exactly
//! the strings the corresponding terminfo parameter expansion yields for
//! these entries.

use ctui_core::{Error, Key, Result};

/// Capabilities and key escapes for one terminal type.
#[derive(Debug, Clone)]
pub struct Terminfo {
    /// Primary terminal name (`xterm-256color`, ...).
    pub name: String,
    /// Default width when the window size is unknown.
    pub columns: usize,
    /// Default height when the window size is unknown.
    pub lines: usize,
    /// Colors the palette exposes (8, 16, or 256).
    pub colors: i32,
    /// Enter the alternate screen.
    pub enter_ca: String,
    /// Leave the alternate screen.
    pub exit_ca: String,
    /// Clear the screen.
    pub clear: String,
    /// Make the cursor visible.
    pub show_cursor: String,
    /// Hide the cursor.
    pub hide_cursor: String,
    /// Reset all attributes.
    pub attr_off: String,
    /// Bold.
    pub bold: String,
    /// Dim.
    pub dim: String,
    /// Underline.
    pub underline: String,
    /// Reverse video.
    pub reverse: String,
    /// Blink.
    pub blink: String,
    /// Application keypad on.
    pub enter_keypad: String,
    /// Application keypad off.
    pub exit_keypad: String,
    /// Switch to the alternate character set.
    pub enter_acs: String,
    /// Switch back from the alternate character set.
    pub exit_acs: String,
    /// The terminal's ACS pairs (`vt100_name, terminal_char`, ...).
    pub acs_chars: String,
    /// Whether the terminal reports mouse activity at all.
    pub mouse: bool,
    /// Key escape sequences the terminal sends.
    pub keys: Vec<(Key, Vec<u8>)>,
}

impl Terminfo {
    /// Cursor position (zero-based input; CUP is one-based on the wire).
    #[must_use]
    pub fn goto(&self, x: usize, y: usize) -> String {
        format!("\x1b[{};{}H", y + 1, x + 1)
    }

    /// Foreground selection for a palette index.
    #[must_use]
    pub fn set_fg(&self, color: u16) -> String {
        sgr_color(color, self.colors, 30, 90, 38)
    }

    /// Background selection for a palette index.
    #[must_use]
    pub fn set_bg(&self, color: u16) -> String {
        sgr_color(color, self.colors, 40, 100, 48)
    }

    /// Mouse reporting on or off (button + drag + motion + SGR).
    #[must_use]
    pub fn mouse_mode(&self, enable: bool) -> String {
        let hl = if enable { 'h' } else { 'l' };
        format!("\x1b[?1000{hl}\x1b[?1002{hl}\x1b[?1003{hl}\x1b[?1006{hl}")
    }
}

fn sgr_color(color: u16, colors: i32, base: u16, bright: u16, extended: u16) -> String {
    if color < 8 {
        format!("\x1b[{}m", base + color)
    } else if color < 16 && colors >= 16 {
        format!("\x1b[{}m", bright + color - 8)
    } else if colors >= 256 {
        format!("\x1b[{extended};5;{color}m")
    } else {
        // Palette overflow on a small terminal: wrap into the base range.
        format!("\x1b[{}m", base + (color % 8))
    }
}

/// Resolve capabilities for `$TERM`.
///
/// Built-in entries cover the xterm, screen/tmux, and linux-console
/// families. Anything else is [`Error::UnsupportedTerminal`].
pub fn lookup(term: &str) -> Result<Terminfo> {
    let term = term.trim();
    if term.is_empty() {
        return Err(Error::UnsupportedTerminal(String::new()));
    }
    let colors = if term.ends_with("-256color") { 256 } else { 8 };
    if term == "linux" {
        return Ok(linux_console());
    }
    if term.starts_with("xterm") || term.starts_with("rxvt") {
        return Ok(xterm(term, colors));
    }
    if term.starts_with("screen") || term.starts_with("tmux") {
        return Ok(screen(term, colors));
    }
    Err(Error::UnsupportedTerminal(term.to_string()))
}

fn base_keys() -> Vec<(Key, Vec<u8>)> {
    vec![
        (Key::Backspace, b"\x7f".to_vec()),
        (Key::Insert, b"\x1b[2~".to_vec()),
        (Key::Delete, b"\x1b[3~".to_vec()),
        (Key::PageUp, b"\x1b[5~".to_vec()),
        (Key::PageDown, b"\x1b[6~".to_vec()),
        (Key::F(5), b"\x1b[15~".to_vec()),
        (Key::F(6), b"\x1b[17~".to_vec()),
        (Key::F(7), b"\x1b[18~".to_vec()),
        (Key::F(8), b"\x1b[19~".to_vec()),
        (Key::F(9), b"\x1b[20~".to_vec()),
        (Key::F(10), b"\x1b[21~".to_vec()),
        (Key::F(11), b"\x1b[23~".to_vec()),
        (Key::F(12), b"\x1b[24~".to_vec()),
        (Key::Backtab, b"\x1b[Z".to_vec()),
    ]
}

fn xterm(name: &str, colors: i32) -> Terminfo {
    let mut keys = base_keys();
    keys.extend([
        // Application-keypad arrows (smkx is sent at init).
        (Key::Up, b"\x1bOA".to_vec()),
        (Key::Down, b"\x1bOB".to_vec()),
        (Key::Right, b"\x1bOC".to_vec()),
        (Key::Left, b"\x1bOD".to_vec()),
        (Key::Home, b"\x1bOH".to_vec()),
        (Key::End, b"\x1bOF".to_vec()),
        (Key::F(1), b"\x1bOP".to_vec()),
        (Key::F(2), b"\x1bOQ".to_vec()),
        (Key::F(3), b"\x1bOR".to_vec()),
        (Key::F(4), b"\x1bOS".to_vec()),
        // Normal-mode arrows, for terminals that ignore smkx.
        (Key::Up, b"\x1b[A".to_vec()),
        (Key::Down, b"\x1b[B".to_vec()),
        (Key::Right, b"\x1b[C".to_vec()),
        (Key::Left, b"\x1b[D".to_vec()),
        (Key::Home, b"\x1b[H".to_vec()),
        (Key::End, b"\x1b[F".to_vec()),
    ]);
    Terminfo {
        name: name.to_string(),
        columns: 80,
        lines: 24,
        colors,
        enter_ca: "\x1b[?1049h".to_string(),
        exit_ca: "\x1b[?1049l".to_string(),
        clear: "\x1b[H\x1b[2J".to_string(),
        show_cursor: "\x1b[?25h".to_string(),
        hide_cursor: "\x1b[?25l".to_string(),
        attr_off: "\x1b[0m".to_string(),
        bold: "\x1b[1m".to_string(),
        dim: "\x1b[2m".to_string(),
        underline: "\x1b[4m".to_string(),
        reverse: "\x1b[7m".to_string(),
        blink: "\x1b[5m".to_string(),
        enter_keypad: "\x1b[?1h\x1b=".to_string(),
        exit_keypad: "\x1b[?1l\x1b>".to_string(),
        enter_acs: "\x1b(0".to_string(),
        exit_acs: "\x1b(B".to_string(),
        acs_chars: "``aaffggiijjkkllmmnnooppqqrrssttuuvvwwxxyyzz{{||}}~~".to_string(),
        mouse: true,
        keys,
    }
}

fn screen(name: &str, colors: i32) -> Terminfo {
    let mut ti = xterm(name, colors);
    ti.name = name.to_string();
    ti.enter_ca = "\x1b[?1049h".to_string();
    ti.keys.extend([
        (Key::Home, b"\x1b[1~".to_vec()),
        (Key::End, b"\x1b[4~".to_vec()),
    ]);
    ti
}

fn linux_console() -> Terminfo {
    let mut keys = base_keys();
    keys.extend([
        (Key::Up, b"\x1b[A".to_vec()),
        (Key::Down, b"\x1b[B".to_vec()),
        (Key::Right, b"\x1b[C".to_vec()),
        (Key::Left, b"\x1b[D".to_vec()),
        (Key::Home, b"\x1b[1~".to_vec()),
        (Key::End, b"\x1b[4~".to_vec()),
        (Key::F(1), b"\x1b[[A".to_vec()),
        (Key::F(2), b"\x1b[[B".to_vec()),
        (Key::F(3), b"\x1b[[C".to_vec()),
        (Key::F(4), b"\x1b[[D".to_vec()),
        (Key::F(5), b"\x1b[[E".to_vec()),
    ]);
    Terminfo {
        name: "linux".to_string(),
        columns: 80,
        lines: 24,
        colors: 8,
        enter_ca: String::new(),
        exit_ca: String::new(),
        clear: "\x1b[H\x1b[J".to_string(),
        show_cursor: "\x1b[?25h\x1b[?0c".to_string(),
        hide_cursor: "\x1b[?25l\x1b[?1c".to_string(),
        attr_off: "\x1b[0;10m".to_string(),
        bold: "\x1b[1m".to_string(),
        dim: "\x1b[2m".to_string(),
        underline: "\x1b[4m".to_string(),
        reverse: "\x1b[7m".to_string(),
        blink: "\x1b[5m".to_string(),
        enter_keypad: String::new(),
        exit_keypad: String::new(),
        enter_acs: "\x1b[11m".to_string(),
        exit_acs: "\x1b[10m".to_string(),
        acs_chars: "``aaffggiijjkkllmmnnooppqqrrssttuuvvwwxxyyzz{{||}}~~".to_string(),
        mouse: false,
        keys,
    }
}
