#![forbid(unsafe_code)]

//! Terminfo-driven screen.
//!
//! [`TermScreen`] owns the grid behind one mutex and reconciles it with
//! the physical terminal on [`Screen::show`]. Input runs on a dedicated
//! thread: blocking reads with a termios timeout feed the incremental
//! decoder, and a read timeout flushes ambiguous prefixes. A second
//! thread turns SIGWINCH into grid resizes and synthetic resize events.
//!
//! Lock discipline: the state mutex guards the grid, dimensions, styles,
//! cursor positions, and the output writer. The input thread never takes
//! it while reading; the resize thread takes it only to resize. `show()`
//! holds it for the whole reconcile pass.

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use ctui_core::charset::{self, lookup_encoding, RuneEncoder};
use ctui_core::{DecoderCharset, Error, Event, InputDecoder, Result, Screen};
use ctui_render::{AttrMask, Cell, Grid, Style};

use crate::acs::{build_acs_map, AcsMap};
use crate::terminfo::{lookup, Terminfo};
use crate::writer::PadWriter;

/// Bounded event-channel capacity.
const EVENT_CHANNEL_CAPACITY: usize = 10;

/// Input read chunk size.
const READ_CHUNK: usize = 128;

/// A screen backed by terminfo capabilities and a POSIX terminal.
pub struct TermScreen {
    inner: Arc<Inner>,
}

struct Inner {
    caps: Terminfo,
    acs: AcsMap,
    live: bool,
    state: Mutex<State>,
    quit: AtomicBool,
    finalized: AtomicBool,
    // Grid dimensions mirrored for the input thread's mouse clipping.
    width: AtomicUsize,
    height: AtomicUsize,
    tx: Mutex<Option<SyncSender<Event>>>,
    rx: Mutex<Receiver<Event>>,
    threads: Mutex<Vec<JoinHandle<()>>>,
    #[cfg(unix)]
    signal_handle: Mutex<Option<signal_hook::iterator::Handle>>,
}

struct State {
    grid: Grid,
    /// Default style: used by `clear` and substituted for
    /// `Style::DEFAULT` cells while drawing.
    style: Style,
    /// Desired cursor; negative or out of range means hidden.
    cursor_x: i32,
    cursor_y: i32,
    /// Tracked physical cursor; -1 means unknown.
    cx: i32,
    cy: i32,
    /// Last emitted style; `None` means unknown.
    curstyle: Option<Style>,
    clear_pending: bool,
    out: PadWriter<Box<dyn Write + Send>>,
    charset: String,
    encoder: Option<Box<dyn RuneEncoder>>,
    #[cfg(unix)]
    tty: Option<std::fs::File>,
    #[cfg(unix)]
    saved_termios: Option<nix::sys::termios::Termios>,
}

impl TermScreen {
    /// Build a screen for the terminal named by `$TERM`, sized from the
    /// capability defaults overridden by `$LINES` / `$COLUMNS`.
    ///
    /// The terminal itself is not touched until [`Screen::init`].
    pub fn new() -> Result<Self> {
        let term = std::env::var("TERM").unwrap_or_default();
        let caps = lookup(&term)?;
        let mut width = caps.columns;
        let mut height = caps.lines;
        if let Some(n) = env_dimension("COLUMNS") {
            width = n;
        }
        if let Some(n) = env_dimension("LINES") {
            height = n;
        }
        Ok(Self {
            inner: Inner::new(
                caps,
                width,
                height,
                true,
                charset::UTF8.to_string(),
                None,
                Box::new(io::sink()),
            ),
        })
    }

    /// Build a headless screen writing to `out`: no raw mode, no
    /// threads, full grid and reconciler. This is how the drawing
    /// pipeline is exercised in tests and captured in embedders.
    pub fn with_output(
        caps: Terminfo,
        width: usize,
        height: usize,
        charset_name: &str,
        out: Box<dyn Write + Send>,
    ) -> Result<Self> {
        let encoder = match charset_name {
            charset::UTF8 | charset::ASCII => None,
            other => Some(
                lookup_encoding(other)
                    .ok_or_else(|| Error::UnsupportedCharset(other.to_string()))?
                    .encoder(),
            ),
        };
        Ok(Self {
            inner: Inner::new(
                caps,
                width,
                height,
                false,
                charset_name.to_string(),
                encoder,
                out,
            ),
        })
    }

    fn lock_state(&self) -> Option<std::sync::MutexGuard<'_, State>> {
        self.inner.state.lock().ok()
    }
}

impl Inner {
    #[allow(clippy::too_many_arguments)]
    fn new(
        caps: Terminfo,
        width: usize,
        height: usize,
        live: bool,
        charset_name: String,
        encoder: Option<Box<dyn RuneEncoder>>,
        out: Box<dyn Write + Send>,
    ) -> Arc<Self> {
        let (tx, rx) = mpsc::sync_channel(EVENT_CHANNEL_CAPACITY);
        let acs = build_acs_map(&caps.enter_acs, &caps.exit_acs, &caps.acs_chars);
        Arc::new(Self {
            caps,
            acs,
            live,
            state: Mutex::new(State {
                grid: Grid::new(width, height),
                style: Style::DEFAULT,
                cursor_x: -1,
                cursor_y: -1,
                cx: -1,
                cy: -1,
                curstyle: None,
                clear_pending: false,
                out: PadWriter::new(out, 0),
                charset: charset_name,
                encoder,
                #[cfg(unix)]
                tty: None,
                #[cfg(unix)]
                saved_termios: None,
            }),
            quit: AtomicBool::new(false),
            finalized: AtomicBool::new(false),
            width: AtomicUsize::new(width),
            height: AtomicUsize::new(height),
            tx: Mutex::new(Some(tx)),
            rx: Mutex::new(rx),
            threads: Mutex::new(Vec::new()),
            #[cfg(unix)]
            signal_handle: Mutex::new(None),
        })
    }

    fn post(&self, event: Event) {
        if let Ok(guard) = self.tx.lock() {
            if let Some(tx) = guard.as_ref() {
                // Never stall a producer: drop when the channel is full.
                let _ = tx.try_send(event);
            }
        }
    }
}

fn env_dimension(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&n| n != 0)
}

// ── Reconciler ───────────────────────────────────────────────────────────

/// Encode one rune for a non-UTF-8 terminal, appending to `buf`.
///
/// ASCII passes straight through. Runes the charset cannot represent
/// degrade to the ACS sequence when the primary slot is still empty, or
/// to `?`; combining runes that fail to encode are elided.
fn encode_rune(
    encoder: &mut Option<Box<dyn RuneEncoder>>,
    acs: &AcsMap,
    r: char,
    buf: &mut Vec<u8>,
) {
    if (r as u32) < 0x80 {
        buf.push(r as u8);
        return;
    }
    let Some(enc) = encoder.as_mut() else {
        // US-ASCII: a filler for the primary rune, combining elided.
        if buf.is_empty() {
            buf.push(b'?');
        }
        return;
    };
    enc.reset();
    let mut encoded = Vec::new();
    let ok = enc.encode(r, &mut encoded);
    if ok && !encoded.is_empty() && encoded[0] != 0x1a {
        buf.extend_from_slice(&encoded);
    } else if buf.is_empty() {
        match acs.get(&r) {
            Some(seq) => buf.extend_from_slice(seq.as_bytes()),
            None => buf.push(b'?'),
        }
    }
}

fn draw_cell(caps: &Terminfo, acs: &AcsMap, st: &mut State, x: i32, y: i32, cell: &Cell) {
    let grid_w = st.grid.width() as i32;

    if st.cy != y || st.cx != x {
        let _ = st.out.puts(&caps.goto(x as usize, y as usize));
    }

    let mut style = cell.style();
    if style == Style::DEFAULT {
        style = st.style;
    }
    if st.curstyle != Some(style) {
        let (fg, bg, attrs) = style.decompose();
        let _ = st.out.puts(&caps.attr_off);
        if attrs.contains(AttrMask::BOLD) {
            let _ = st.out.puts(&caps.bold);
        }
        if attrs.contains(AttrMask::UNDERLINE) {
            let _ = st.out.puts(&caps.underline);
        }
        if attrs.contains(AttrMask::REVERSE) {
            let _ = st.out.puts(&caps.reverse);
        }
        if attrs.contains(AttrMask::BLINK) {
            let _ = st.out.puts(&caps.blink);
        }
        if attrs.contains(AttrMask::DIM) {
            let _ = st.out.puts(&caps.dim);
        }
        if let Some(c) = fg.index() {
            let _ = st.out.puts(&caps.set_fg(c));
        }
        if let Some(c) = bg.index() {
            let _ = st.out.puts(&caps.set_bg(c));
        }
        st.curstyle = Some(style);
    }

    // Emit exactly one primary glyph plus residual combining runes,
    // without overrunning the right edge with a wide character.
    let mut width = cell.width().max(1);
    let mut bytes: Vec<u8>;
    if st.charset == charset::UTF8 {
        if cell.chars().is_empty() {
            bytes = b" ".to_vec();
            width = 1;
        } else {
            let s: String = cell.chars().iter().collect();
            bytes = s.into_bytes();
        }
    } else if cell.chars().is_empty() {
        bytes = b" ".to_vec();
        width = 1;
    } else {
        bytes = Vec::new();
        for &r in cell.chars() {
            encode_rune(&mut st.encoder, acs, r, &mut bytes);
        }
        if bytes.is_empty() {
            bytes = b" ".to_vec();
        }
        if cell.width() > 1 && bytes == b"?" {
            // No wide-character support in this charset.
            if x < grid_w - 1 {
                bytes = b"? ".to_vec();
                width = 2;
            } else {
                width = 1;
            }
        }
    }

    if width == 2 && x >= grid_w - 1 {
        // Too wide to fit; a space keeps the grid consistent.
        bytes = b" ".to_vec();
        width = 1;
    }

    let _ = st.out.write_all(&bytes);
    st.cy = y;
    st.cx = x + width as i32;
}

fn draw_locked(caps: &Terminfo, acs: &AcsMap, st: &mut State) {
    // Everything below moves the cursor; forget where it was.
    st.cx = -1;
    st.cy = -1;
    let _ = st.out.puts(&caps.hide_cursor);

    if st.clear_pending {
        let _ = st.out.puts(&caps.attr_off);
        st.curstyle = None;
        let _ = st.out.puts(&caps.clear);
        st.clear_pending = false;
        st.grid.invalidate_all();
    }

    let w = st.grid.width() as i32;
    let h = st.grid.height() as i32;
    for row in 0..h {
        let mut col = 0;
        while col < w {
            let Some(cell) = st.grid.get_cell(col, row) else {
                break;
            };
            if !cell.is_dirty() {
                col += 1;
                continue;
            }
            draw_cell(caps, acs, st, col, row, &cell);
            if let Some(c) = st.grid.cell_mut(col, row) {
                c.set_dirty(false);
            }
            if cell.width() == 2 {
                // The follower is covered by the wide glyph.
                if let Some(f) = st.grid.cell_mut(col + 1, row) {
                    f.set_dirty(false);
                }
                col += 2;
            } else {
                col += 1;
            }
        }
    }

    restore_cursor(caps, st);
    let _ = st.out.flush();
}

fn restore_cursor(caps: &Terminfo, st: &mut State) {
    let (x, y) = (st.cursor_x, st.cursor_y);
    let w = st.grid.width() as i32;
    let h = st.grid.height() as i32;
    if x < 0 || y < 0 || x >= w || y >= h {
        let _ = st.out.puts(&caps.hide_cursor);
        return;
    }
    if st.cx != x || st.cy != y {
        let _ = st.out.puts(&caps.goto(x as usize, y as usize));
    }
    let _ = st.out.puts(&caps.show_cursor);
    st.cx = x;
    st.cy = y;
}

fn resize_locked(inner: &Inner, st: &mut State) {
    #[cfg(unix)]
    {
        let Some(tty) = st.tty.as_ref() else { return };
        let Ok(ws) = rustix::termios::tcgetwinsize(tty) else {
            return;
        };
        let (w, h) = (ws.ws_col as usize, ws.ws_row as usize);
        if w == 0 || h == 0 {
            return;
        }
        if w == st.grid.width() && h == st.grid.height() {
            return;
        }
        tracing::debug!(width = w, height = h, "terminal resized");
        st.cx = -1;
        st.cy = -1;
        st.grid.resize(w, h);
        st.grid.invalidate_all();
        inner.width.store(w, Ordering::Relaxed);
        inner.height.store(h, Ordering::Relaxed);
        inner.post(Event::resize(w, h));
    }
    #[cfg(not(unix))]
    {
        let _ = (inner, st);
    }
}

// ── Input pipeline ───────────────────────────────────────────────────────

#[cfg(unix)]
fn input_loop(inner: &Arc<Inner>, mut reader: std::fs::File, mut decoder: InputDecoder) {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        if inner.quit.load(Ordering::Relaxed) {
            return;
        }
        decoder.set_size(
            inner.width.load(Ordering::Relaxed),
            inner.height.load(Ordering::Relaxed),
        );
        match reader.read(&mut chunk) {
            Ok(0) => {
                // Read timeout: whatever is buffered will not grow into
                // a longer sequence. Flush it.
                if !buf.is_empty() {
                    for event in decoder.scan(&mut buf, true) {
                        inner.post(event);
                    }
                }
            }
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                for event in decoder.scan(&mut buf, false) {
                    inner.post(event);
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                tracing::warn!(error = %e, "input read failed; stopping input task");
                // Close the channel so poll_event() observes the loss.
                if let Ok(mut tx) = inner.tx.lock() {
                    *tx = None;
                }
                return;
            }
        }
    }
}

#[cfg(unix)]
fn build_decoder(caps: &Terminfo, charset_name: &str) -> Result<InputDecoder> {
    let charset_mode = match charset_name {
        charset::UTF8 => DecoderCharset::Utf8,
        charset::ASCII => DecoderCharset::Ascii,
        other => DecoderCharset::Codec(
            lookup_encoding(other)
                .ok_or_else(|| Error::UnsupportedCharset(other.to_string()))?
                .decoder(),
        ),
    };
    let mut decoder = InputDecoder::new(charset_mode);
    for (key, escape) in &caps.keys {
        decoder.register_key(*key, escape);
    }
    decoder.set_mouse_support(caps.mouse);
    Ok(decoder)
}

#[cfg(unix)]
fn enter_raw_mode(tty: &std::fs::File) -> Result<(nix::sys::termios::Termios, u32)> {
    use nix::sys::termios::{self, SetArg, SpecialCharacterIndices};

    let saved = termios::tcgetattr(tty).map_err(io::Error::other)?;
    let mut raw = saved.clone();
    termios::cfmakeraw(&mut raw);
    // VMIN=0 / VTIME=1: reads block for at most 100ms so partial escape
    // sequences expire and the quit flag is observed promptly.
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 1;
    termios::tcsetattr(tty, SetArg::TCSAFLUSH, &raw).map_err(io::Error::other)?;
    let baud = baud_to_u32(termios::cfgetospeed(&saved));
    Ok((saved, baud))
}

#[cfg(unix)]
fn baud_to_u32(rate: nix::sys::termios::BaudRate) -> u32 {
    use nix::sys::termios::BaudRate as B;
    match rate {
        B::B0 => 0,
        B::B50 => 50,
        B::B75 => 75,
        B::B110 => 110,
        B::B134 => 134,
        B::B150 => 150,
        B::B200 => 200,
        B::B300 => 300,
        B::B600 => 600,
        B::B1200 => 1200,
        B::B1800 => 1800,
        B::B2400 => 2400,
        B::B4800 => 4800,
        B::B9600 => 9600,
        B::B19200 => 19_200,
        B::B38400 => 38_400,
        B::B57600 => 57_600,
        B::B115200 => 115_200,
        B::B230400 => 230_400,
        _ => 38_400,
    }
}

// ── Screen contract ──────────────────────────────────────────────────────

impl Screen for TermScreen {
    #[cfg(unix)]
    fn init(&self) -> Result<()> {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return Ok(());
        }
        if !self.inner.live {
            return Ok(());
        }

        let charset_name = charset::charset_from_env();
        let encoder = match charset_name.as_str() {
            charset::UTF8 | charset::ASCII => None,
            other => Some(
                lookup_encoding(other)
                    .ok_or_else(|| Error::UnsupportedCharset(other.to_string()))?
                    .encoder(),
            ),
        };
        let decoder = build_decoder(&self.inner.caps, &charset_name)?;

        let tty_out = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open("/dev/tty")?;
        let tty_in = tty_out.try_clone()?;
        let tty_ctl = tty_out.try_clone()?;

        let (saved, baud) = enter_raw_mode(&tty_ctl)?;

        {
            let mut st = self
                .inner
                .state
                .lock()
                .map_err(|_| Error::BackendUnavailable("screen state poisoned".into()))?;
            st.charset = charset_name;
            st.encoder = encoder;
            st.out = PadWriter::new(Box::new(tty_out), baud);
            st.saved_termios = Some(saved);
            if let Ok(ws) = rustix::termios::tcgetwinsize(&tty_ctl) {
                if ws.ws_col > 0 && ws.ws_row > 0 {
                    st.grid.resize(ws.ws_col as usize, ws.ws_row as usize);
                }
            }
            st.tty = Some(tty_ctl);
            self.inner.width.store(st.grid.width(), Ordering::Relaxed);
            self.inner.height.store(st.grid.height(), Ordering::Relaxed);

            let caps = &self.inner.caps;
            let _ = st.out.puts(&caps.enter_ca);
            let _ = st.out.puts(&caps.enter_keypad);
            let _ = st.out.puts(&caps.hide_cursor);
            let _ = st.out.puts(&caps.clear);
            let _ = st.out.flush();
            st.cx = -1;
            st.cy = -1;
            st.curstyle = None;
        }

        let inner = Arc::clone(&self.inner);
        let input = std::thread::Builder::new()
            .name("ctui-input".into())
            .spawn(move || input_loop(&inner, tty_in, decoder))?;

        let mut signals =
            signal_hook::iterator::Signals::new([signal_hook::consts::signal::SIGWINCH])
                .map_err(io::Error::other)?;
        if let Ok(mut slot) = self.inner.signal_handle.lock() {
            *slot = Some(signals.handle());
        }
        let inner = Arc::clone(&self.inner);
        let resize = std::thread::Builder::new()
            .name("ctui-resize".into())
            .spawn(move || {
                for _ in signals.forever() {
                    if inner.quit.load(Ordering::Relaxed) {
                        return;
                    }
                    if let Ok(mut st) = inner.state.lock() {
                        resize_locked(&inner, &mut st);
                    }
                }
            })?;

        if let Ok(mut threads) = self.inner.threads.lock() {
            threads.push(input);
            threads.push(resize);
        }
        tracing::info!(term = %self.inner.caps.name, "screen initialized");
        Ok(())
    }

    #[cfg(not(unix))]
    fn init(&self) -> Result<()> {
        if self.inner.live {
            return Err(Error::BackendUnavailable(
                "terminfo backend requires a POSIX terminal".into(),
            ));
        }
        Ok(())
    }

    fn fini(&self) {
        if self.inner.finalized.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.quit.store(true, Ordering::Relaxed);

        if let Ok(mut st) = self.inner.state.lock() {
            let caps = &self.inner.caps;
            let _ = st.out.puts(&caps.show_cursor);
            let _ = st.out.puts(&caps.attr_off);
            let _ = st.out.puts(&caps.clear);
            let _ = st.out.puts(&caps.exit_ca);
            let _ = st.out.puts(&caps.exit_keypad);
            if caps.mouse {
                let _ = st.out.puts(&caps.mouse_mode(false));
            }
            let _ = st.out.flush();
            st.curstyle = None;
            st.clear_pending = false;

            #[cfg(unix)]
            {
                if let (Some(saved), Some(tty)) = (st.saved_termios.take(), st.tty.as_ref()) {
                    let _ = nix::sys::termios::tcsetattr(
                        tty,
                        nix::sys::termios::SetArg::TCSAFLUSH,
                        &saved,
                    );
                }
                st.tty = None;
            }
        }

        #[cfg(unix)]
        if let Ok(mut slot) = self.inner.signal_handle.lock() {
            if let Some(handle) = slot.take() {
                handle.close();
            }
        }

        let handles = self
            .inner
            .threads
            .lock()
            .map(|mut t| std::mem::take(&mut *t))
            .unwrap_or_default();
        for handle in handles {
            let _ = handle.join();
        }

        if let Ok(mut tx) = self.inner.tx.lock() {
            *tx = None;
        }
        tracing::info!("screen finalized");
    }

    fn size(&self) -> (usize, usize) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return (0, 0);
        }
        match self.lock_state() {
            Some(st) => (st.grid.width(), st.grid.height()),
            None => (0, 0),
        }
    }

    fn set_style(&self, style: Style) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            st.style = style;
        }
    }

    fn set_cell(&self, x: i32, y: i32, style: Style, chars: &[char]) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            st.grid.set_cell(x, y, style, chars);
        }
    }

    fn put_cell(&self, x: i32, y: i32, cell: &Cell) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            st.grid.put_cell(x, y, cell);
        }
    }

    fn get_cell(&self, x: i32, y: i32) -> Option<Cell> {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return None;
        }
        self.lock_state()?.grid.get_cell(x, y)
    }

    fn show_cursor(&self, x: i32, y: i32) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            st.cursor_x = x;
            st.cursor_y = y;
        }
    }

    fn hide_cursor(&self) {
        self.show_cursor(-1, -1);
    }

    fn clear(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            let style = st.style;
            st.grid.clear(style);
            st.clear_pending = true;
        }
    }

    fn show(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            resize_locked(&self.inner, &mut st);
            draw_locked(&self.inner.caps, &self.inner.acs, &mut st);
        }
    }

    fn sync(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            resize_locked(&self.inner, &mut st);
            st.clear_pending = true;
            st.grid.invalidate_all();
            draw_locked(&self.inner.caps, &self.inner.acs, &mut st);
        }
    }

    fn colors(&self) -> i32 {
        self.inner.caps.colors
    }

    fn character_set(&self) -> String {
        match self.lock_state() {
            Some(st) => st.charset.clone(),
            None => charset::UTF8.to_string(),
        }
    }

    fn enable_mouse(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) || !self.inner.caps.mouse {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            let seq = self.inner.caps.mouse_mode(true);
            let _ = st.out.puts(&seq);
            let _ = st.out.flush();
        }
    }

    fn disable_mouse(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) || !self.inner.caps.mouse {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            let seq = self.inner.caps.mouse_mode(false);
            let _ = st.out.puts(&seq);
            let _ = st.out.flush();
        }
    }

    fn poll_event(&self) -> Option<Event> {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return None;
        }
        let rx = self.inner.rx.lock().ok()?;
        rx.recv().ok()
    }

    fn post_event(&self, event: Event) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        self.inner.post(event);
    }
}

impl Drop for TermScreen {
    fn drop(&mut self) {
        // Restore the terminal even when the caller forgot fini().
        if self.inner.live {
            self.fini();
        }
    }
}
