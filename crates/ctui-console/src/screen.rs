#![forbid(unsafe_code)]

//! Console screen.
//!
//! [`ConsoleScreen`] drives the Windows console through the [`Console`]
//! seam: cursor info and position, text attributes, fill operations,
//! buffer/window sizing, mode switching, and the blocking input-record
//! reader. The draw pass batches runs of same-styled dirty cells into
//! single `WriteConsole` calls.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use ctui_core::{Error, Event, Result, Screen};
use ctui_render::{Cell, Grid, Style};

use crate::attr::map_style;
use crate::record::{decode_record, Decoded, RawInputRecord};

/// Bounded event-channel capacity.
const EVENT_CHANNEL_CAPACITY: usize = 2;

/// Input mode: report window-size changes.
pub const MODE_RESIZE: u32 = 0x0008;
/// Input mode: report mouse activity.
pub const MODE_MOUSE: u32 = 0x0010;

/// Console screen-buffer geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenInfo {
    /// Buffer size in character cells.
    pub buffer_width: i16,
    /// Buffer height in character cells.
    pub buffer_height: i16,
    /// Visible window rectangle (left, top, right, bottom), inclusive.
    pub window: (i16, i16, i16, i16),
}

impl ScreenInfo {
    /// Visible window dimensions.
    #[must_use]
    pub fn window_size(&self) -> (usize, usize) {
        let (left, top, right, bottom) = self.window;
        (
            (right - left + 1).max(0) as usize,
            (bottom - top + 1).max(0) as usize,
        )
    }
}

/// Cursor shape and visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorInfo {
    /// Fill percentage of the cell (1-100).
    pub size: u32,
    /// Whether the cursor is drawn.
    pub visible: bool,
}

/// The native console API seam. `WinConsole` implements it with Win32
/// calls; tests drive the screen with a scripted double.
pub trait Console: Send + Sync {
    /// Query buffer and window geometry.
    fn screen_info(&self) -> io::Result<ScreenInfo>;
    /// Query cursor shape/visibility.
    fn cursor_info(&self) -> io::Result<CursorInfo>;
    /// Set cursor shape/visibility.
    fn set_cursor_info(&self, info: CursorInfo) -> io::Result<()>;
    /// Move the cursor.
    fn set_cursor_position(&self, x: i16, y: i16) -> io::Result<()>;
    /// Set the attribute applied to subsequently written text.
    fn set_text_attribute(&self, attr: u16) -> io::Result<()>;
    /// Fill `count` cells with an attribute, starting at the origin.
    fn fill_attribute(&self, attr: u16, count: u32) -> io::Result<()>;
    /// Fill `count` cells with a character, starting at the origin.
    fn fill_character(&self, ch: u16, count: u32) -> io::Result<()>;
    /// Resize the visible window.
    fn set_window_size(&self, width: i16, height: i16) -> io::Result<()>;
    /// Resize the screen buffer.
    fn set_buffer_size(&self, width: i16, height: i16) -> io::Result<()>;
    /// Write UTF-16 text at the current cursor position.
    fn write_chars(&self, text: &[u16]) -> io::Result<()>;
    /// Input console mode.
    fn input_mode(&self) -> io::Result<u32>;
    /// Set the input console mode.
    fn set_input_mode(&self, mode: u32) -> io::Result<()>;
    /// Output console mode.
    fn output_mode(&self) -> io::Result<u32>;
    /// Set the output console mode.
    fn set_output_mode(&self, mode: u32) -> io::Result<()>;
    /// Block until one input record arrives.
    fn read_input(&self) -> io::Result<RawInputRecord>;
    /// Unblock a pending [`Console::read_input`].
    fn wake_input(&self) -> io::Result<()>;
}

struct SavedConsole {
    cursor: CursorInfo,
    input_mode: u32,
    output_mode: u32,
    buffer: (i16, i16),
}

struct CState {
    grid: Grid,
    style: Style,
    cursor_x: i32,
    cursor_y: i32,
    clear_pending: bool,
    saved: Option<SavedConsole>,
}

struct CInner {
    con: Arc<dyn Console>,
    state: Mutex<CState>,
    quit: AtomicBool,
    finalized: AtomicBool,
    tx: Mutex<Option<SyncSender<Event>>>,
    rx: Mutex<Receiver<Event>>,
    threads: Mutex<Vec<JoinHandle<()>>>,
}

/// A screen backed by the platform console.
pub struct ConsoleScreen {
    inner: Arc<CInner>,
}

impl ConsoleScreen {
    /// Open the live console.
    #[cfg(windows)]
    pub fn new() -> Result<Self> {
        let con = crate::sys::WinConsole::open()?;
        Self::with_console(Arc::new(con))
    }

    /// Open the live console (unsupported off Windows).
    #[cfg(not(windows))]
    pub fn new() -> Result<Self> {
        Err(Error::BackendUnavailable(
            "console backend requires Windows".into(),
        ))
    }

    /// Build a screen over any [`Console`] implementation.
    pub fn with_console(con: Arc<dyn Console>) -> Result<Self> {
        let info = con.screen_info().map_err(Error::Io)?;
        let (width, height) = info.window_size();
        let (tx, rx) = mpsc::sync_channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            inner: Arc::new(CInner {
                con,
                state: Mutex::new(CState {
                    grid: Grid::new(width, height),
                    style: Style::DEFAULT,
                    cursor_x: -1,
                    cursor_y: -1,
                    clear_pending: false,
                    saved: None,
                }),
                quit: AtomicBool::new(false),
                finalized: AtomicBool::new(false),
                tx: Mutex::new(Some(tx)),
                rx: Mutex::new(rx),
                threads: Mutex::new(Vec::new()),
            }),
        })
    }

    fn lock_state(&self) -> Option<std::sync::MutexGuard<'_, CState>> {
        self.inner.state.lock().ok()
    }
}

impl CInner {
    fn post(&self, event: Event) {
        if let Ok(guard) = self.tx.lock() {
            if let Some(tx) = guard.as_ref() {
                let _ = tx.try_send(event);
            }
        }
    }

    fn hide_cursor(&self) {
        let _ = self.con.set_cursor_info(CursorInfo {
            size: 1,
            visible: false,
        });
    }

    fn show_hw_cursor(&self) {
        let _ = self.con.set_cursor_info(CursorInfo {
            size: 100,
            visible: true,
        });
    }

    fn clear_screen(&self, style: Style, width: usize, height: usize) {
        let count = (width * height) as u32;
        let attr = map_style(style);
        let _ = self.con.fill_attribute(attr, count);
        let _ = self.con.fill_character(u16::from(b' '), count);
    }

    fn do_cursor(&self, st: &CState) {
        let (x, y) = (st.cursor_x, st.cursor_y);
        let w = st.grid.width() as i32;
        let h = st.grid.height() as i32;
        if x < 0 || y < 0 || x >= w || y >= h {
            let _ = self.con.set_cursor_position(0, 0);
            self.hide_cursor();
        } else {
            let _ = self.con.set_cursor_position(x as i16, y as i16);
            self.show_hw_cursor();
        }
    }

    fn flush_run(&self, run: &mut Vec<u16>, style: Option<Style>, x: i32, y: i32) {
        if run.is_empty() {
            return;
        }
        let attr = map_style(style.unwrap_or(Style::DEFAULT));
        let _ = self.con.set_text_attribute(attr);
        let _ = self.con.set_cursor_position(x as i16, y as i16);
        let _ = self.con.write_chars(run);
        run.clear();
    }

    fn draw_locked(&self, st: &mut CState) {
        if st.clear_pending {
            self.clear_screen(st.style, st.grid.width(), st.grid.height());
            st.clear_pending = false;
        }

        let w = st.grid.width() as i32;
        let h = st.grid.height() as i32;
        let mut run: Vec<u16> = Vec::new();
        let mut run_style: Option<Style> = None;
        let mut run_x = 0;
        let mut run_y = 0;

        for row in 0..h {
            let mut col = 0;
            while col < w {
                let Some(cell) = st.grid.get_cell(col, row) else {
                    break;
                };
                let width = cell.width().max(1) as i32;

                if !cell.is_dirty() || run_style != Some(cell.style()) {
                    self.flush_run(&mut run, run_style, run_x, run_y);
                    run_style = None;
                    if !cell.is_dirty() {
                        col += width;
                        continue;
                    }
                }
                if run.is_empty() {
                    run_style = Some(cell.style());
                    run_x = col;
                    run_y = row;
                }
                if cell.chars().is_empty() {
                    run.push(u16::from(b' '));
                } else {
                    for &ch in cell.chars() {
                        let mut units = [0u16; 2];
                        run.extend_from_slice(ch.encode_utf16(&mut units));
                    }
                }
                if let Some(c) = st.grid.cell_mut(col, row) {
                    c.set_dirty(false);
                }
                if width == 2 {
                    if let Some(f) = st.grid.cell_mut(col + 1, row) {
                        f.set_dirty(false);
                    }
                }
                col += width;
            }
            self.flush_run(&mut run, run_style, run_x, run_y);
            run_style = None;
        }
    }

    fn resize_locked(&self, st: &mut CState) {
        let Ok(info) = self.con.screen_info() else {
            return;
        };
        let (w, h) = info.window_size();
        if w == 0 || h == 0 {
            return;
        }
        if w == st.grid.width() && h == st.grid.height() {
            return;
        }
        tracing::debug!(width = w, height = h, "console resized");
        st.grid.resize(w, h);
        let _ = self.con.set_window_size(w as i16, h as i16);
        let _ = self.con.set_buffer_size(w as i16, h as i16);
        self.post(Event::resize(w, h));
    }
}

fn input_loop(inner: &Arc<CInner>) {
    loop {
        if inner.quit.load(Ordering::Relaxed) {
            return;
        }
        let record = match inner.con.read_input() {
            Ok(record) => record,
            Err(e) => {
                if inner.quit.load(Ordering::Relaxed) {
                    return;
                }
                tracing::warn!(error = %e, "console read failed; stopping input task");
                // Close the channel so poll_event() observes the loss.
                if let Ok(mut tx) = inner.tx.lock() {
                    *tx = None;
                }
                return;
            }
        };
        match decode_record(&record) {
            Some(Decoded::Keys(events)) => {
                for event in events {
                    inner.post(event);
                }
            }
            Some(Decoded::Mouse(event)) => inner.post(event),
            Some(Decoded::Resize { width, height }) => {
                if let Ok(mut st) = inner.state.lock() {
                    if width > 0 && height > 0 {
                        st.grid.resize(width, height);
                    }
                }
                inner.post(Event::resize(width, height));
            }
            None => {}
        }
    }
}

impl Screen for ConsoleScreen {
    fn init(&self) -> Result<()> {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return Ok(());
        }
        let con = &self.inner.con;
        {
            let mut st = self
                .inner
                .state
                .lock()
                .map_err(|_| Error::BackendUnavailable("screen state poisoned".into()))?;
            let cursor = con.cursor_info().map_err(Error::Io)?;
            let info = con.screen_info().map_err(Error::Io)?;
            let input_mode = con.input_mode().map_err(Error::Io)?;
            let output_mode = con.output_mode().map_err(Error::Io)?;
            st.saved = Some(SavedConsole {
                cursor,
                input_mode,
                output_mode,
                buffer: (info.buffer_width, info.buffer_height),
            });
            self.inner.resize_locked(&mut st);
            con.set_input_mode(MODE_RESIZE).map_err(Error::Io)?;
            con.set_output_mode(0).map_err(Error::Io)?;
            let style = st.style;
            self.inner
                .clear_screen(style, st.grid.width(), st.grid.height());
            self.inner.hide_cursor();
        }

        let inner = Arc::clone(&self.inner);
        let handle = std::thread::Builder::new()
            .name("ctui-console-input".into())
            .spawn(move || input_loop(&inner))?;
        if let Ok(mut threads) = self.inner.threads.lock() {
            threads.push(handle);
        }
        tracing::info!("console screen initialized");
        Ok(())
    }

    fn fini(&self) {
        if self.inner.finalized.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.quit.store(true, Ordering::Relaxed);

        if let Ok(mut st) = self.inner.state.lock() {
            st.style = Style::DEFAULT;
            st.cursor_x = -1;
            st.cursor_y = -1;
            let con = &self.inner.con;
            if let Some(saved) = st.saved.take() {
                let _ = con.set_cursor_info(saved.cursor);
                let _ = con.set_input_mode(saved.input_mode);
                let _ = con.set_output_mode(saved.output_mode);
                let _ = con.set_buffer_size(saved.buffer.0, saved.buffer.1);
            }
            self.inner
                .clear_screen(Style::DEFAULT, st.grid.width(), st.grid.height());
            let _ = con.set_cursor_position(0, 0);
            let _ = con.set_text_attribute(map_style(Style::DEFAULT));
        }

        let _ = self.inner.con.wake_input();
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
        tracing::info!("console screen finalized");
    }

    fn size(&self) -> (usize, usize) {
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
            self.inner.hide_cursor();
            self.inner.resize_locked(&mut st);
            self.inner.draw_locked(&mut st);
            self.inner.do_cursor(&st);
        }
    }

    fn sync(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        if let Some(mut st) = self.lock_state() {
            st.grid.invalidate_all();
            self.inner.hide_cursor();
            self.inner.resize_locked(&mut st);
            self.inner.draw_locked(&mut st);
            self.inner.do_cursor(&st);
        }
    }

    fn colors(&self) -> i32 {
        // Eight base colors in normal or high intensity.
        16
    }

    fn character_set(&self) -> String {
        "UTF-16LE".to_string()
    }

    fn enable_mouse(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.inner.con.set_input_mode(MODE_RESIZE | MODE_MOUSE);
    }

    fn disable_mouse(&self) {
        if self.inner.finalized.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.inner.con.set_input_mode(MODE_RESIZE);
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

#[cfg(test)]
mod tests {
    use super::{Console, ConsoleScreen, CursorInfo, ScreenInfo, MODE_MOUSE, MODE_RESIZE};
    use crate::attr::map_style;
    use crate::record::RawInputRecord;
    use ctui_core::Screen;
    use ctui_render::{AttrMask, Color, Style};
    use std::io;
    use std::sync::{Arc, Mutex};

    /// What the screen asked the console to do.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        CursorInfo(CursorInfo),
        CursorPos(i16, i16),
        TextAttr(u16),
        FillAttr(u16, u32),
        FillChar(u16, u32),
        WindowSize(i16, i16),
        BufferSize(i16, i16),
        Write(Vec<u16>),
        InputMode(u32),
        OutputMode(u32),
    }

    #[derive(Default)]
    struct MockConsole {
        ops: Mutex<Vec<Op>>,
        size: (i16, i16),
    }

    impl MockConsole {
        fn new(width: i16, height: i16) -> Self {
            Self {
                ops: Mutex::new(Vec::new()),
                size: (width, height),
            }
        }

        fn take_ops(&self) -> Vec<Op> {
            std::mem::take(&mut *self.ops.lock().unwrap())
        }

        fn push(&self, op: Op) {
            self.ops.lock().unwrap().push(op);
        }
    }

    impl Console for MockConsole {
        fn screen_info(&self) -> io::Result<ScreenInfo> {
            Ok(ScreenInfo {
                buffer_width: self.size.0,
                buffer_height: self.size.1,
                window: (0, 0, self.size.0 - 1, self.size.1 - 1),
            })
        }

        fn cursor_info(&self) -> io::Result<CursorInfo> {
            Ok(CursorInfo {
                size: 25,
                visible: true,
            })
        }

        fn set_cursor_info(&self, info: CursorInfo) -> io::Result<()> {
            self.push(Op::CursorInfo(info));
            Ok(())
        }

        fn set_cursor_position(&self, x: i16, y: i16) -> io::Result<()> {
            self.push(Op::CursorPos(x, y));
            Ok(())
        }

        fn set_text_attribute(&self, attr: u16) -> io::Result<()> {
            self.push(Op::TextAttr(attr));
            Ok(())
        }

        fn fill_attribute(&self, attr: u16, count: u32) -> io::Result<()> {
            self.push(Op::FillAttr(attr, count));
            Ok(())
        }

        fn fill_character(&self, ch: u16, count: u32) -> io::Result<()> {
            self.push(Op::FillChar(ch, count));
            Ok(())
        }

        fn set_window_size(&self, width: i16, height: i16) -> io::Result<()> {
            self.push(Op::WindowSize(width, height));
            Ok(())
        }

        fn set_buffer_size(&self, width: i16, height: i16) -> io::Result<()> {
            self.push(Op::BufferSize(width, height));
            Ok(())
        }

        fn write_chars(&self, text: &[u16]) -> io::Result<()> {
            self.push(Op::Write(text.to_vec()));
            Ok(())
        }

        fn input_mode(&self) -> io::Result<u32> {
            Ok(0x1f7)
        }

        fn set_input_mode(&self, mode: u32) -> io::Result<()> {
            self.push(Op::InputMode(mode));
            Ok(())
        }

        fn output_mode(&self) -> io::Result<u32> {
            Ok(0x3)
        }

        fn set_output_mode(&self, mode: u32) -> io::Result<()> {
            self.push(Op::OutputMode(mode));
            Ok(())
        }

        fn read_input(&self) -> io::Result<RawInputRecord> {
            // Never delivers; tests do not start the input task.
            Err(io::Error::new(io::ErrorKind::WouldBlock, "no input"))
        }

        fn wake_input(&self) -> io::Result<()> {
            Ok(())
        }
    }

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn screen(width: i16, height: i16) -> (ConsoleScreen, Arc<MockConsole>) {
        let con = Arc::new(MockConsole::new(width, height));
        let s = ConsoleScreen::with_console(con.clone()).unwrap();
        (s, con)
    }

    fn red() -> Style {
        Style::new(Color::Red, Color::Default, AttrMask::empty())
    }

    fn blue() -> Style {
        Style::new(Color::Blue, Color::Default, AttrMask::empty())
    }

    #[test]
    fn with_console_sizes_from_window() {
        let (s, _con) = screen(40, 10);
        assert_eq!(s.size(), (40, 10));
    }

    #[test]
    fn draw_batches_same_style_runs() {
        let (s, con) = screen(4, 1);
        s.set_cell(0, 0, red(), &['A']);
        s.set_cell(1, 0, red(), &['B']);
        s.set_cell(2, 0, blue(), &['C']);
        s.set_cell(3, 0, blue(), &['D']);
        con.take_ops();
        s.show();
        let ops = con.take_ops();

        let writes: Vec<&Op> = ops
            .iter()
            .filter(|op| matches!(op, Op::Write(_)))
            .collect();
        assert_eq!(
            writes,
            vec![&Op::Write(utf16("AB")), &Op::Write(utf16("CD"))],
            "adjacent same-style cells batch into one write"
        );
        assert!(ops.contains(&Op::TextAttr(map_style(red()))));
        assert!(ops.contains(&Op::TextAttr(map_style(blue()))));
        // Each run positions once, at its start.
        assert!(ops.contains(&Op::CursorPos(0, 0)));
        assert!(ops.contains(&Op::CursorPos(2, 0)));
    }

    #[test]
    fn second_show_writes_nothing() {
        let (s, con) = screen(4, 1);
        s.set_cell(0, 0, red(), &['A']);
        s.show();
        con.take_ops();
        s.show();
        let ops = con.take_ops();
        assert!(
            !ops.iter().any(|op| matches!(op, Op::Write(_))),
            "clean grid writes no text: {ops:?}"
        );
    }

    #[test]
    fn clear_fills_attribute_and_character() {
        let (s, con) = screen(4, 2);
        s.set_style(red());
        s.clear();
        con.take_ops();
        s.show();
        let ops = con.take_ops();
        assert!(ops.contains(&Op::FillAttr(map_style(red()), 8)));
        assert!(ops.contains(&Op::FillChar(u16::from(b' '), 8)));
    }

    #[test]
    fn cursor_positions_or_hides() {
        let (s, con) = screen(4, 2);
        s.show_cursor(2, 1);
        s.show();
        let ops = con.take_ops();
        assert!(ops.contains(&Op::CursorPos(2, 1)));
        assert!(ops.contains(&Op::CursorInfo(CursorInfo {
            size: 100,
            visible: true
        })));

        s.hide_cursor();
        s.show();
        let ops = con.take_ops();
        assert!(ops.contains(&Op::CursorPos(0, 0)));
        assert!(ops.contains(&Op::CursorInfo(CursorInfo {
            size: 1,
            visible: false
        })));
    }

    #[test]
    fn mouse_toggles_input_mode() {
        let (s, con) = screen(4, 2);
        s.enable_mouse();
        assert_eq!(con.take_ops(), vec![Op::InputMode(MODE_RESIZE | MODE_MOUSE)]);
        s.disable_mouse();
        assert_eq!(con.take_ops(), vec![Op::InputMode(MODE_RESIZE)]);
    }

    #[test]
    fn init_saves_and_fini_restores_modes() {
        let (s, con) = screen(4, 2);
        s.init().unwrap();
        let ops = con.take_ops();
        assert!(ops.contains(&Op::InputMode(MODE_RESIZE)));
        assert!(ops.contains(&Op::OutputMode(0)));

        s.fini();
        let ops = con.take_ops();
        assert!(ops.contains(&Op::InputMode(0x1f7)), "input mode restored");
        assert!(ops.contains(&Op::OutputMode(0x3)), "output mode restored");
        assert!(ops.contains(&Op::CursorInfo(CursorInfo {
            size: 25,
            visible: true
        })));
        assert!(s.poll_event().is_none());
    }

    #[test]
    fn wide_cells_advance_two_columns() {
        let (s, con) = screen(4, 1);
        s.set_cell(0, 0, Style::DEFAULT, &['日']);
        s.set_cell(2, 0, Style::DEFAULT, &['x']);
        con.take_ops();
        s.show();
        let ops = con.take_ops();
        let writes: Vec<&Op> = ops
            .iter()
            .filter(|op| matches!(op, Op::Write(_)))
            .collect();
        // The wide glyph, the following cell, and the untouched trailing
        // cell are all default-styled, so they share one run.
        assert_eq!(
            writes,
            vec![&Op::Write(utf16("日x "))],
            "wide glyph and following cells share one run"
        );
    }

    #[test]
    fn post_fini_operations_are_no_ops() {
        let (s, con) = screen(4, 1);
        s.fini();
        con.take_ops();
        s.set_cell(0, 0, red(), &['A']);
        s.show();
        s.clear();
        assert!(con.take_ops().is_empty());
        assert!(s.get_cell(0, 0).is_none());
    }
}
