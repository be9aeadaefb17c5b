//! Win32 console bindings.
//!
//! The only module in the workspace with unsafe code: thin wrappers over
//! the console API, each checking the BOOL result and surfacing
//! `io::Error::last_os_error()`. Everything above this seam is safe.

#![cfg(windows)]

use std::io;

use windows_sys::Win32::Foundation::{
    CloseHandle, GENERIC_READ, GENERIC_WRITE, HANDLE, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows_sys::Win32::System::Console::{
    FillConsoleOutputAttribute, FillConsoleOutputCharacterW, GetConsoleCursorInfo, GetConsoleMode,
    GetConsoleScreenBufferInfo, ReadConsoleInputW, SetConsoleCursorInfo, SetConsoleCursorPosition,
    SetConsoleMode, SetConsoleScreenBufferSize, SetConsoleTextAttribute, SetConsoleWindowInfo,
    WriteConsoleInputW, WriteConsoleW, CONSOLE_CURSOR_INFO, CONSOLE_SCREEN_BUFFER_INFO, COORD,
    FOCUS_EVENT, INPUT_RECORD, SMALL_RECT,
};

use crate::record::RawInputRecord;
use crate::screen::{Console, CursorInfo, ScreenInfo};
use ctui_core::{Error, Result};

/// Live console handles (`CONIN$` / `CONOUT$`).
pub struct WinConsole {
    input: HANDLE,
    output: HANDLE,
}

// HANDLEs are kernel object references; the console API serializes
// access internally.
unsafe impl Send for WinConsole {}
unsafe impl Sync for WinConsole {}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn open_console(name: &str) -> io::Result<HANDLE> {
    let path = wide(name);
    let handle = unsafe {
        CreateFileW(
            path.as_ptr(),
            GENERIC_READ | GENERIC_WRITE,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            std::ptr::null(),
            OPEN_EXISTING,
            0,
            std::ptr::null_mut(),
        )
    };
    if handle == INVALID_HANDLE_VALUE {
        Err(io::Error::last_os_error())
    } else {
        Ok(handle)
    }
}

fn check(ok: i32) -> io::Result<()> {
    if ok == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

const ORIGIN: COORD = COORD { X: 0, Y: 0 };

impl WinConsole {
    /// Open the console's input and output handles.
    pub fn open() -> Result<Self> {
        let input = open_console("CONIN$")
            .map_err(|e| Error::BackendUnavailable(format!("CONIN$: {e}")))?;
        let output = match open_console("CONOUT$") {
            Ok(handle) => handle,
            Err(e) => {
                unsafe { CloseHandle(input) };
                return Err(Error::BackendUnavailable(format!("CONOUT$: {e}")));
            }
        };
        Ok(Self { input, output })
    }
}

impl Drop for WinConsole {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.input);
            CloseHandle(self.output);
        }
    }
}

impl Console for WinConsole {
    fn screen_info(&self) -> io::Result<ScreenInfo> {
        let mut info: CONSOLE_SCREEN_BUFFER_INFO = unsafe { std::mem::zeroed() };
        check(unsafe { GetConsoleScreenBufferInfo(self.output, &mut info) })?;
        Ok(ScreenInfo {
            buffer_width: info.dwSize.X,
            buffer_height: info.dwSize.Y,
            window: (
                info.srWindow.Left,
                info.srWindow.Top,
                info.srWindow.Right,
                info.srWindow.Bottom,
            ),
        })
    }

    fn cursor_info(&self) -> io::Result<CursorInfo> {
        let mut info: CONSOLE_CURSOR_INFO = unsafe { std::mem::zeroed() };
        check(unsafe { GetConsoleCursorInfo(self.output, &mut info) })?;
        Ok(CursorInfo {
            size: info.dwSize,
            visible: info.bVisible != 0,
        })
    }

    fn set_cursor_info(&self, cursor: CursorInfo) -> io::Result<()> {
        let info = CONSOLE_CURSOR_INFO {
            dwSize: cursor.size,
            bVisible: i32::from(cursor.visible),
        };
        check(unsafe { SetConsoleCursorInfo(self.output, &info) })
    }

    fn set_cursor_position(&self, x: i16, y: i16) -> io::Result<()> {
        check(unsafe { SetConsoleCursorPosition(self.output, COORD { X: x, Y: y }) })
    }

    fn set_text_attribute(&self, attr: u16) -> io::Result<()> {
        check(unsafe { SetConsoleTextAttribute(self.output, attr) })
    }

    fn fill_attribute(&self, attr: u16, count: u32) -> io::Result<()> {
        let mut written = 0u32;
        check(unsafe {
            FillConsoleOutputAttribute(self.output, attr, count, ORIGIN, &mut written)
        })
    }

    fn fill_character(&self, ch: u16, count: u32) -> io::Result<()> {
        let mut written = 0u32;
        check(unsafe {
            FillConsoleOutputCharacterW(self.output, ch, count, ORIGIN, &mut written)
        })
    }

    fn set_window_size(&self, width: i16, height: i16) -> io::Result<()> {
        let rect = SMALL_RECT {
            Left: 0,
            Top: 0,
            Right: width - 1,
            Bottom: height - 1,
        };
        check(unsafe { SetConsoleWindowInfo(self.output, 1, &rect) })
    }

    fn set_buffer_size(&self, width: i16, height: i16) -> io::Result<()> {
        check(unsafe {
            SetConsoleScreenBufferSize(self.output, COORD { X: width, Y: height })
        })
    }

    fn write_chars(&self, text: &[u16]) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let mut written = 0u32;
        check(unsafe {
            WriteConsoleW(
                self.output,
                text.as_ptr().cast(),
                text.len() as u32,
                &mut written,
                std::ptr::null(),
            )
        })
    }

    fn input_mode(&self) -> io::Result<u32> {
        let mut mode = 0u32;
        check(unsafe { GetConsoleMode(self.input, &mut mode) })?;
        Ok(mode)
    }

    fn set_input_mode(&self, mode: u32) -> io::Result<()> {
        check(unsafe { SetConsoleMode(self.input, mode) })
    }

    fn output_mode(&self) -> io::Result<u32> {
        let mut mode = 0u32;
        check(unsafe { GetConsoleMode(self.output, &mut mode) })?;
        Ok(mode)
    }

    fn set_output_mode(&self, mode: u32) -> io::Result<()> {
        check(unsafe { SetConsoleMode(self.output, mode) })
    }

    fn read_input(&self) -> io::Result<RawInputRecord> {
        let mut record: INPUT_RECORD = unsafe { std::mem::zeroed() };
        let mut read = 0u32;
        check(unsafe { ReadConsoleInputW(self.input, &mut record, 1, &mut read) })?;
        if read != 1 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no record"));
        }
        // The event payload is a 16-byte union; its little-endian bytes
        // are what the decoder consumes.
        let data: [u8; 16] = unsafe { std::mem::transmute_copy(&record.Event) };
        Ok(RawInputRecord {
            kind: record.EventType,
            data,
        })
    }

    fn wake_input(&self) -> io::Result<()> {
        // A focus record is ignored by the decoder but unblocks the
        // reader.
        let mut record: INPUT_RECORD = unsafe { std::mem::zeroed() };
        record.EventType = FOCUS_EVENT as u16;
        let mut written = 0u32;
        check(unsafe { WriteConsoleInputW(self.input, &record, 1, &mut written) })
    }
}
