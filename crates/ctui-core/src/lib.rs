#![forbid(unsafe_code)]

//! Core: events, the input decoder, the charset seam, and the backend
//! contract.

pub mod charset;
pub mod error;
pub mod event;
pub mod input;
pub mod screen;

pub use error::{Error, Result};
pub use event::{ButtonMask, Event, Key, ModMask};
pub use input::{DecoderCharset, InputDecoder};
pub use screen::Screen;
