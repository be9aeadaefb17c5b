#![forbid(unsafe_code)]

//! Character-set codec seam.
//!
//! The engine speaks UTF-8 and US-ASCII natively; every other charset is
//! handled through the [`RuneDecoder`] / [`RuneEncoder`] transformer
//! traits, so codec families are pluggable. A small registry ships the
//! Latin-1 family as the representative single-byte codecs; embedders can
//! register anything else behind the same traits.
//!
//! The charset itself comes from the locale: the codeset suffix of
//! `LC_ALL` / `LC_CTYPE` / `LANG` (after `.`), with `C`/`POSIX` mapping
//! to US-ASCII and no codeset meaning UTF-8.

use std::env;

/// Canonical name of the native charset.
pub const UTF8: &str = "UTF-8";
/// Canonical name of the 7-bit fallback charset.
pub const ASCII: &str = "US-ASCII";

/// Outcome of one incremental decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStep {
    /// A rune was produced from `consumed` input bytes.
    Rune {
        /// The decoded character.
        ch: char,
        /// Bytes of input consumed.
        consumed: usize,
    },
    /// The input is a valid prefix; more bytes are needed.
    Incomplete,
    /// The input cannot begin a valid sequence; `consumed` bytes should
    /// be discarded.
    Invalid {
        /// Bytes of input to discard.
        consumed: usize,
    },
}

/// Incremental byte-to-rune transformer.
pub trait RuneDecoder: Send {
    /// Forget any partial state.
    fn reset(&mut self);
    /// Attempt to decode one rune from the front of `input`.
    fn decode(&mut self, input: &[u8]) -> DecodeStep;
}

/// Rune-to-byte transformer.
pub trait RuneEncoder: Send {
    /// Forget any partial state.
    fn reset(&mut self);
    /// Encode `ch`, appending to `out`. Returns `false` when the charset
    /// cannot represent the rune (nothing is appended).
    fn encode(&mut self, ch: char, out: &mut Vec<u8>) -> bool;
}

/// A registered character encoding: a factory for its transformers.
#[derive(Clone, Copy)]
pub struct Encoding {
    name: &'static str,
    new_decoder: fn() -> Box<dyn RuneDecoder>,
    new_encoder: fn() -> Box<dyn RuneEncoder>,
}

impl Encoding {
    /// Canonical name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fresh decoder instance.
    #[must_use]
    pub fn decoder(&self) -> Box<dyn RuneDecoder> {
        (self.new_decoder)()
    }

    /// Fresh encoder instance.
    #[must_use]
    pub fn encoder(&self) -> Box<dyn RuneEncoder> {
        (self.new_encoder)()
    }
}

/// Look up a codec factory by charset name (case-insensitive, common
/// aliases accepted). `UTF-8` and `US-ASCII` are not here: the engine
/// handles them without a codec.
#[must_use]
pub fn lookup_encoding(name: &str) -> Option<Encoding> {
    let folded = name.to_ascii_uppercase().replace('_', "-");
    match folded.as_str() {
        "ISO-8859-1" | "ISO8859-1" | "LATIN1" | "LATIN-1" | "L1" | "8859-1" => Some(Encoding {
            name: "ISO-8859-1",
            new_decoder: || Box::new(Latin1Decoder),
            new_encoder: || Box::new(Latin1Encoder),
        }),
        _ => None,
    }
}

/// ISO-8859-1: each byte is the identically numbered code point.
struct Latin1Decoder;

impl RuneDecoder for Latin1Decoder {
    fn reset(&mut self) {}

    fn decode(&mut self, input: &[u8]) -> DecodeStep {
        match input.first() {
            Some(&b) => DecodeStep::Rune {
                ch: b as char,
                consumed: 1,
            },
            None => DecodeStep::Incomplete,
        }
    }
}

struct Latin1Encoder;

impl RuneEncoder for Latin1Encoder {
    fn reset(&mut self) {}

    fn encode(&mut self, ch: char, out: &mut Vec<u8>) -> bool {
        let cp = ch as u32;
        if cp <= 0xFF {
            out.push(cp as u8);
            true
        } else {
            false
        }
    }
}

/// Derive the charset from the process environment.
#[must_use]
pub fn charset_from_env() -> String {
    let lc_all = env::var("LC_ALL").ok();
    let lc_ctype = env::var("LC_CTYPE").ok();
    let lang = env::var("LANG").ok();
    charset_from_locale(lc_all.as_deref(), lc_ctype.as_deref(), lang.as_deref())
}

/// Derive the charset from explicit locale values.
///
/// Preference order is `LC_ALL`, `LC_CTYPE`, `LANG`. `C` and `POSIX`
/// (and empty) mean US-ASCII; a locale without a codeset suffix means
/// UTF-8; otherwise the codeset (minus any `@modifier`) is returned
/// upper-cased, with `utf8` normalized to `UTF-8`.
#[must_use]
pub fn charset_from_locale(
    lc_all: Option<&str>,
    lc_ctype: Option<&str>,
    lang: Option<&str>,
) -> String {
    let locale = [lc_all, lc_ctype, lang]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("");

    if locale.is_empty() || locale == "C" || locale == "POSIX" {
        return ASCII.to_string();
    }

    let Some(dot) = locale.find('.') else {
        return UTF8.to_string();
    };
    let codeset = &locale[dot + 1..];
    let codeset = codeset.split('@').next().unwrap_or(codeset);
    let folded = codeset.to_ascii_uppercase().replace('_', "-");
    if folded == "UTF8" || folded == "UTF-8" {
        UTF8.to_string()
    } else if folded.is_empty() {
        UTF8.to_string()
    } else {
        folded
    }
}
