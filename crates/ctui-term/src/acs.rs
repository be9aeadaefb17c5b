#![forbid(unsafe_code)]

//! Alternate-character-set fallback table.
//!
//! When the charset cannot encode a drawing rune, the reconciler falls
//! back to the VT100 alternate character set: `enter_acs`, the
//! terminal's glyph selector, `exit_acs`. Terminals advertise which
//! selectors they honor through `acs_chars` (pairs of `vt100_name,
//! terminal_char`); runes the terminal does not cover degrade to plain
//! ASCII stand-ins.

use std::collections::HashMap;

/// (Unicode rune, VT100 selector, ASCII fallback), the standard VT100
/// drawing set.
const VT100_GLYPHS: [(char, char, &str); 32] = [
    ('£', '}', "f"),  // sterling
    ('↓', '.', "v"),  // down arrow
    ('←', ',', "<"),  // left arrow
    ('→', '+', ">"),  // right arrow
    ('↑', '-', "^"),  // up arrow
    ('·', '~', "o"),  // bullet
    ('░', 'h', "#"),  // board
    ('▒', 'a', ":"),  // checkerboard
    ('°', 'f', "\\"), // degree
    ('◆', '`', "+"),  // diamond
    ('≥', 'z', ">"),  // greater-or-equal
    ('π', '{', "*"),  // pi
    ('─', 'q', "-"),  // horizontal line
    ('§', 'i', "#"),  // lantern
    ('┼', 'n', "+"),  // crossover
    ('≤', 'y', "<"),  // less-or-equal
    ('└', 'm', "+"),  // lower-left corner
    ('┘', 'j', "+"),  // lower-right corner
    ('≠', '|', "!"),  // not-equal
    ('±', 'g', "#"),  // plus-minus
    ('⎺', 'o', "~"),  // scan line 1
    ('⎻', 'p', "-"),  // scan line 3
    ('⎼', 'r', "-"),  // scan line 7
    ('⎽', 's', "_"),  // scan line 9
    ('█', '0', "#"),  // solid block
    ('┬', 'w', "+"),  // top tee
    ('┤', 'u', "+"),  // right tee
    ('├', 't', "+"),  // left tee
    ('┴', 'v', "+"),  // bottom tee
    ('┌', 'l', "+"),  // upper-left corner
    ('┐', 'k', "+"),  // upper-right corner
    ('│', 'x', "|"),  // vertical line
];

/// Rune-to-output map built at init from the terminal's `acs_chars`.
pub type AcsMap = HashMap<char, String>;

/// Intersect the static VT100 table with the terminal's declared pairs.
///
/// Every rune gets its ASCII stand-in up front; pairs the terminal
/// declares upgrade the entry to `enter_acs` + selector + `exit_acs`.
#[must_use]
pub fn build_acs_map(enter_acs: &str, exit_acs: &str, acs_chars: &str) -> AcsMap {
    let mut map: AcsMap = VT100_GLYPHS
        .iter()
        .map(|&(utf, _, ascii)| (utf, ascii.to_string()))
        .collect();

    let pairs: Vec<char> = acs_chars.chars().collect();
    for chunk in pairs.chunks(2) {
        let [src, dst] = chunk else { break };
        if let Some(&(utf, _, _)) = VT100_GLYPHS.iter().find(|&&(_, vt, _)| vt == *src) {
            map.insert(utf, format!("{enter_acs}{dst}{exit_acs}"));
        }
    }
    map
}
