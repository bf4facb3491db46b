//! The 36-symbol glyph alphabet and its value codec.
//!
//! Values are bounded integers in `[0, 35]`; case carries no value and is
//! re-introduced only at output time by the sensitivity rule.

/// The storage-level empty cell.
pub const DOT_GLYPH: char = '.';
/// A one-tick pulse.
pub const BANG_GLYPH: char = '*';
/// Start/end of a comment span.
pub const COMMENT_GLYPH: char = '#';
/// The MIDI note operator.
pub const MIDI_GLYPH: char = ':';
/// What the renderer collaborator shows in place of [`DOT_GLYPH`].
pub const EMPTY_GLYPH: char = ' ';

/// The value alphabet `0..9,a..z`, indexed by value.
pub const GLYPH_TABLE: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h',
    'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub const GLYPH_TABLE_SIZE: i32 = GLYPH_TABLE.len() as i32;

/// Index of a glyph in the value alphabet, case-insensitive.
///
/// Returns -1 for anything outside the alphabet.
pub fn index_of(glyph: char) -> i32 {
    match glyph.to_ascii_lowercase() {
        c @ '0'..='9' => c as i32 - '0' as i32,
        c @ 'a'..='z' => c as i32 - 'a' as i32 + 10,
        _ => -1,
    }
}

/// Numeric value of a cell read.
///
/// DOT, BANG and absent cells all decode to 0; unknown glyphs to -1.
pub fn value_of(glyph: Option<char>) -> i32 {
    match glyph {
        None | Some(DOT_GLYPH) | Some(BANG_GLYPH) => 0,
        Some(g) => index_of(g),
    }
}

/// Glyph for a value, wrapping modulo the table size.
pub fn key_of(index: i32, upper_case: bool) -> char {
    let glyph = GLYPH_TABLE[index.rem_euclid(GLYPH_TABLE_SIZE) as usize];
    if upper_case {
        glyph.to_ascii_uppercase()
    } else {
        glyph
    }
}
