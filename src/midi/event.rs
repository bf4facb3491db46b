//! Note events queued by the `:` operator during a frame.

use serde::Serialize;

/// The twelve note glyphs, lower case marking sharps.
pub const NOTE_TABLE: [char; 12] = ['C', 'c', 'D', 'd', 'E', 'F', 'f', 'G', 'g', 'A', 'a', 'B'];

/// Semitone index of a note glyph, or `None` for anything else.
pub fn note_index(glyph: char) -> Option<u8> {
    NOTE_TABLE.iter().position(|&n| n == glyph).map(|i| i as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MidiNoteOnEvent {
    /// MIDI channel, 0..15.
    pub channel: u8,
    /// Octave, 0..8.
    pub octave: u8,
    /// One of [`NOTE_TABLE`].
    pub note: char,
    /// Velocity, 0..16.
    pub velocity: u8,
    /// Note length in ticks, 0..32. Parsed but not scheduled by the adapter.
    pub length: u8,
}

impl MidiNoteOnEvent {
    /// MIDI note number: octave 0 starts at note 24.
    pub fn note_number(&self) -> Option<u8> {
        note_index(self.note).map(|i| 24 + 12 * self.octave + i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_index() {
        assert_eq!(note_index('C'), Some(0));
        assert_eq!(note_index('c'), Some(1));
        assert_eq!(note_index('B'), Some(11));
        assert_eq!(note_index('H'), None);
        assert_eq!(note_index('.'), None);
    }

    #[test]
    fn test_note_number() {
        let event = MidiNoteOnEvent {
            channel: 0,
            octave: 3,
            note: 'C',
            velocity: 4,
            length: 0,
        };
        assert_eq!(event.note_number(), Some(60));

        let event = MidiNoteOnEvent { octave: 0, ..event };
        assert_eq!(event.note_number(), Some(24));
    }
}
