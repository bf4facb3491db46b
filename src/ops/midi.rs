//! The `:` operator: queue a MIDI note-on event for the current frame.

use super::{Operator, Payload};
use crate::glyph::{BANG_GLYPH, DOT_GLYPH};
use crate::grid::Grid;
use crate::midi::{note_index, MidiNoteOnEvent};
use crate::ports::{Clamp, Port};

pub(super) fn midi_ports(x: i32, y: i32) -> Vec<Port> {
    vec![
        Port::input("channel", x + 1, y),
        Port::input("octave", x + 2, y).with_clamp(Clamp::Bounded(0, 8)),
        Port::input("note", x + 3, y),
        Port::input("velocity", x + 4, y)
            .with_default('f')
            .with_clamp(Clamp::Bounded(0, 16)),
        Port::input("length", x + 5, y).with_clamp(Clamp::Bounded(0, 32)),
    ]
}

/// Runs only when pulsed by a neighboring BANG (or forced). Aborts silently
/// when channel, octave or note are empty or absent, when the note glyph is
/// not a note, or when the channel is out of range.
pub(super) fn midi(op: &Operator, grid: &mut Grid, force: bool) -> Payload {
    if !force && !op.has_neighbor(grid, BANG_GLYPH) {
        return Payload::None;
    }

    for name in ["channel", "octave", "note"] {
        match grid.listen(op.port(name)) {
            None | Some(DOT_GLYPH) => return Payload::None,
            Some(_) => {}
        }
    }

    let note = match grid.listen(op.port("note")) {
        Some(glyph) if note_index(glyph).is_some() => glyph,
        _ => return Payload::None,
    };

    let channel = grid.listen_as_value(op.port("channel"));
    if !(0..=15).contains(&channel) {
        return Payload::None;
    }

    let octave = grid.listen_as_value(op.port("octave"));
    let velocity = grid.listen_as_value(op.port("velocity"));
    let length = grid.listen_as_value(op.port("length"));

    grid.push_midi(MidiNoteOnEvent {
        channel: channel as u8,
        octave: octave as u8,
        note,
        velocity: velocity as u8,
        length: length as u8,
    });
    Payload::None
}
