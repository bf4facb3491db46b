//! Drains the grid's frame queue into note-on/note-off message pairs.
//!
//! Note-offs for the previous tick always go out before this tick's
//! note-ons. Duplicate `(channel, note, velocity)` triples within a frame
//! collapse to a single pair, keeping first-insertion order.

use crate::error::Result;
use crate::grid::Grid;
use crate::midi::transport::MidiSink;

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NoteMessage {
    channel: u8,
    note: u8,
    velocity: u8,
}

#[derive(Debug, Default)]
pub struct MidiAdapter {
    /// Notes switched on last tick, to be released this tick.
    pending_off: Vec<NoteMessage>,
}

impl MidiAdapter {
    pub fn new() -> MidiAdapter {
        MidiAdapter::default()
    }

    /// Flush one tick's worth of events: release last tick's notes, then
    /// sound the notes queued on the grid during this tick.
    pub fn pump(&mut self, grid: &mut Grid, sink: &mut dyn MidiSink) -> Result<()> {
        for message in std::mem::take(&mut self.pending_off) {
            sink.send_message([NOTE_OFF | message.channel, message.note, message.velocity])?;
        }

        let mut sounded: Vec<NoteMessage> = Vec::new();
        for event in grid.take_midi_events() {
            let note = match event.note_number() {
                Some(n) => n,
                None => continue,
            };
            let message = NoteMessage {
                channel: event.channel,
                note,
                velocity: event.velocity,
            };
            if sounded.contains(&message) {
                continue;
            }
            sink.send_message([NOTE_ON | message.channel, message.note, message.velocity])?;
            sounded.push(message);
        }
        self.pending_off = sounded;
        Ok(())
    }

    /// Release anything still sounding, e.g. on shutdown.
    pub fn flush(&mut self, sink: &mut dyn MidiSink) -> Result<()> {
        for message in std::mem::take(&mut self.pending_off) {
            sink.send_message([NOTE_OFF | message.channel, message.note, message.velocity])?;
        }
        Ok(())
    }
}
