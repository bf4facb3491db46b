//! MIDI note events, the per-tick sink adapter and the output transport.

pub mod adapter;
pub mod event;
pub mod transport;

pub use adapter::MidiAdapter;
pub use event::{note_index, MidiNoteOnEvent, NOTE_TABLE};
pub use transport::{MidiSink, MidirSink, NullSink};
