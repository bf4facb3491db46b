//! JSON model of a headless run: per-frame note events plus the final grid.

use serde::Serialize;

use crate::engine::Engine;
use crate::midi::MidiNoteOnEvent;

#[derive(Debug, Clone, Serialize)]
pub struct RunTrace {
    pub rows: usize,
    pub cols: usize,
    pub frames: Vec<FrameTrace>,
    /// Grid rows after the last frame, one string per row.
    pub grid: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameTrace {
    pub frame: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<NoteEventJson>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteEventJson {
    pub channel: u8,
    pub octave: u8,
    pub note: char,
    pub velocity: u8,
    pub length: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_number: Option<u8>,
}

impl From<MidiNoteOnEvent> for NoteEventJson {
    fn from(event: MidiNoteOnEvent) -> NoteEventJson {
        NoteEventJson {
            channel: event.channel,
            octave: event.octave,
            note: event.note,
            velocity: event.velocity,
            length: event.length,
            note_number: event.note_number(),
        }
    }
}

impl RunTrace {
    /// Tick the engine `frames` times, collecting each frame's note events.
    pub fn capture(engine: &mut Engine, frames: usize) -> RunTrace {
        let mut traced = Vec::with_capacity(frames);
        for _ in 0..frames {
            let frame = engine.frame();
            engine.tick();
            let events = engine
                .grid_mut()
                .take_midi_events()
                .into_iter()
                .map(NoteEventJson::from)
                .collect();
            traced.push(FrameTrace { frame, events });
        }

        let grid = engine.grid();
        RunTrace {
            rows: grid.rows(),
            cols: grid.cols(),
            frames: traced,
            grid: grid
                .iter_rows()
                .map(|row| row.iter().collect::<String>())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_capture_collects_events_and_final_grid() {
        let grid = Grid::from_string("*:13C4\n......").unwrap();
        let mut engine = Engine::with_seed(grid, 0);
        let trace = RunTrace::capture(&mut engine, 2);

        assert_eq!(trace.rows, 2);
        assert_eq!(trace.cols, 6);
        assert_eq!(trace.frames.len(), 2);
        assert_eq!(trace.frames[0].frame, 0);
        assert_eq!(trace.frames[0].events.len(), 1);
        let event = &trace.frames[0].events[0];
        assert_eq!(event.channel, 1);
        assert_eq!(event.note, 'C');
        assert_eq!(event.note_number, Some(60));
        assert_eq!(trace.grid.len(), 2);
    }

    #[test]
    fn test_trace_serializes() {
        let grid = Grid::from_string("...").unwrap();
        let mut engine = Engine::with_seed(grid, 0);
        let trace = RunTrace::capture(&mut engine, 1);
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"rows\":1"));
        // Empty event lists are omitted entirely.
        assert!(!json.contains("\"events\""));
    }
}
