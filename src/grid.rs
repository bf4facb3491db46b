//! The mutable evaluation grid: glyph state, the per-tick lock mask and the
//! frame-scoped MIDI event queue.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::glyph::{self, BANG_GLYPH, DOT_GLYPH};
use crate::midi::MidiNoteOnEvent;
use crate::ports::Port;

pub const MAX_ROWS: usize = 200;
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    state: Vec<Vec<char>>,
    // A locked cell is inert for the rest of the tick: it is not considered
    // as an operator and normal outputs to it are suppressed at discovery
    // level, not at poke level.
    locks: Vec<Vec<bool>>,
    midi_events: Vec<MidiNoteOnEvent>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Grid {
        Grid {
            rows,
            cols,
            state: vec![vec![DOT_GLYPH; cols]; rows],
            locks: vec![vec![false; cols]; rows],
            midi_events: Vec::new(),
        }
    }

    /// Load a grid from a plain-text file.
    ///
    /// The size is checked before the file is read so an oversize path is
    /// rejected without buffering it.
    pub fn from_path(path: &Path) -> Result<Grid> {
        let size = fs::metadata(path)?.len();
        if size > MAX_FILE_SIZE {
            return Err(Error::FileTooBig {
                path: path.to_path_buf(),
                size,
                max: MAX_FILE_SIZE,
            });
        }
        Grid::from_string(&fs::read_to_string(path)?)
    }

    /// Parse a grid from a string, one line per row.
    ///
    /// Fails if there are no lines, more than [`MAX_ROWS`] lines, or any
    /// line whose length differs from line 0.
    pub fn from_string(s: &str) -> Result<Grid> {
        let lines: Vec<&str> = s.lines().collect();
        if lines.len() > MAX_ROWS {
            return Err(Error::TooManyRows(lines.len()));
        }
        if lines.is_empty() {
            return Err(Error::EmptyGrid);
        }

        let expected = lines[0].chars().count();
        for (i, line) in lines.iter().enumerate() {
            let actual = line.chars().count();
            if actual != expected {
                return Err(Error::RaggedRow {
                    line: i,
                    actual,
                    expected,
                });
            }
        }

        let mut grid = Grid::new(lines.len(), expected);
        grid.state = lines.iter().map(|line| line.chars().collect()).collect();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        self.state.iter().map(|row| row.as_slice())
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Glyph at the given position, or `None` outside the grid.
    pub fn peek(&self, x: i32, y: i32) -> Option<char> {
        if self.is_inside(x, y) {
            Some(self.state[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Write a glyph at the given position. Out of bounds is a silent no-op.
    pub fn poke(&mut self, x: i32, y: i32, glyph: char) {
        if self.is_inside(x, y) {
            self.state[y as usize][x as usize] = glyph;
        }
    }

    pub fn lock(&mut self, x: i32, y: i32) {
        if self.is_inside(x, y) {
            self.locks[y as usize][x as usize] = true;
        }
    }

    pub fn is_locked(&self, x: i32, y: i32) -> bool {
        self.is_inside(x, y) && self.locks[y as usize][x as usize]
    }

    /// Clear all locks and the MIDI queue. Called at the start of every tick.
    pub fn reset_for_frame(&mut self) {
        for row in &mut self.locks {
            row.fill(false);
        }
        self.midi_events.clear();
    }

    /// Peek at a port's cell, substituting the port default when the cell
    /// reads DOT or BANG. Absent cells stay absent.
    pub fn listen(&self, port: &Port) -> Option<char> {
        match self.peek(port.x, port.y) {
            Some(g) if (g == DOT_GLYPH || g == BANG_GLYPH) && port.default.is_some() => {
                port.default
            }
            other => other,
        }
    }

    /// Listen to a port and decode the glyph, applying the port clamp.
    pub fn listen_as_value(&self, port: &Port) -> i32 {
        port.clamp.apply(glyph::value_of(self.listen(port)))
    }

    pub fn value_at(&self, x: i32, y: i32) -> i32 {
        glyph::value_of(self.peek(x, y))
    }

    pub fn key_of(&self, index: i32, upper_case: bool) -> char {
        glyph::key_of(index, upper_case)
    }

    /// Queue a MIDI note event for this frame.
    pub fn push_midi(&mut self, event: MidiNoteOnEvent) {
        self.midi_events.push(event);
    }

    pub fn midi_events(&self) -> &[MidiNoteOnEvent] {
        &self.midi_events
    }

    /// Hand the frame's events to the sink adapter, leaving the queue empty.
    pub fn take_midi_events(&mut self) -> Vec<MidiNoteOnEvent> {
        std::mem::take(&mut self.midi_events)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.state.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &g in row {
                write!(f, "{}", g)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Clamp;

    #[test]
    fn test_from_string_shape() {
        let grid = Grid::from_string("...\n...").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
    }

    #[test]
    fn test_from_string_rejects_ragged_rows() {
        match Grid::from_string("...\n....") {
            Err(Error::RaggedRow {
                line,
                actual,
                expected,
            }) => {
                assert_eq!(line, 1);
                assert_eq!(actual, 4);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected result: {:?}", other.map(|g| g.to_string())),
        }
    }

    #[test]
    fn test_from_string_rejects_empty() {
        assert!(matches!(Grid::from_string(""), Err(Error::EmptyGrid)));
    }

    #[test]
    fn test_from_string_rejects_too_many_rows() {
        let s = vec!["."; MAX_ROWS + 1].join("\n");
        assert!(matches!(
            Grid::from_string(&s),
            Err(Error::TooManyRows(n)) if n == MAX_ROWS + 1
        ));
    }

    #[test]
    fn test_peek_poke_bounds() {
        let mut grid = Grid::from_string(".A.\n...").unwrap();
        assert_eq!(grid.peek(1, 0), Some('A'));
        assert_eq!(grid.peek(4, 4), None);
        assert_eq!(grid.peek(-1, 0), None);

        grid.poke(3, 3, '3');
        assert_eq!(grid.peek(3, 3), None);

        grid.poke(1, 1, '3');
        assert_eq!(grid.peek(1, 1), Some('3'));
    }

    #[test]
    fn test_listen_default_substitution() {
        let grid = Grid::from_string(".*2").unwrap();
        let dot = Port::input("a", 0, 0).with_default('8');
        let bang = Port::input("b", 1, 0).with_default('8');
        let set = Port::input("c", 2, 0).with_default('8');
        let absent = Port::input("d", 9, 0).with_default('8');
        assert_eq!(grid.listen(&dot), Some('8'));
        assert_eq!(grid.listen(&bang), Some('8'));
        assert_eq!(grid.listen(&set), Some('2'));
        assert_eq!(grid.listen(&absent), None);
    }

    #[test]
    fn test_listen_as_value_applies_clamp() {
        let grid = Grid::from_string(".5").unwrap();
        let rate = Port::input("rate", 0, 0).with_clamp(Clamp::AtLeast(1));
        assert_eq!(grid.listen_as_value(&rate), 1);
        let capped = Port::input("cap", 1, 0).with_clamp(Clamp::Bounded(0, 3));
        assert_eq!(grid.listen_as_value(&capped), 3);
    }

    #[test]
    fn test_value_helpers() {
        let grid = Grid::from_string("3z.").unwrap();
        assert_eq!(grid.value_at(0, 0), 3);
        assert_eq!(grid.value_at(1, 0), 35);
        assert_eq!(grid.value_at(9, 9), 0);
        assert_eq!(grid.key_of(38, false), '2');
        assert_eq!(grid.key_of(11, true), 'B');
    }

    #[test]
    fn test_reset_for_frame() {
        let mut grid = Grid::from_string("...\n...").unwrap();
        grid.lock(1, 1);
        grid.push_midi(MidiNoteOnEvent {
            channel: 0,
            octave: 3,
            note: 'C',
            velocity: 4,
            length: 0,
        });
        grid.reset_for_frame();
        assert!(!grid.is_locked(1, 1));
        assert!(grid.midi_events().is_empty());
    }

    #[test]
    fn test_display_roundtrip() {
        let s = ".A2\n.#.";
        let grid = Grid::from_string(s).unwrap();
        assert_eq!(grid.to_string(), s);
    }
}
