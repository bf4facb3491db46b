use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Grid has too many rows ({0}, max is 200)")]
    TooManyRows(usize),

    #[error("Grid string is empty")]
    EmptyGrid,

    #[error("Line {line} length is inconsistent: {actual} vs {expected}")]
    RaggedRow {
        line: usize,
        actual: usize,
        expected: usize,
    },

    #[error("File {} too big ({} bytes, max is {})", .path.display(), .size, .max)]
    FileTooBig { path: PathBuf, size: u64, max: u64 },

    #[error("MIDI error: {0}")]
    Midi(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
