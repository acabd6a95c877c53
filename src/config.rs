use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::record::MAX_LINE_LEN;

pub const DEFAULT_BLOCK_SIZE: usize = 1 << 24;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 500;

/// What to do with bytes after the last newline of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingLine {
    /// End of input terminates the final line.
    #[default]
    Implicit,
    /// A final line without newline fails the run.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Fixed-size block reads through one reused buffer.
    #[default]
    Buffered,
    /// Map the whole file and scan it in place.
    Mapped,
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    /// Standard output when `None`.
    pub output: Option<PathBuf>,
    pub block_size: usize,
    pub trailing_line: TrailingLine,
    pub input_mode: InputMode,
    pub channel_capacity: usize,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            block_size: DEFAULT_BLOCK_SIZE,
            trailing_line: TrailingLine::default(),
            input_mode: InputMode::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size < MAX_LINE_LEN {
            return Err(Error::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}
