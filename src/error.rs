use bstr::BString;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single record could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("no `;` separator before the temperature")]
    MissingSeparator,
    #[error("temperature {0:?} is not of the form -?d?d.d")]
    InvalidTemperature(BString),
    #[error("station name is {0} bytes long, expected 1 to 100")]
    InvalidStationLength(usize),
    #[error("station name contains the reserved byte 0xff")]
    ReservedByte,
    #[error("station name contains the `;` separator")]
    SeparatorInStation,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: {kind}")]
    Malformed { line: u64, kind: RecordError },

    #[error("a line does not fit in the {block_size}-byte read block")]
    LineTooLong { block_size: usize },

    #[error("input ends without a trailing newline")]
    MissingTrailingNewline,

    #[error("read block of {0} bytes cannot hold the longest legal line")]
    InvalidBlockSize(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
