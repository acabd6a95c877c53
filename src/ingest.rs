use std::fs::File;
use std::io::Read;

use memmap2::MmapOptions;

use crate::config::{Config, InputMode};
use crate::dictionary::StationTrie;
use crate::error::{Error, Result};
use crate::reader::{ChunkedReader, LineSource, SliceLines};
use crate::record::parse_record;

/// Drains `source` into a fresh dictionary, failing on the first bad line.
pub fn ingest<S: LineSource>(source: &mut S) -> Result<StationTrie> {
    let mut stations = StationTrie::new();
    let mut line_number: u64 = 0;

    while let Some(line) = source.next_line()? {
        line_number += 1;
        let malformed = |kind| Error::Malformed { line: line_number, kind };

        let (station, value) = parse_record(line).map_err(malformed)?;
        stations.resolve(station).map_err(malformed)?.update(value);
    }

    Ok(stations)
}

pub fn ingest_reader<R: Read>(reader: R, config: &Config) -> Result<StationTrie> {
    ingest(&mut ChunkedReader::new(reader, config.block_size, config.trailing_line)?)
}

/// Aggregates an opened file using the configured input mode.
pub fn ingest_file(file: &File, config: &Config) -> Result<StationTrie> {
    match config.input_mode {
        InputMode::Buffered => ingest_reader(file, config),
        InputMode::Mapped => {
            if file.metadata()?.len() == 0 {
                return Ok(StationTrie::new());
            }
            // The input must not be truncated while mapped.
            let mmap = unsafe { MmapOptions::new().map(file)? };
            ingest(&mut SliceLines::new(&mmap, config.trailing_line))
        }
    }
}
