use bstr::{BString, ByteSlice};

use crate::error::RecordError;
use crate::temperature::{self, MAX_VALUE_LEN, MIN_VALUE_LEN};

const SEMICOLON: u8 = 59;

/// Longest station name, in bytes.
pub const MAX_STATION_LEN: usize = 100;
/// Longest legal line including its newline.
pub const MAX_LINE_LEN: usize = MAX_STATION_LEN + 1 + MAX_VALUE_LEN + 1;

/// Splits `line` into station name and temperature text at the last `;`.
///
/// Only the last `MAX_VALUE_LEN + 1` bytes are searched, so the cost does not
/// depend on the length of the name.
pub fn split_record(line: &[u8]) -> Result<(&[u8], &[u8]), RecordError> {
    let window = line.len().saturating_sub(MAX_VALUE_LEN + 1);
    let semi_pos = match line[window..].rfind_byte(SEMICOLON) {
        Some(position) => window + position,
        None => return Err(RecordError::MissingSeparator),
    };
    Ok((&line[..semi_pos], &line[(semi_pos + 1)..]))
}

/// Splits and validates one line, returning the station and its value in tenths.
#[inline]
pub fn parse_record(line: &[u8]) -> Result<(&[u8], i16), RecordError> {
    let (station, value) = split_record(line)?;

    if !(1..=MAX_STATION_LEN).contains(&station.len()) {
        return Err(RecordError::InvalidStationLength(station.len()));
    }
    if !(MIN_VALUE_LEN..=MAX_VALUE_LEN).contains(&value.len()) || !temperature::is_valid(value) {
        return Err(RecordError::InvalidTemperature(BString::from(value)));
    }

    Ok((station, temperature::parse_tenths(value)))
}
