//! Fixed-point temperatures in tenths of a degree.

use std::fmt::{Display, Formatter};

const MINUS: u8 = 45;
const PERIOD: u8 = 46;
const ZERO: u8 = 48;

/// Longest legal value, `-99.9`.
pub const MAX_VALUE_LEN: usize = 5;
/// Shortest legal value, `9.9`.
pub const MIN_VALUE_LEN: usize = 3;

/// Converts a validated temperature into tenths, e.g. `b"-12.5"` into `-125`.
///
/// The caller must have checked the input with [`is_valid`]; any other
/// length is not handled here.
#[inline]
pub fn parse_tenths(value: &[u8]) -> i16 {
    debug_assert!(is_valid(value));
    let length = value.len();
    let mut acc = digit(value[length - 1]) + digit(value[length - 3]) * 10;

    match value[0] {
        MINUS => {
            if length == MAX_VALUE_LEN {
                acc += digit(value[1]) * 100;
            }
            -acc
        }
        _ => {
            if length == 4 {
                acc += digit(value[0]) * 100;
            }
            acc
        }
    }
}

#[inline]
fn digit(byte: u8) -> i16 {
    (byte - ZERO) as i16
}

/// Checks `value` against `-?\d{1,2}\.\d` without parsing it.
pub fn is_valid(value: &[u8]) -> bool {
    let digits = match value.first() {
        Some(&MINUS) => &value[1..],
        _ => value,
    };
    match digits {
        [whole @ .., PERIOD, fraction] if (1..=2).contains(&whole.len()) => {
            fraction.is_ascii_digit() && whole.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Displays a tenths value with exactly one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenths(pub i64);

impl Display for Tenths {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", magnitude / 10, magnitude % 10)
    }
}
