use std::fmt::{Display, Formatter};

use crate::temperature::Tenths;

/// Running statistics for one station, all values in tenths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub minimum: i16,
    pub maximum: i16,
    pub sum: i64,
    pub count: u64,
}

impl Measurement {
    pub fn new(value: i16) -> Self {
        Self { minimum: value, maximum: value, sum: value as i64, count: 1 }
    }

    #[inline]
    pub fn update(&mut self, value: i16) {
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
        self.sum += value as i64;
        self.count += 1;
    }

    /// Mean in tenths, rounded to the nearest tenth with ties toward +infinity.
    ///
    /// Returns 0 for an empty measurement.
    pub fn mean_tenths(&self) -> i64 {
        if self.count == 0 {
            return 0;
        }
        let count = self.count as i128;
        ((2 * self.sum as i128 + count).div_euclid(2 * count)) as i64
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self { minimum: i16::MAX, maximum: i16::MIN, sum: 0, count: 0 }
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let min = Tenths(self.minimum as i64);
        let avg = Tenths(self.mean_tenths());
        let max = Tenths(self.maximum as i64);

        write!(f, "{min}/{avg}/{max}")
    }
}
