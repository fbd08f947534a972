use crate::record::Timestamp;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::Rng;
use std::num::NonZeroU64;

const WINDOW_MICROS: f64 = 86_400_000_000.0;
pub const JITTER_MS: i64 = 500;

/// Spreads `len` records evenly over the 24 hours starting at the fixture
/// epoch, 2026-01-31T00:00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    start: NaiveDateTime,
    step_micros: i64,
    len: NonZeroU64,
}

pub fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 31)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid epoch")
}

impl Schedule {
    pub fn new(len: NonZeroU64) -> Self {
        // Sub-microsecond remainders round half to even.
        let step_micros = (WINDOW_MICROS / len.get() as f64).round_ties_even() as i64;
        Self {
            start: epoch(),
            step_micros,
            len,
        }
    }

    pub fn len(&self) -> NonZeroU64 {
        self.len
    }

    pub fn step(&self) -> TimeDelta {
        TimeDelta::microseconds(self.step_micros)
    }

    pub fn nominal(&self, index: u64) -> NaiveDateTime {
        self.start + TimeDelta::microseconds(self.step_micros * index as i64)
    }

    /// Nominal time of `index` shifted by a uniform [-500, 500] ms offset.
    pub fn jittered<R: Rng + ?Sized>(&self, rng: &mut R, index: u64) -> Timestamp {
        let jitter = TimeDelta::milliseconds(rng.random_range(-JITTER_MS..=JITTER_MS));
        (self.nominal(index) + jitter).into()
    }
}
