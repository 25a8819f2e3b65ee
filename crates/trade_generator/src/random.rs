//! Randomness and time sources.
//!
//! The generator draws every random value through [`RandomSource`] and reads
//! the current date through [`Clock`], so tests can substitute seeded or
//! scripted sources and a fixed date.

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random draws
pub trait RandomSource: Send {
    /// Uniform integer in `[min, max]` (inclusive); `min` when the range is empty
    fn int_in_range(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.int_in_range(0, 1) == 0
    }
}

impl RandomSource for StdRng {
    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Non-deterministic source seeded from the operating system
pub fn entropy() -> Box<dyn RandomSource> {
    Box::new(StdRng::from_entropy())
}

/// Deterministic source seeded from a number
pub fn seeded(seed: u64) -> Box<dyn RandomSource> {
    Box::new(StdRng::seed_from_u64(seed))
}

/// Source that replays fixed values in a loop.
///
/// Integer draws take the next scripted integer clamped into the requested
/// range; unit draws take the next scripted float clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    ints: Vec<i64>,
    units: Vec<f64>,
    int_pos: usize,
    unit_pos: usize,
}

impl ScriptedSource {
    /// Create a source from integer and unit-float scripts
    pub fn new(ints: Vec<i64>, units: Vec<f64>) -> Self {
        Self {
            ints,
            units,
            int_pos: 0,
            unit_pos: 0,
        }
    }

    /// Source whose integer draws all return `value` (clamped)
    pub fn constant(value: i64) -> Self {
        Self::new(vec![value], vec![0.5])
    }
}

impl RandomSource for ScriptedSource {
    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min || self.ints.is_empty() {
            return min;
        }
        let value = self.ints[self.int_pos % self.ints.len()];
        self.int_pos += 1;
        value.clamp(min, max)
    }

    fn unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let value = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Pick one element uniformly; `items` must not be empty
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    let last = items.len().saturating_sub(1);
    let idx = rng.int_in_range(0, last as i64) as usize;
    &items[idx.min(last)]
}

/// Round to 4 decimal places
pub fn round_to_4_decimals(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Uniform value in `[min, max]` with 4-decimal precision
pub fn meaningful_double_in_range(rng: &mut dyn RandomSource, min: f64, max: f64) -> f64 {
    round_to_4_decimals(min + rng.unit() * (max - min)).clamp(min, max)
}

/// Source of the current date
pub trait Clock: Send + Sync {
    /// Today's date
    fn today(&self) -> NaiveDate;
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock frozen at a given date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
