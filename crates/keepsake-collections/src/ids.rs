//! Timestamp-derived entry ids.
//!
//! Ids are millisecond timestamps, bumped by one whenever the clock has not
//! moved past the last issued id. That keeps the familiar numeric shape while
//! guaranteeing uniqueness within one collection, including entries loaded
//! from storage (the generator is seeded with the largest stored id).

use rand::Rng;

/// Fraction steps for photo ids. Kept below 1.0 after `f64` rounding at
/// millisecond-timestamp magnitudes, so the integer part stays unique.
const FRACTION_STEPS: u32 = 1000;

/// Strictly increasing id source for one collection.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Seed the generator with an id that already exists.
    pub fn observe(&mut self, id: i64) {
        self.last = Some(self.last.map_or(id, |last| last.max(id)));
    }

    /// Next integer id at `now_millis`.
    ///
    /// If the last id cannot be bumped (it is `i64::MAX`), issuance restarts
    /// from `now_millis`; callers holding existing ids must skip collisions.
    pub fn next_id(&mut self, now_millis: i64) -> i64 {
        let id = match self.last {
            Some(last) if last >= now_millis => last.checked_add(1).unwrap_or(now_millis),
            _ => now_millis,
        };
        self.last = Some(id);
        id
    }

    /// Next photo id: a unique integer part plus a random fraction in `[0, 1)`.
    pub fn next_fractional_id(&mut self, now_millis: i64) -> f64 {
        let base = self.next_id(now_millis);
        let step = rand::thread_rng().gen_range(0..FRACTION_STEPS);
        base as f64 + f64::from(step) / f64::from(FRACTION_STEPS)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
