//! Bounded, time-ordered sample history
//!
//! Each remote aircraft keeps one [`SituationBuffer`] and one [`PartsBuffer`].
//! Samples are kept oldest first, ordered by adjusted timestamp
//! (timestamp + time offset). Once the capacity is exceeded the oldest sample
//! is evicted.

use crate::aviation::{Parts, Situation};
use crate::error::SampleError;

/// Default number of situations kept per callsign
pub const DEFAULT_SITUATION_CAPACITY: usize = 20;

/// Default number of parts samples kept per callsign
pub const DEFAULT_PARTS_CAPACITY: usize = 10;

/// Parts older than this (relative to the newest full update) are dropped
pub const MAX_PARTS_AGE_MS: i64 = 60_000;

/// A sample that can be stored in a [`SampleBuffer`]
pub trait TimedSample: Clone {
    /// Ordering key in ms (timestamp + offset)
    fn adjusted_ms(&self) -> i64;

    /// Reject values that would poison interpolation
    fn validate(&self) -> Result<(), SampleError>;
}

/// What happened to an inserted sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Newer than everything stored
    Appended,
    /// Same adjusted timestamp as a stored sample, which it replaced
    Replaced,
    /// Older than the newest sample, merged in time order
    OutOfOrder,
    /// Older than everything in a full buffer, evicted right away
    TooOld,
}

/// Where a query time falls relative to the stored samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketPosition {
    /// Between two samples (or exactly on the newest)
    Inside,
    /// Before the oldest sample; both ends are the oldest sample
    BeforeOldest,
    /// After the newest sample; both ends are the newest sample
    AfterNewest,
    /// Only one sample is stored
    Single,
}

/// The two samples surrounding a query time
#[derive(Debug, Clone)]
pub struct Bracket<'a, T> {
    pub older: &'a T,
    pub newer: &'a T,
    pub older_index: usize,
    pub newer_index: usize,
    pub position: BracketPosition,
}

impl<'a, T: TimedSample> Bracket<'a, T> {
    /// Fraction of the way from `older` to `newer` at time `t`, in [0, 1]
    pub fn fraction(&self, t: i64) -> f64 {
        let older = self.older.adjusted_ms() as i128;
        let newer = self.newer.adjusted_ms() as i128;
        let span = (newer - older).max(1) as f64;
        ((t as i128 - older) as f64 / span).clamp(0.0, 1.0)
    }

    /// Both ends are the same sample (hold)
    pub fn is_clamped(&self) -> bool {
        self.position != BracketPosition::Inside
    }
}

/// Bounded buffer of samples, oldest first
#[derive(Debug, Clone)]
pub struct SampleBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
}

pub type SituationBuffer = SampleBuffer<Situation>;
pub type PartsBuffer = SampleBuffer<Parts>;

impl<T: TimedSample> SampleBuffer<T> {
    /// Create a buffer holding at most `capacity` samples (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        SampleBuffer {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a sample keeping time order
    pub fn insert(&mut self, sample: T) -> Result<InsertOutcome, SampleError> {
        sample.validate()?;
        let ts = sample.adjusted_ms();

        let outcome = match self.samples.last() {
            None => {
                self.samples.push(sample);
                InsertOutcome::Appended
            }
            Some(newest) if ts > newest.adjusted_ms() => {
                self.samples.push(sample);
                InsertOutcome::Appended
            }
            Some(_) => {
                let index = self.samples.partition_point(|s| s.adjusted_ms() < ts);
                if self.samples[index].adjusted_ms() == ts {
                    self.samples[index] = sample;
                    InsertOutcome::Replaced
                } else if index == 0 && self.samples.len() >= self.capacity {
                    InsertOutcome::TooOld
                } else {
                    self.samples.insert(index, sample);
                    InsertOutcome::OutOfOrder
                }
            }
        };

        while self.samples.len() > self.capacity {
            self.samples.remove(0);
        }
        Ok(outcome)
    }

    pub fn oldest_timestamp(&self) -> Option<i64> {
        self.samples.first().map(|s| s.adjusted_ms())
    }

    pub fn newest_timestamp(&self) -> Option<i64> {
        self.samples.last().map(|s| s.adjusted_ms())
    }

    /// Find the samples surrounding time `t`.
    ///
    /// Outside the stored span the bracket is clamped to a repeated boundary
    /// sample. A query exactly on the newest sample is still `Inside`.
    pub fn bracketing(&self, t: i64) -> Option<Bracket<'_, T>> {
        let last = self.samples.len().checked_sub(1)?;

        if last == 0 {
            return Some(self.bracket(0, 0, BracketPosition::Single));
        }

        // Number of samples at or before t
        let at_or_before = self.samples.partition_point(|s| s.adjusted_ms() <= t);
        if at_or_before == 0 {
            return Some(self.bracket(0, 0, BracketPosition::BeforeOldest));
        }

        let older = at_or_before - 1;
        if older < last {
            return Some(self.bracket(older, older + 1, BracketPosition::Inside));
        }

        if self.samples[last].adjusted_ms() == t {
            Some(self.bracket(last - 1, last, BracketPosition::Inside))
        } else {
            Some(self.bracket(last, last, BracketPosition::AfterNewest))
        }
    }

    /// Up to two samples on each side of `t`, oldest first. Empty unless `t`
    /// lies inside the stored span.
    pub fn window(&self, t: i64) -> &[T] {
        match self.bracketing(t) {
            Some(bracket) if bracket.position == BracketPosition::Inside => {
                let first = bracket.older_index.saturating_sub(1);
                let last = (bracket.newer_index + 2).min(self.samples.len());
                &self.samples[first..last]
            }
            _ => &[],
        }
    }

    fn bracket(&self, older: usize, newer: usize, position: BracketPosition) -> Bracket<'_, T> {
        Bracket {
            older: &self.samples[older],
            newer: &self.samples[newer],
            older_index: older,
            newer_index: newer,
            position,
        }
    }

    /// Drop samples with an adjusted timestamp before `min_ms`
    pub fn remove_older_than(&mut self, min_ms: i64) -> usize {
        let before = self.samples.len();
        self.samples.retain(|s| s.adjusted_ms() >= min_ms);
        before - self.samples.len()
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.last()
    }

    pub fn latest_mut(&mut self) -> Option<&mut T> {
        self.samples.last_mut()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.samples.first()
    }

    /// Stored samples, oldest first
    pub fn as_slice(&self) -> &[T] {
        &self.samples
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for SituationBuffer {
    fn default() -> Self {
        SampleBuffer::new(DEFAULT_SITUATION_CAPACITY)
    }
}

impl Default for PartsBuffer {
    fn default() -> Self {
        SampleBuffer::new(DEFAULT_PARTS_CAPACITY)
    }
}
