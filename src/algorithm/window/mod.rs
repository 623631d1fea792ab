//! Day-window aggregation relative to the index admission
//!
//! Offsets are signed day counts `event_date - anchor`: look-back windows have
//! a negative lower bound, look-ahead windows a positive upper bound. Both
//! bounds are inclusive. Events whose date cannot be read never fall inside a
//! window.

pub mod presence;
pub mod statistics;

pub use presence::{CodedEvent, count_dated, count_matching, presence_flag};
pub use statistics::{LabStatistics, in_time_order};

/// An inclusive range of day offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub lo: i64,
    pub hi: i64,
}

impl DayWindow {
    /// Every offset strictly before the anchor day
    pub const BEFORE: Self = Self::new(i64::MIN, -1);

    /// Every offset strictly after the anchor day
    pub const AFTER: Self = Self::new(1, i64::MAX);

    #[must_use]
    pub const fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    /// `[-days, 0]`
    #[must_use]
    pub const fn look_back(days: i64) -> Self {
        Self::new(-days, 0)
    }

    /// `[0, days]`
    #[must_use]
    pub const fn look_ahead(days: i64) -> Self {
        Self::new(0, days)
    }

    #[must_use]
    pub const fn contains(&self, offset: i64) -> bool {
        self.lo <= offset && offset <= self.hi
    }

    /// Whether an optional offset lies in the window; `None` never does
    #[must_use]
    pub fn admits(&self, offset: Option<i64>) -> bool {
        offset.is_some_and(|offset| self.contains(offset))
    }
}
