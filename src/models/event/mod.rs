// Event module
// Concrete (already expanded) event instances as handed over by the event store

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Identifier of an event instance, as assigned by the event store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub i64);

/// Half-open time interval `[start, end)`
///
/// Two intervals overlap iff `a.start < b.end && b.start < a.end`, so
/// touching intervals (`a.end == b.start`) never overlap. An interval whose
/// `end` lies before its `start` is treated as zero-width at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// End time with malformed intervals collapsed onto `start`
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end.max(self.start)
    }

    pub fn is_zero_width(&self) -> bool {
        self.effective_end() == self.start
    }

    pub fn duration(&self) -> Duration {
        self.effective_end() - self.start
    }

    /// Strict overlap test; touching intervals do not overlap
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.effective_end() && other.start < self.effective_end()
    }
}

/// A concrete event instance with absolute start/end timestamps
///
/// The layout engine never mutates events; identity is by `id`.
///
/// # Examples
/// ```
/// use calendar_layout::models::event::{EventId, TimedEvent};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let event = TimedEvent::new(
///     EventId(1),
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(10, 0, 0).unwrap(),
/// );
/// assert_eq!(event.interval.duration().num_minutes(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub id: EventId,
    pub interval: Interval,
    #[serde(default)]
    pub all_day: bool,
}

impl TimedEvent {
    pub fn new(id: EventId, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id,
            interval: Interval::new(start, end),
            all_day: false,
        }
    }

    /// Create an all-day event instance
    pub fn all_day(id: EventId, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            all_day: true,
            ..Self::new(id, start, end)
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.interval.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.interval.end
    }

    pub fn overlaps(&self, other: &TimedEvent) -> bool {
        self.interval.overlaps(&other.interval)
    }
}
