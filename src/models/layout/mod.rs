// Layout module
// Output types of the column and week-row assigners

use serde::{Deserialize, Serialize};

use crate::models::event::EventId;

/// Number of day cells in a week row
pub const DAYS_PER_WEEK: u8 = 7;

/// Column placement of a timed event inside a single-day time grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAssignment {
    pub event_id: EventId,
    pub column_index: usize,
    /// Peak number of simultaneously active events in the event's overlap group
    pub total_columns: usize,
}

/// The part of a (possibly multi-week) event visible in one week row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub event_id: EventId,
    pub week_row_index: usize,
    /// 0..=6
    pub start_day_in_week: u8,
    /// 0..=6, inclusive, never before `start_day_in_week`
    pub end_day_in_week: u8,
    pub is_first_segment: bool,
    pub is_last_segment: bool,
}

impl Segment {
    /// Build a segment, normalising the day range into `0..=6`
    pub fn new(
        event_id: EventId,
        week_row_index: usize,
        start_day_in_week: u8,
        end_day_in_week: u8,
        is_first_segment: bool,
        is_last_segment: bool,
    ) -> Self {
        let last = DAYS_PER_WEEK - 1;
        let start = start_day_in_week.min(last);
        let end = end_day_in_week.clamp(start, last);
        Self {
            event_id,
            week_row_index,
            start_day_in_week: start,
            end_day_in_week: end,
            is_first_segment,
            is_last_segment,
        }
    }

    pub fn span_days(&self) -> u8 {
        self.end_day_in_week - self.start_day_in_week + 1
    }

    pub fn is_single_day(&self) -> bool {
        self.is_first_segment && self.is_last_segment && self.span_days() == 1
    }

    pub fn covers_day(&self, day: u8) -> bool {
        self.start_day_in_week <= day && day <= self.end_day_in_week
    }

    /// Inclusive day ranges overlap; touching ranges (2 and 3) do not
    pub fn days_overlap(&self, other: &Segment) -> bool {
        self.start_day_in_week <= other.end_day_in_week
            && other.start_day_in_week <= self.end_day_in_week
    }
}

/// Row (lane) assigned to a segment inside its week strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAssignment {
    pub segment: Segment,
    pub row: usize,
}

/// Visible/hidden split for a day whose events do not all fit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowEntry {
    /// 0..=6
    pub day: u8,
    /// Ordered by row
    pub visible_events: Vec<EventId>,
    /// Ordered by row
    pub hidden_events: Vec<EventId>,
    pub hidden_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_span_and_single_day() {
        let single = Segment::new(EventId(1), 0, 3, 3, true, true);
        assert_eq!(single.span_days(), 1);
        assert!(single.is_single_day());

        let continued = Segment::new(EventId(2), 0, 3, 3, false, true);
        assert!(!continued.is_single_day());

        let wide = Segment::new(EventId(3), 0, 1, 5, true, false);
        assert_eq!(wide.span_days(), 5);
        assert!(wide.covers_day(1));
        assert!(wide.covers_day(5));
        assert!(!wide.covers_day(6));
    }

    #[test]
    fn test_segment_new_normalises_range() {
        let seg = Segment::new(EventId(1), 0, 9, 2, true, true);
        assert_eq!(seg.start_day_in_week, 6);
        assert_eq!(seg.end_day_in_week, 6);
    }

    #[test]
    fn test_touching_day_ranges_do_not_overlap() {
        let a = Segment::new(EventId(1), 0, 0, 2, true, true);
        let b = Segment::new(EventId(2), 0, 3, 4, true, true);
        let c = Segment::new(EventId(3), 0, 2, 3, true, true);
        assert!(!a.days_overlap(&b));
        assert!(a.days_overlap(&c));
        assert!(b.days_overlap(&c));
    }
}
