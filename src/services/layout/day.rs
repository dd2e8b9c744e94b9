//! Per-day clipping of timed events for single-day time grids.

use chrono::{NaiveDate, NaiveTime};

use crate::models::event::{Interval, TimedEvent};
use crate::utils::date::start_of_next_day;

/// Returns the portion of `event` that falls on `date`, or `None` if the event
/// does not touch that day.
///
/// Multi-day events are clamped to `[00:00, next 00:00)`. Zero-width events
/// are kept on the day they sit on.
pub fn clip_to_day(event: &TimedEvent, date: NaiveDate) -> Option<Interval> {
    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = start_of_next_day(date);
    let start = event.interval.start;
    let end = event.interval.effective_end();

    if start == end {
        return (start >= day_start && start < day_end).then_some(Interval::new(start, end));
    }

    if end <= day_start || start >= day_end {
        return None;
    }

    Some(Interval::new(start.max(day_start), end.min(day_end)))
}

/// Timed (non all-day) events touching `date`, clipped to it, in input order.
///
/// The result feeds [`super::columns::OverlapColumnAssigner::assign`].
pub fn events_for_day(events: &[TimedEvent], date: NaiveDate) -> Vec<TimedEvent> {
    events
        .iter()
        .filter(|event| !event.all_day)
        .filter_map(|event| {
            clip_to_day(event, date).map(|interval| TimedEvent {
                interval,
                ..*event
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventId;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overnight_event_is_clamped() {
        let event = TimedEvent::new(
            EventId(1),
            ymd(2025, 1, 15).and_hms_opt(22, 0, 0).unwrap(),
            ymd(2025, 1, 16).and_hms_opt(2, 0, 0).unwrap(),
        );

        let first = clip_to_day(&event, ymd(2025, 1, 15)).unwrap();
        assert_eq!(first.start, ymd(2025, 1, 15).and_hms_opt(22, 0, 0).unwrap());
        assert_eq!(first.end, ymd(2025, 1, 16).and_hms_opt(0, 0, 0).unwrap());

        let second = clip_to_day(&event, ymd(2025, 1, 16)).unwrap();
        assert_eq!(second.start, ymd(2025, 1, 16).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(second.end, ymd(2025, 1, 16).and_hms_opt(2, 0, 0).unwrap());

        assert!(clip_to_day(&event, ymd(2025, 1, 17)).is_none());
    }

    #[test]
    fn test_event_ending_at_midnight_does_not_leak() {
        let event = TimedEvent::new(
            EventId(1),
            ymd(2025, 1, 15).and_hms_opt(20, 0, 0).unwrap(),
            ymd(2025, 1, 16).and_hms_opt(0, 0, 0).unwrap(),
        );
        assert!(clip_to_day(&event, ymd(2025, 1, 16)).is_none());
    }

    #[test]
    fn test_zero_width_event_kept() {
        let at = ymd(2025, 1, 15).and_hms_opt(9, 0, 0).unwrap();
        let event = TimedEvent::new(EventId(1), at, at);
        assert_eq!(clip_to_day(&event, ymd(2025, 1, 15)), Some(Interval::new(at, at)));
    }

    #[test]
    fn test_events_for_day_skips_all_day() {
        let day = ymd(2025, 1, 15);
        let events = [
            TimedEvent::all_day(
                EventId(1),
                day.and_hms_opt(0, 0, 0).unwrap(),
                day.and_hms_opt(23, 59, 0).unwrap(),
            ),
            TimedEvent::new(
                EventId(2),
                day.and_hms_opt(9, 0, 0).unwrap(),
                day.and_hms_opt(10, 0, 0).unwrap(),
            ),
        ];
        let day_events = events_for_day(&events, day);
        assert_eq!(day_events.len(), 1);
        assert_eq!(day_events[0].id, EventId(2));
    }
}
