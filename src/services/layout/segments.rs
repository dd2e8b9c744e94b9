//! Splitting events into per-week segments for month and week strips.

use chrono::{NaiveDate, NaiveTime};

use crate::models::event::TimedEvent;
use crate::models::layout::{Segment, DAYS_PER_WEEK};
use crate::utils::date::{add_days, day_delta};

/// First and last calendar day an event occupies.
///
/// An end exactly at midnight is exclusive, so a 2025-01-15 00:00 to
/// 2025-01-16 00:00 event occupies only the 15th. Malformed intervals occupy
/// their start day.
pub fn event_day_range(event: &TimedEvent) -> (NaiveDate, NaiveDate) {
    let first = event.interval.start.date();
    let end = event.interval.effective_end();
    let last = if end > event.interval.start && end.time() == NaiveTime::MIN {
        add_days(end.date(), -1)
    } else {
        end.date()
    };
    (first, last.max(first))
}

/// Segments for the seven days starting at `week_start`, in input order.
pub fn segments_for_week(
    events: &[TimedEvent],
    week_start: NaiveDate,
    week_row_index: usize,
) -> Vec<Segment> {
    let week_end = add_days(week_start, i64::from(DAYS_PER_WEEK) - 1);

    events
        .iter()
        .filter_map(|event| {
            let (first, last) = event_day_range(event);
            if last < week_start || first > week_end {
                return None;
            }

            let start_day = day_delta(week_start, first.max(week_start)) as u8;
            let end_day = day_delta(week_start, last.min(week_end)) as u8;

            Some(Segment::new(
                event.id,
                week_row_index,
                start_day,
                end_day,
                first >= week_start,
                last <= week_end,
            ))
        })
        .collect()
}

/// Sort by start day, then longer spans first, then event id.
///
/// This is the packing order month and week strips use; the sort is stable so
/// equal keys keep their input order.
pub fn sort_for_packing(segments: &mut [Segment]) {
    segments.sort_by(|a, b| {
        a.start_day_in_week
            .cmp(&b.start_day_in_week)
            .then_with(|| b.span_days().cmp(&a.span_days()))
            .then_with(|| a.event_id.cmp(&b.event_id))
    });
}

/// Packing-ordered segments for every row of a grid whose first visible day
/// is `first_visible_day`.
pub fn segments_for_grid(
    events: &[TimedEvent],
    first_visible_day: NaiveDate,
    week_rows: usize,
) -> Vec<Vec<Segment>> {
    (0..week_rows)
        .map(|row| {
            let week_start = add_days(first_visible_day, (row as i64) * i64::from(DAYS_PER_WEEK));
            let mut segments = segments_for_week(events, week_start, row);
            sort_for_packing(&mut segments);
            segments
        })
        .collect()
}
