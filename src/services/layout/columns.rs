//! Side-by-side column placement for timed events in a single-day time grid.
//!
//! Greedy interval-graph colouring in one left-to-right sweep. Columns are
//! local to a connected overlap group: a clean gap in the timeline closes the
//! current group and the next event starts again at column 0.

use chrono::NaiveDateTime;

use crate::models::event::TimedEvent;
use crate::models::layout::ColumnAssignment;

pub struct OverlapColumnAssigner;

impl OverlapColumnAssigner {
    /// Assign a column and a column count to every event.
    ///
    /// Output order matches input order. Events with identical start times are
    /// processed in input order, so re-running on the same input always yields
    /// the same layout.
    pub fn assign(events: &[TimedEvent]) -> Vec<ColumnAssignment> {
        if events.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps input order for equal starts
        let mut order: Vec<usize> = (0..events.len()).collect();
        order.sort_by_key(|&index| events[index].interval.start);

        let mut column_of = vec![0usize; events.len()];
        let mut total_of = vec![0usize; events.len()];

        // End time of whatever currently occupies each column
        let mut columns: Vec<NaiveDateTime> = Vec::new();
        let mut group: Vec<usize> = Vec::new();
        let mut group_count = 0usize;

        for index in order {
            let interval = events[index].interval;
            let start = interval.start;

            if !group.is_empty() && columns.iter().all(|&end| end <= start) {
                close_group(&mut group, columns.len(), &mut total_of);
                columns.clear();
                group_count += 1;
            }

            let column = match columns.iter().position(|&end| end <= start) {
                Some(free) => {
                    columns[free] = interval.effective_end();
                    free
                }
                None => {
                    columns.push(interval.effective_end());
                    columns.len() - 1
                }
            };

            column_of[index] = column;
            group.push(index);
        }

        close_group(&mut group, columns.len(), &mut total_of);
        group_count += 1;

        log::trace!(
            "assigned columns for {} events in {} overlap groups",
            events.len(),
            group_count
        );

        events
            .iter()
            .enumerate()
            .map(|(index, event)| ColumnAssignment {
                event_id: event.id,
                column_index: column_of[index],
                total_columns: total_of[index],
            })
            .collect()
    }
}

fn close_group(group: &mut Vec<usize>, width: usize, total_of: &mut [usize]) {
    for index in group.drain(..) {
        total_of[index] = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventId;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn event(id: i64, start: (u32, u32), end: (u32, u32)) -> TimedEvent {
        TimedEvent::new(EventId(id), at(start.0, start.1), at(end.0, end.1))
    }

    fn columns(result: &[ColumnAssignment]) -> Vec<(usize, usize)> {
        result
            .iter()
            .map(|a| (a.column_index, a.total_columns))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(OverlapColumnAssigner::assign(&[]).is_empty());
    }

    #[test]
    fn test_single_event() {
        let result = OverlapColumnAssigner::assign(&[event(1, (9, 0), (10, 0))]);
        assert_eq!(columns(&result), vec![(0, 1)]);
        assert_eq!(result[0].event_id, EventId(1));
    }

    #[test]
    fn test_partial_overlap_reuses_freed_column() {
        let events = [
            event(1, (9, 0), (11, 0)),
            event(2, (9, 30), (10, 30)),
            event(3, (10, 15), (11, 0)),
        ];
        let result = OverlapColumnAssigner::assign(&events);
        // Event 3 overlaps both others, so it needs a third column: 9:00-11:00
        // still holds column 0 and 9:30-10:30 still holds column 1 at 10:15.
        assert_eq!(columns(&result), vec![(0, 3), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_touching_events_share_column() {
        let events = [event(1, (9, 0), (10, 0)), event(2, (10, 0), (11, 0))];
        let result = OverlapColumnAssigner::assign(&events);
        assert_eq!(columns(&result), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_identical_intervals_get_distinct_columns() {
        let events: Vec<_> = (0..4).map(|id| event(id, (9, 0), (10, 0))).collect();
        let result = OverlapColumnAssigner::assign(&events);
        assert_eq!(columns(&result), vec![(0, 4), (1, 4), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_output_preserves_input_order() {
        let events = [
            event(1, (14, 0), (15, 0)),
            event(2, (9, 0), (10, 0)),
            event(3, (9, 30), (10, 30)),
        ];
        let result = OverlapColumnAssigner::assign(&events);
        let ids: Vec<_> = result.iter().map(|a| a.event_id).collect();
        assert_eq!(ids, vec![EventId(1), EventId(2), EventId(3)]);
        assert_eq!(columns(&result), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_groups_are_independent() {
        // A wide morning cluster must not widen a lone afternoon event
        let events = [
            event(1, (9, 0), (10, 0)),
            event(2, (9, 0), (10, 0)),
            event(3, (9, 0), (10, 0)),
            event(4, (13, 0), (14, 0)),
        ];
        let result = OverlapColumnAssigner::assign(&events);
        assert_eq!(result[3].column_index, 0);
        assert_eq!(result[3].total_columns, 1);
        assert_eq!(result[0].total_columns, 3);
    }

    #[test]
    fn test_chain_keeps_group_width_at_peak() {
        // 9-11 overlaps 10-12 which overlaps 11:30-13; never more than two at once
        let events = [
            event(1, (9, 0), (11, 0)),
            event(2, (10, 0), (12, 0)),
            event(3, (11, 30), (13, 0)),
        ];
        let result = OverlapColumnAssigner::assign(&events);
        assert_eq!(columns(&result), vec![(0, 2), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_malformed_interval_behaves_as_zero_width() {
        let events = [event(1, (9, 0), (10, 0)), event(2, (10, 0), (8, 0))];
        let result = OverlapColumnAssigner::assign(&events);
        assert_eq!(columns(&result), vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_rerun_is_stable() {
        let events = [
            event(1, (9, 0), (10, 0)),
            event(2, (9, 0), (9, 30)),
            event(3, (9, 15), (11, 0)),
            event(4, (9, 0), (12, 0)),
        ];
        let first = OverlapColumnAssigner::assign(&events);
        let second = OverlapColumnAssigner::assign(&events);
        assert_eq!(first, second);
    }
}
