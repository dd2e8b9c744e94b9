//! Row packing for multi-day segments inside one week strip, plus the
//! per-day "+N more" overflow summary.

use std::collections::BTreeMap;

use crate::models::event::EventId;
use crate::models::layout::{OverflowEntry, RowAssignment, Segment, DAYS_PER_WEEK};

pub struct WeekRowAssigner;

impl WeekRowAssigner {
    /// First-fit row packing.
    ///
    /// Segments are placed in input order; each takes the lowest row whose
    /// placed day ranges it does not overlap (touching ranges may share a
    /// row). Output order matches input order. Callers wanting the usual
    /// visual ordering should run [`super::segments::sort_for_packing`] first.
    pub fn assign_rows(segments: &[Segment]) -> Vec<RowAssignment> {
        let mut occupancy: Vec<Vec<(u8, u8)>> = Vec::new();

        segments
            .iter()
            .map(|segment| {
                let range = (segment.start_day_in_week, segment.end_day_in_week);
                let free_row = occupancy.iter().position(|placed| {
                    placed
                        .iter()
                        .all(|&(start, end)| range.1 < start || end < range.0)
                });

                let row = match free_row {
                    Some(row) => {
                        occupancy[row].push(range);
                        row
                    }
                    None => {
                        occupancy.push(vec![range]);
                        occupancy.len() - 1
                    }
                };

                RowAssignment {
                    segment: *segment,
                    row,
                }
            })
            .collect()
    }

    /// Per-day visible/hidden split.
    ///
    /// Only days with at least one hidden event are present in the result.
    /// A multi-day segment is counted independently on every day it covers.
    pub fn calculate_overflow(
        assignments: &[RowAssignment],
        max_visible_rows: usize,
    ) -> BTreeMap<u8, OverflowEntry> {
        let mut overflow = BTreeMap::new();

        for day in 0..DAYS_PER_WEEK {
            let mut covering: Vec<(usize, EventId)> = assignments
                .iter()
                .filter(|assignment| assignment.segment.covers_day(day))
                .map(|assignment| (assignment.row, assignment.segment.event_id))
                .collect();

            if covering.len() <= max_visible_rows {
                continue;
            }

            // Stable: same-row entries keep input order
            covering.sort_by_key(|&(row, _)| row);
            let hidden_events: Vec<EventId> = covering[max_visible_rows..]
                .iter()
                .map(|&(_, id)| id)
                .collect();
            let visible_events: Vec<EventId> = covering[..max_visible_rows]
                .iter()
                .map(|&(_, id)| id)
                .collect();

            overflow.insert(
                day,
                OverflowEntry {
                    day,
                    hidden_count: hidden_events.len(),
                    visible_events,
                    hidden_events,
                },
            );
        }

        overflow
    }

    /// Number of rows used by a set of assignments
    pub fn row_count(assignments: &[RowAssignment]) -> usize {
        assignments
            .iter()
            .map(|assignment| assignment.row + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Packed layout of one week strip
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub assignments: Vec<RowAssignment>,
    pub overflow: BTreeMap<u8, OverflowEntry>,
    pub row_count: usize,
}

impl WeekLayout {
    pub fn compute(segments: &[Segment], max_visible_rows: usize) -> Self {
        let assignments = WeekRowAssigner::assign_rows(segments);
        let overflow = WeekRowAssigner::calculate_overflow(&assignments, max_visible_rows);
        let row_count = WeekRowAssigner::row_count(&assignments);
        if !overflow.is_empty() {
            log::debug!(
                "week layout: {} segments in {} rows, {} days overflowing",
                segments.len(),
                row_count,
                overflow.len()
            );
        }
        Self {
            assignments,
            overflow,
            row_count,
        }
    }

    /// Assignments drawn in the strip (row below the visible limit)
    pub fn visible(&self, max_visible_rows: usize) -> impl Iterator<Item = &RowAssignment> {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.row < max_visible_rows)
    }
}
