// Drag module
// Observable state of an in-progress drag-to-move gesture

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::event::TimedEvent;
use crate::models::geometry::{Point, Rect};

/// One day cell highlighted as part of a proposed drop span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightCellInfo {
    pub date: NaiveDate,
    /// 0..=6 within its week row
    pub cell_index: usize,
    pub week_row_index: usize,
    pub bounds: Rect,
    pub is_first: bool,
    pub is_last: bool,
}

/// Which side of the calendar the pointer is dwelling against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSide {
    Left,
    Right,
}

impl EdgeSide {
    pub fn from_is_left(is_left_edge: bool) -> Self {
        if is_left_edge {
            EdgeSide::Left
        } else {
            EdgeSide::Right
        }
    }
}

/// Full drag state. Empty (`Default`) while no drag is active.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DragState {
    pub is_dragging: bool,
    pub dragged_event: Option<TimedEvent>,
    pub source_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub is_valid_target: bool,
    pub drag_position: Option<Point>,
    pub highlighted_cells: Vec<HighlightCellInfo>,
    pub proposed_start_date: Option<NaiveDate>,
    pub proposed_end_date: Option<NaiveDate>,
    pub is_proposed_drop_valid: bool,
}

impl DragState {
    /// State right after a drag begins on `source_date`
    pub fn started(event: TimedEvent, source_date: NaiveDate) -> Self {
        Self {
            is_dragging: true,
            dragged_event: Some(event),
            source_date: Some(source_date),
            target_date: Some(source_date),
            is_valid_target: true,
            ..Self::default()
        }
    }

    pub fn has_proposal(&self) -> bool {
        !self.highlighted_cells.is_empty()
            || self.proposed_start_date.is_some()
            || self.proposed_end_date.is_some()
    }

    pub(crate) fn clear_proposal(&mut self) {
        self.highlighted_cells.clear();
        self.proposed_start_date = None;
        self.proposed_end_date = None;
        self.is_proposed_drop_valid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventId;

    #[test]
    fn test_started_state() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let event = TimedEvent::new(
            EventId(1),
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(10, 0, 0).unwrap(),
        );
        let state = DragState::started(event, day);
        assert!(state.is_dragging);
        assert!(state.is_valid_target);
        assert_eq!(state.target_date, Some(day));
        assert!(!state.has_proposal());
    }

    #[test]
    fn test_default_is_idle() {
        let state = DragState::default();
        assert!(!state.is_dragging);
        assert!(state.dragged_event.is_none());
    }

    #[test]
    fn test_edge_side() {
        assert_eq!(EdgeSide::from_is_left(true), EdgeSide::Left);
        assert_eq!(EdgeSide::from_is_left(false), EdgeSide::Right);
    }
}
