// Test fixtures - reusable test data
// Provides consistent events and grids across the integration tests

#![allow(dead_code)]

use std::rc::Rc;

use calendar_layout::models::event::{EventId, TimedEvent};
use calendar_layout::models::geometry::Point;
use calendar_layout::services::drag::MonthGridLayout;
use chrono::{NaiveDate, NaiveDateTime};

pub const DAY_WIDTH: f32 = 100.0;
pub const SPACING: f32 = 0.0;
pub const ROW_HEIGHT: f32 = 100.0;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Wednesday, Jan 15 2025
    pub fn jan_15_2025() -> NaiveDate {
        ymd(2025, 1, 15)
    }

    /// First cell of the January 2025 month grid (Sunday)
    pub fn january_grid_start() -> NaiveDate {
        ymd(2024, 12, 29)
    }

    /// Jan 15 2025 at the given time
    pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
        jan_15_2025().and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// A timed event on Jan 15 2025
    pub fn timed(id: i64, start: (u32, u32), end: (u32, u32)) -> TimedEvent {
        TimedEvent::new(
            EventId(id),
            dates::at(start.0, start.1),
            dates::at(end.0, end.1),
        )
    }

    /// An all-day event covering `from..=to`
    pub fn all_day_span(id: i64, from: NaiveDate, to: NaiveDate) -> TimedEvent {
        TimedEvent::all_day(
            EventId(id),
            from.and_hms_opt(0, 0, 0).unwrap(),
            to.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap(),
        )
    }
}

/// The January 2025 month grid: five rows of 7 x 100px cells
pub fn january_grid() -> Rc<MonthGridLayout> {
    Rc::new(MonthGridLayout::uniform(
        dates::january_grid_start(),
        5,
        Point::new(0.0, 0.0),
        7.0 * DAY_WIDTH,
        ROW_HEIGHT,
    ))
}
