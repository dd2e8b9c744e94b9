//! Pointer-to-cell hit testing for drag-to-move over a month/week grid.
//!
//! [`resolve_drop_target`] is pure: it maps one pointer sample plus the grid
//! geometry of the current rendering pass to a proposed drop span. The drag
//! manager debounces calls into it and owns the resulting state.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::drag::HighlightCellInfo;
use crate::models::geometry::{Point, Rect};
use crate::models::layout::DAYS_PER_WEEK;
use crate::utils::date::add_days;

const WEEK: usize = DAYS_PER_WEEK as usize;

/// Decides whether a proposed `(start, end)` drop span is allowed
pub type DropValidator = Rc<dyn Fn(NaiveDate, NaiveDate) -> bool>;

/// Per-row geometry lookups for the rendered grid
pub trait WeekGrid {
    /// Pixel bounds of week row `row`, if it is rendered
    fn week_row_bounds(&self, row: usize) -> Option<Rect>;
    /// The seven dates shown in week row `row`, if it is rendered
    fn week_dates(&self, row: usize) -> Option<Vec<NaiveDate>>;
}

/// Adapts a pair of closures to [`WeekGrid`]
pub struct GridFns<B, D> {
    pub bounds: B,
    pub dates: D,
}

impl<B, D> WeekGrid for GridFns<B, D>
where
    B: Fn(usize) -> Option<Rect>,
    D: Fn(usize) -> Option<Vec<NaiveDate>>,
{
    fn week_row_bounds(&self, row: usize) -> Option<Rect> {
        (self.bounds)(row)
    }

    fn week_dates(&self, row: usize) -> Option<Vec<NaiveDate>> {
        (self.dates)(row)
    }
}

/// One rendered week row
#[derive(Debug, Clone, PartialEq)]
pub struct WeekRowLayout {
    pub bounds: Rect,
    pub dates: Vec<NaiveDate>,
}

/// Stock [`WeekGrid`]: the rows of a month (or multi-week) grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthGridLayout {
    pub rows: Vec<WeekRowLayout>,
}

impl MonthGridLayout {
    pub fn new(rows: Vec<WeekRowLayout>) -> Self {
        Self { rows }
    }

    /// Equal-height rows stacked from `origin`, dates running from
    /// `first_visible_day`.
    pub fn uniform(
        first_visible_day: NaiveDate,
        week_rows: usize,
        origin: Point,
        row_width: f32,
        row_height: f32,
    ) -> Self {
        let rows = (0..week_rows)
            .map(|row| {
                let week_start = add_days(first_visible_day, (row * WEEK) as i64);
                WeekRowLayout {
                    bounds: Rect::new(
                        origin.x,
                        origin.y + row as f32 * row_height,
                        row_width,
                        row_height,
                    ),
                    dates: (0..WEEK).map(|day| add_days(week_start, day as i64)).collect(),
                }
            })
            .collect();
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Smallest rectangle containing every row
    pub fn calendar_bounds(&self) -> Rect {
        let Some(first) = self.rows.first() else {
            return Rect::default();
        };
        let (mut left, mut top) = (first.bounds.left, first.bounds.top);
        let (mut right, mut bottom) = (first.bounds.right(), first.bounds.bottom());
        for row in &self.rows[1..] {
            left = left.min(row.bounds.left);
            top = top.min(row.bounds.top);
            right = right.max(row.bounds.right());
            bottom = bottom.max(row.bounds.bottom());
        }
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Build a move request for a pointer currently over week row `week_row_index`.
    #[allow(clippy::too_many_arguments)]
    pub fn drag_request(
        self: &Rc<Self>,
        week_row_index: usize,
        global_position: Point,
        day_width: f32,
        horizontal_spacing: f32,
        grab_offset_x: f32,
        event_duration_days: u32,
    ) -> Option<DragMoveRequest> {
        let row = self.rows.get(week_row_index)?;
        Some(DragMoveRequest {
            global_position,
            day_width,
            horizontal_spacing,
            grab_offset_x,
            event_duration_days,
            week_row_index,
            week_row_bounds: row.bounds,
            calendar_bounds: self.calendar_bounds(),
            week_dates: row.dates.clone(),
            total_week_rows: self.rows.len(),
            grid: Rc::clone(self) as Rc<dyn WeekGrid>,
            validator: None,
        })
    }
}

impl WeekGrid for MonthGridLayout {
    fn week_row_bounds(&self, row: usize) -> Option<Rect> {
        self.rows.get(row).map(|row| row.bounds)
    }

    fn week_dates(&self, row: usize) -> Option<Vec<NaiveDate>> {
        self.rows.get(row).map(|row| row.dates.clone())
    }
}

/// Everything one pointer sample needs to be mapped onto the grid
#[derive(Clone)]
pub struct DragMoveRequest {
    pub global_position: Point,
    /// Width of one day cell, including its share of inter-cell spacing
    pub day_width: f32,
    /// Leading horizontal offset before cell 0 of a row
    pub horizontal_spacing: f32,
    /// Pointer x offset from the dragged tile's left edge
    pub grab_offset_x: f32,
    pub event_duration_days: u32,
    /// Row the pointer was reported over
    pub week_row_index: usize,
    pub week_row_bounds: Rect,
    pub calendar_bounds: Rect,
    pub week_dates: Vec<NaiveDate>,
    pub total_week_rows: usize,
    pub grid: Rc<dyn WeekGrid>,
    pub validator: Option<DropValidator>,
}

impl DragMoveRequest {
    pub fn with_validator(mut self, validator: impl Fn(NaiveDate, NaiveDate) -> bool + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    fn row_bounds(&self, row: usize) -> Result<Rect, DropTargetError> {
        if row == self.week_row_index {
            return Ok(self.week_row_bounds);
        }
        self.grid
            .week_row_bounds(row)
            .ok_or(DropTargetError::MissingWeekRow(row))
    }

    fn row_dates(&self, row: usize) -> Result<Vec<NaiveDate>, DropTargetError> {
        let dates = if row == self.week_row_index {
            self.week_dates.clone()
        } else {
            self.grid
                .week_dates(row)
                .ok_or(DropTargetError::MissingWeekRow(row))?
        };
        if dates.len() < WEEK {
            return Err(DropTargetError::WeekDatesTooShort {
                row,
                len: dates.len(),
            });
        }
        Ok(dates)
    }
}

impl fmt::Debug for DragMoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragMoveRequest")
            .field("global_position", &self.global_position)
            .field("day_width", &self.day_width)
            .field("horizontal_spacing", &self.horizontal_spacing)
            .field("grab_offset_x", &self.grab_offset_x)
            .field("event_duration_days", &self.event_duration_days)
            .field("week_row_index", &self.week_row_index)
            .field("total_week_rows", &self.total_week_rows)
            .field("validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

/// Why a pointer sample could not be mapped onto the grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DropTargetError {
    #[error("degenerate grid geometry (day width {day_width})")]
    DegenerateGeometry { day_width: f32 },
    #[error("grid has no week rows")]
    NoWeekRows,
    #[error("week row {0} is not rendered")]
    MissingWeekRow(usize),
    #[error("week row {row} supplies {len} dates, expected 7")]
    WeekDatesTooShort { row: usize, len: usize },
}

impl DropTargetError {
    /// Caller bugs, as opposed to transient geometry (e.g. a collapsed layout)
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DropTargetError::MissingWeekRow(_) | DropTargetError::WeekDatesTooShort { .. }
        )
    }
}

/// A resolved drop span
#[derive(Debug, Clone, PartialEq)]
pub struct DropProposal {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub week_row_index: usize,
    pub cell_index: usize,
    pub highlighted_cells: Vec<HighlightCellInfo>,
}

/// Map a pointer sample to the span the dragged event would occupy.
pub fn resolve_drop_target(request: &DragMoveRequest) -> Result<DropProposal, DropTargetError> {
    let geometry_ok = request.day_width.is_finite()
        && request.day_width > 0.0
        && request.horizontal_spacing.is_finite()
        && request.grab_offset_x.is_finite()
        && request.global_position.is_finite();
    if !geometry_ok {
        return Err(DropTargetError::DegenerateGeometry {
            day_width: request.day_width,
        });
    }
    if request.total_week_rows == 0 {
        return Err(DropTargetError::NoWeekRows);
    }

    let last_row = request.total_week_rows - 1;
    let week = WEEK as i64;

    // The reported row wins while the pointer stays inside its seven cells
    let reported = request.week_row_index;
    let reported_cell = raw_cell_index(request, request.week_row_bounds.left);
    let (row, cell) = if reported <= last_row && (0..week).contains(&reported_cell) {
        (reported, reported_cell as usize)
    } else {
        let (row, bounds) = row_under_pointer(request, last_row)?;
        wrap_into_grid(row, raw_cell_index(request, bounds.left), last_row)
    };

    let bounds = request.row_bounds(row)?;
    let dates = request.row_dates(row)?;

    let duration = i64::from(request.event_duration_days.max(1));
    let start_date = dates[cell];
    let end_date = add_days(start_date, duration - 1);

    let highlighted_cells =
        build_highlight_span(request, row, cell, bounds, dates, duration, last_row);

    Ok(DropProposal {
        start_date,
        end_date,
        week_row_index: row,
        cell_index: cell,
        highlighted_cells,
    })
}

/// Cell under the dragged tile's left edge, relative to a row starting at `row_left`
fn raw_cell_index(request: &DragMoveRequest, row_left: f32) -> i64 {
    let local_x = request.global_position.x - row_left;
    let raw_cell = ((local_x - request.grab_offset_x - request.horizontal_spacing)
        / request.day_width)
        .floor();
    // Anything past a few thousand weeks is clamped below anyway
    raw_cell.clamp(-1_000_000.0, 1_000_000.0) as i64
}

/// Carry horizontal overflow into neighbouring rows, clamped to the grid
fn wrap_into_grid(row: usize, raw_cell: i64, last_row: usize) -> (usize, usize) {
    let week = WEEK as i64;
    let shifted_row = row as i64 + raw_cell.div_euclid(week);
    if shifted_row < 0 {
        (0, 0)
    } else if shifted_row > last_row as i64 {
        (last_row, WEEK - 1)
    } else {
        (shifted_row as usize, raw_cell.rem_euclid(week) as usize)
    }
}

/// Row whose vertical band holds the pointer, clamped to the grid
fn row_under_pointer(
    request: &DragMoveRequest,
    last_row: usize,
) -> Result<(usize, Rect), DropTargetError> {
    let y = request.global_position.y;

    let current = request.week_row_index.min(last_row);
    let current_bounds = request.row_bounds(current)?;
    if current_bounds.contains_y(y) {
        return Ok((current, current_bounds));
    }

    let hit = (0..=last_row).find_map(|row| {
        request
            .grid
            .week_row_bounds(row)
            .filter(|bounds| bounds.contains_y(y))
            .map(|bounds| (row, bounds))
    });
    if let Some(hit) = hit {
        return Ok(hit);
    }

    let row = if y < request.calendar_bounds.top {
        0
    } else if y >= request.calendar_bounds.bottom() {
        last_row
    } else {
        // Between rows (spacing gap): stay on the reported row
        current
    };
    Ok((row, request.row_bounds(row)?))
}

fn cell_bounds(row_bounds: Rect, horizontal_spacing: f32, day_width: f32, cell: usize) -> Rect {
    Rect::new(
        row_bounds.left + horizontal_spacing + cell as f32 * day_width,
        row_bounds.top,
        day_width,
        row_bounds.height,
    )
}

/// One highlight per day of the span, continuing onto following rows.
///
/// The span is cut off at the last rendered row; a row that cannot be looked
/// up also ends it. A cut-off span has no cell with `is_last` set: its final
/// cell continues past the grid, so renderers should leave that end open.
/// `is_first` is always set on the first cell.
fn build_highlight_span(
    request: &DragMoveRequest,
    start_row: usize,
    start_cell: usize,
    start_bounds: Rect,
    start_dates: Vec<NaiveDate>,
    duration: i64,
    last_row: usize,
) -> Vec<HighlightCellInfo> {
    let visible_days = (last_row - start_row) * WEEK + (WEEK - start_cell);
    let count = (duration as usize).min(visible_days);
    let mut cells = Vec::with_capacity(count);

    let (mut row, mut cell) = (start_row, start_cell);
    let (mut bounds, mut dates) = (start_bounds, start_dates);

    for offset in 0..count {
        if cell == WEEK {
            row += 1;
            cell = 0;
            match (request.row_bounds(row), request.row_dates(row)) {
                (Ok(next_bounds), Ok(next_dates)) => {
                    bounds = next_bounds;
                    dates = next_dates;
                }
                _ => {
                    log::trace!("highlight span stops at unrendered week row {}", row);
                    break;
                }
            }
        }

        cells.push(HighlightCellInfo {
            date: dates[cell],
            cell_index: cell,
            week_row_index: row,
            bounds: cell_bounds(bounds, request.horizontal_spacing, request.day_width, cell),
            is_first: offset == 0,
            is_last: offset as i64 == duration - 1,
        });
        cell += 1;
    }

    cells
}
