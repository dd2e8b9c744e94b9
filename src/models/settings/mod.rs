// Settings module
// Tunables for the layout engine, loaded from `layout.toml`

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for [`LayoutSettings`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("debounce window must be between 1 and {max} ms, got {got}")]
    DebounceOutOfRange { got: u64, max: u64 },
    #[error("edge dwell delay must be at least 1 ms")]
    EdgeDwellZero,
    #[error("first day of week must be 0 (Sunday) to 6 (Saturday), got {0}")]
    FirstDayOfWeek(u8),
}

pub const MAX_DEBOUNCE_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutSettings {
    pub drag: DragSettings,
    pub month: MonthSettings,
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.drag.validate()?;
        self.month.validate()
    }
}

/// Timer tunables for the drag engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Coalescing window for pointer moves (about one frame)
    pub debounce_ms: u64,
    /// Dwell time near a horizontal edge before paging
    pub edge_dwell_ms: u64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 16,
            edge_dwell_ms: 500,
        }
    }
}

impl DragSettings {
    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    pub fn edge_dwell(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.edge_dwell_ms)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.debounce_ms == 0 || self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(SettingsError::DebounceOutOfRange {
                got: self.debounce_ms,
                max: MAX_DEBOUNCE_MS,
            });
        }
        if self.edge_dwell_ms == 0 {
            return Err(SettingsError::EdgeDwellZero);
        }
        Ok(())
    }
}

/// Month/week grid tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthSettings {
    /// Event rows shown per week strip before collapsing into "+N more"
    pub max_visible_rows: usize,
    pub first_day_of_week: u8, // 0 = Sunday
}

impl Default for MonthSettings {
    fn default() -> Self {
        Self {
            max_visible_rows: 3,
            first_day_of_week: 0,
        }
    }
}

impl MonthSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.first_day_of_week > 6 {
            return Err(SettingsError::FirstDayOfWeek(self.first_day_of_week));
        }
        Ok(())
    }

    /// First visible day of the week row containing `date`
    pub fn week_start_for(&self, date: NaiveDate) -> NaiveDate {
        let weekday = date.weekday().num_days_from_sunday() as i64;
        let first = i64::from(self.first_day_of_week % 7);
        let back = (weekday - first).rem_euclid(7);
        date - Duration::days(back)
    }
}
