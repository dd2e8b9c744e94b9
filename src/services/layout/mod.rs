//! Layout geometry entry point.
//! Pure functions run on every layout pass: column placement for day/week
//! time grids and row packing for month/week strips.

pub mod columns;
pub mod day;
pub mod rows;
pub mod segments;

pub use columns::OverlapColumnAssigner;
pub use rows::{WeekLayout, WeekRowAssigner};
