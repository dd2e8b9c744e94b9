// Calendar Layout Library
// Overlap columns, week-row packing and drag-to-move geometry for calendar views

pub mod models;
pub mod services;
pub mod utils;

pub use services::drag::DragManager;
pub use services::layout::{OverlapColumnAssigner, WeekLayout, WeekRowAssigner};
