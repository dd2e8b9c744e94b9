// Module exports for models

pub mod drag;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod settings;
