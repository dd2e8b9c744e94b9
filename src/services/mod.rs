// Service module exports

pub mod drag;
pub mod layout;
pub mod settings;
