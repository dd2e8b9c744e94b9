//! Read-only loading of the host's layout tuning file (`layout.toml`).

mod service;

pub use service::SettingsService;
