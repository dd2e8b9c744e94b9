//! Logging bootstrap for hosts embedding the layout engine.
//!
//! The library itself only talks to the `log` facade. Hosts that do not set up
//! their own logger can call [`init`] once at startup; `RUST_LOG` overrides the
//! default `info` filter.

use env_logger::Env;

/// Install `env_logger` as the global logger.
///
/// Returns `false` when a logger was already installed (by an earlier call or
/// by the host), which is not an error.
pub fn init() -> bool {
    init_with_default_filter("info")
}

pub fn init_with_default_filter(filter: &str) -> bool {
    let installed = env_logger::Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("calendar-layout logging initialised (default filter `{}`)", filter);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let _ = init();
        assert!(!init());
    }
}
