//! Logger setup for the binaries and the wasm module.
//!
//! The library only emits through the `log` macros: `trace!` for every
//! placement decision in the solver, `debug!` per attempt, `info!` for the
//! finished puzzle and `warn!` when generation gives up. Nothing is printed
//! until a front end calls [`init_logger`].

use log::LevelFilter;

/// Environment variable that turns on debug output in the native binaries.
pub const DEBUG_ENV: &str = "QAJAQ_DEBUG";

/// Interpret the value of [`DEBUG_ENV`]: unset, empty, `0`, `false` and
/// `off` mean disabled, anything else enables debug output.
#[must_use]
pub fn parse_debug_flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "off"),
    }
}

/// Read [`DEBUG_ENV`] from the process environment.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn debug_from_env() -> bool {
    parse_debug_flag(std::env::var(DEBUG_ENV).ok().as_deref())
}

fn default_level(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the logger for this target.
///
/// # Behavior
/// - **Native:** `env_logger` writing bare `LEVEL message` lines to stderr,
///   so CLI output on stdout stays clean. `RUST_LOG` wins over
///   `debug_enabled` when set (e.g. `RUST_LOG=qajaq::solver=trace` to watch
///   every placement).
/// - **WASM:** `console_log` at the chosen level; if that fails the error
///   goes to the browser console and generation carries on unlogged.
///
/// Calling it more than once is harmless; only the first call installs.
pub fn init_logger(debug_enabled: bool) {
    let level = default_level(debug_enabled);

    #[cfg(target_arch = "wasm32")]
    {
        let console_level = level.to_level().unwrap_or(log::Level::Info);
        if let Err(e) = console_log::init_with_level(console_level) {
            let msg = format!("qajaq: console logging unavailable ({e})");
            web_sys::console::error_1(&msg.into());
            return;
        }
        log::debug!("console logger at {console_level:?}");
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .parse_env("RUST_LOG");

        if builder.try_init().is_ok() {
            log::debug!("stderr logger at {level:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_debug_flag() {
        assert!(!parse_debug_flag(None));
        assert!(!parse_debug_flag(Some("")));
        assert!(!parse_debug_flag(Some("0")));
        assert!(!parse_debug_flag(Some(" FALSE ")));
        assert!(!parse_debug_flag(Some("off")));
        assert!(parse_debug_flag(Some("1")));
        assert!(parse_debug_flag(Some("yes")));
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true), LevelFilter::Debug);
        assert_eq!(default_level(false), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger(false);
        init_logger(true);
    }
}
