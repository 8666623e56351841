//! Tracing subscriber setup for the command-line tool
//!
//! Diagnostics go to stderr so they never mix with the rendered tree on
//! stdout. `RUST_LOG` takes precedence over the `-v` count.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level enabled by default for a given number of `-v` flags.
pub fn default_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Filter from `RUST_LOG`, or from the verbosity when it is unset or invalid.
pub fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity).as_str()))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), Level::WARN);
        assert_eq!(default_level(1), Level::INFO);
        assert_eq!(default_level(2), Level::DEBUG);
        assert_eq!(default_level(3), Level::TRACE);
        assert_eq!(default_level(200), Level::TRACE);
    }

    #[test]
    fn test_init_twice() {
        init(0);
        init(2);
        tracing::warn!("logging still works after a second init");
    }
}
