//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Builds the log filter; `RUST_LOG` wins over the verbosity flags
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Installs the global subscriber, writing to stderr
///
/// Does nothing if a subscriber is already set.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity.is_verbose())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_builds_for_every_level() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::Debug,
        ] {
            let filter = env_filter(verbosity);
            assert!(!filter.to_string().is_empty());
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Verbosity::Quiet);
        init(Verbosity::Debug);
    }
}
