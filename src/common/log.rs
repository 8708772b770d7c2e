//! Logging helpers
//!
//! The pipeline only talks to the `log` facade; this module wires the
//! `env_logger` sink for binaries and tests.

/// Initialize the logging system
///
/// `RUST_LOG` wins over `level` when it is set. Calling this more than once
/// is harmless; later calls are ignored.
///
/// # Parameters
///
/// * `level` - Default log filter (error, warn, info, debug, trace)
pub fn init_logger(level: &str) {
    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice() {
        // The global logger can only be installed once; the second call must not panic
        init_logger("debug");
        init_logger("info");
    }
}
