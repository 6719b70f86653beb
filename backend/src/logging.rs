use env_logger::{Builder, Env};

/// Install the `env_logger` backend for the `log` macros.
///
/// `RUST_LOG` wins over `default_level` when set. Returns false if a logger
/// was already installed, so calling this more than once is harmless.
pub fn init_logging(default_level: &str) -> bool {
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
