//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace, LevelFilter};

/// Initialize the logging system (honours `RUST_LOG`)
pub fn init() {
    env_logger::init();
}

/// Initialize logging at `level`, still letting `RUST_LOG` override it
pub fn init_with_level(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Initialize logging for tests; safe to call repeatedly
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
