//! Logger setup for the binary

use log::LevelFilter;

/// Initialize the logger at `level`, honoring `RUST_LOG` overrides
pub fn init(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
