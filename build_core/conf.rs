//! Paths and constants used during build-time configuration.
//==================================================================================CONF
/// Default configuration shipped with the crate.
pub(crate) const CONFIG_PATH: &str = "build_core/var/vtimer_config.json";
/// Generated configuration file name (written to `OUT_DIR`).
pub(crate) const OUT_DIR_CONFIG_FILE_NAME: &str = "vtimer_config.rs";
/// Environment variable pointing to an alternate JSON configuration.
pub(crate) const CONFIG_PATH_ENV: &str = "VTIMER_CONFIG_PATH";
/// Environment variable overriding the tick frequency alone.
pub(crate) const TICK_FREQUENCY_ENV: &str = "VTIMER_TICK_FREQUENCY_HZ";
/// Accepted tick frequency range (Hz).
pub(crate) const MIN_TICK_FREQUENCY_HZ: u32 = 1;
pub(crate) const MAX_TICK_FREQUENCY_HZ: u32 = 1_000_000;
