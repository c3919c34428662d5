use std::fmt::Write;

use crate::build_core::domain::TimerConfig;
use crate::build_core::errors::BuildError;

/// Render the Rust source included by `src/core.rs`.
pub(crate) fn run_config_gen(config: &TimerConfig) -> Result<String, BuildError> {
    let mut buffer = String::new();
    writeln!(buffer, "// @generated by build.rs from vtimer_config.json")?;
    writeln!(buffer)?;
    writeln!(
        buffer,
        "/// Frequency of the hardware tick interrupt (Hz), set by the host configuration."
    )?;
    writeln!(
        buffer,
        "pub const TICK_FREQUENCY_HZ: u32 = {};",
        config.tick_frequency_hz
    )?;
    Ok(buffer)
}
