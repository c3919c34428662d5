use serde::Deserialize;

use crate::build_core::conf::{MAX_TICK_FREQUENCY_HZ, MIN_TICK_FREQUENCY_HZ};
use crate::build_core::errors::BuildError;

//==================================================================================CONFIG
// Structure deserialized from `vtimer_config.json`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
/// Host-system timing configuration baked into the crate.
pub(crate) struct TimerConfig {
    /// Frequency of the hardware tick interrupt driving `evaluate`.
    pub(crate) tick_frequency_hz: u32,
}

impl TimerConfig {
    /// Replace the frequency with a textual override (environment variable).
    pub(crate) fn with_frequency_override(mut self, raw: &str) -> Result<Self, BuildError> {
        self.tick_frequency_hz =
            raw.trim()
                .parse()
                .map_err(|_| BuildError::InvalidFrequencyOverride {
                    value: raw.to_string(),
                })?;
        Ok(self)
    }

    /// Reject frequencies outside of the supported range.
    pub(crate) fn validate(self) -> Result<Self, BuildError> {
        if !(MIN_TICK_FREQUENCY_HZ..=MAX_TICK_FREQUENCY_HZ).contains(&self.tick_frequency_hz) {
            return Err(BuildError::FrequencyOutOfRange {
                value: self.tick_frequency_hz,
                min: MIN_TICK_FREQUENCY_HZ,
                max: MAX_TICK_FREQUENCY_HZ,
            });
        }
        Ok(self)
    }
}
