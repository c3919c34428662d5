//! Time base shared by the queue and its callers: the tick type, the host tick
//! frequency baked in by `build.rs`, and the millisecond to tick conversion.

include!(concat!(env!("OUT_DIR"), "/vtimer_config.rs"));

/// Unit of time of the engine: one period of the hardware tick interrupt.
pub type Tick = u32;

/// Delta carried by the sentinel. It is never decremented, so the insertion
/// walk always stops on it and `evaluate` never expires it.
pub const SENTINEL_TICKS: Tick = Tick::MAX;

/// Smallest tick count accepted by `start`.
///
/// A timer armed for one tick could fire on the very next interrupt, which may
/// already be pending, so its real duration would lie anywhere in `0..=1` periods.
pub const MIN_START_TICKS: Tick = 2;

/// Convert a duration in milliseconds into ticks.
///
/// `ticks = time_ms * TICK_FREQUENCY_HZ / 1000`, rounded down and saturated to
/// [`Tick::MAX`].
///
/// ```rust,ignore
/// use vtimer::core::time_to_tick_ms;
///
/// // With a 1 kHz tick source.
/// assert_eq!(time_to_tick_ms(250), 250);
/// ```
#[inline]
pub const fn time_to_tick_ms(time_ms: u32) -> Tick {
    ms_to_ticks_at(time_ms as u64, TICK_FREQUENCY_HZ)
}

/// Convert an [`embassy_time::Duration`] into ticks of the configured tick source.
#[inline]
pub fn duration_to_ticks(duration: embassy_time::Duration) -> Tick {
    ms_to_ticks_at(duration.as_millis(), TICK_FREQUENCY_HZ)
}

/// Same conversion for an arbitrary frequency.
#[inline]
pub const fn ms_to_ticks_at(time_ms: u64, tick_frequency_hz: u32) -> Tick {
    let ticks = time_ms.saturating_mul(tick_frequency_hz as u64) / 1000;
    if ticks > Tick::MAX as u64 {
        Tick::MAX
    } else {
        ticks as Tick
    }
}
