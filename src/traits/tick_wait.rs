//! Asynchronous tick pacing for hosts without a dedicated tick interrupt.
//!
//! An executor task can stand in for the interrupt: it awaits one tick period
//! and evaluates the queue, see [`VirtualTimers::run`](crate::service::VirtualTimers::run).

/// Awaitable source of periodic ticks.
pub trait TickWait {
    /// Resolve at the next tick boundary.
    fn wait_tick<'a>(&'a mut self) -> impl core::future::Future<Output = ()> + 'a;
}

#[cfg(feature = "embassy-ticker")]
impl TickWait for embassy_time::Ticker {
    fn wait_tick<'a>(&'a mut self) -> impl core::future::Future<Output = ()> + 'a {
        self.next()
    }
}

/// Ticker at the configured tick frequency.
#[cfg(feature = "embassy-ticker")]
pub fn tick_ticker() -> embassy_time::Ticker {
    embassy_time::Ticker::every(embassy_time::Duration::from_hz(
        crate::core::TICK_FREQUENCY_HZ as u64,
    ))
}
