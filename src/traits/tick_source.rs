//! Hardware tick source: the periodic interrupt driving the queue.
//!
//! The engine never registers interrupt handlers itself. The platform wires its
//! tick interrupt to [`VirtualTimers::evaluate`](crate::service::VirtualTimers::evaluate)
//! and exposes the timer peripheral through this trait so that
//! [`VirtualTimers::module_init`](crate::service::VirtualTimers::module_init)
//! can bring it up.

/// Contract for the periodic tick peripheral.
pub trait TickSource {
    type Error: core::fmt::Debug;

    /// Program the peripheral to interrupt `frequency_hz` times per second.
    fn init(&mut self, frequency_hz: u32) -> Result<(), Self::Error>;

    /// Start counting.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Unmask the tick interrupt. From now on `evaluate` runs once per tick.
    fn enable_isr(&mut self) -> Result<(), Self::Error>;
}
