//! Error definitions shared across library modules.
//!
//! Every variant describes a broken caller contract: the engine itself has no
//! recoverable runtime failures. Cancelling a timer that is not running is
//! defined behavior and therefore not an error.
use crate::core::Tick;
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Rejected timer operations.
pub enum TimerError {
    /// The handle does not name a timer slot of this queue.
    #[error("Invalid timer handle: {index}")]
    InvalidHandle { index: usize },

    /// The timer is in the wrong state for the operation: started while
    /// already armed, or used while uninitialised/terminated.
    #[error("Invalid timer state")]
    InvalidState,

    /// A timer must be armed for at least two ticks.
    #[error("Tick count out of range: {ticks}")]
    OutOfRange { ticks: Tick },

    /// Every timer slot of the queue is already in use.
    #[error("Timer pool exhausted")]
    PoolExhausted,

    /// The queue is already borrowed by the caller: timer callbacks must use
    /// the queue reference they receive instead of the locking entry points.
    #[error("Queue already in use (reentrant call)")]
    Reentrant,
}

#[derive(Error, Debug)]
/// Errors raised while wiring the hardware tick source.
pub enum ModuleInitError<E: core::fmt::Debug> {
    /// The tick source refused its configuration.
    #[error("Tick source error: {0:?}")]
    TickSource(E),

    /// The queue could not be reset.
    #[error(transparent)]
    Timer(#[from] TimerError),
}
