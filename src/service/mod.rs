//! Interrupt-safe front end of the delta queue.
//!
//! [`VirtualTimers`] owns a [`TimerQueue`] behind an
//! [`embassy_sync::blocking_mutex::Mutex`]. With
//! [`CriticalSectionRawMutex`](embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex)
//! every foreground call runs with the tick interrupt masked, so it can never
//! observe (or be preempted in) a half-spliced list. The tick interrupt enters
//! through [`VirtualTimers::evaluate`]; timer callbacks then receive the
//! queue itself and use its lock-free methods.
//!
//! No allocation is performed and the object can live in a `static`:
//!
//! ```rust,ignore
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use vtimer::service::VirtualTimers;
//!
//! static TIMERS: VirtualTimers<CriticalSectionRawMutex, u32, 16> = VirtualTimers::new();
//!
//! #[interrupt]
//! fn SysTick() {
//!     let _ = TIMERS.evaluate();
//! }
//! ```

use core::cell::RefCell;
use core::future::Future;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use futures_util::{future::select, future::Either, pin_mut};

use crate::core::{Tick, TICK_FREQUENCY_HZ};
use crate::error::{ModuleInitError, TimerError};
use crate::queue::{TimerFn, TimerId, TimerQueue};
use crate::traits::{tick_source::TickSource, tick_wait::TickWait};

/// Timer queue shared between foreground code and the tick interrupt.
pub struct VirtualTimers<R: RawMutex, A, const N: usize> {
    queue: Mutex<R, RefCell<TimerQueue<A, N>>>,
}

impl<R: RawMutex, A, const N: usize> Default for VirtualTimers<R, A, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RawMutex, A, const N: usize> VirtualTimers<R, A, N> {
    /// Empty queue; usable in `static` items.
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(TimerQueue::new())),
        }
    }

    /// Reset the queue and bring up the tick source.
    ///
    /// Called once at startup, before the tick interrupt is unmasked. Timers
    /// handed out earlier stay allocated but are disarmed.
    pub fn module_init<S: TickSource>(
        &self,
        source: &mut S,
    ) -> Result<(), ModuleInitError<S::Error>> {
        self.lock(|queue| queue.clear())?;

        source
            .init(TICK_FREQUENCY_HZ)
            .map_err(ModuleInitError::TickSource)?;
        source.enable().map_err(ModuleInitError::TickSource)?;
        source.enable_isr().map_err(ModuleInitError::TickSource)?;

        #[cfg(feature = "defmt")]
        defmt::info!("vtimer: tick source running at {} Hz", TICK_FREQUENCY_HZ);

        Ok(())
    }

    /// Run `f` on the queue inside one critical section.
    ///
    /// Lets a caller compose several lock-free operations atomically, for
    /// instance cancelling one timer and starting another.
    pub fn lock<U>(&self, f: impl FnOnce(&mut TimerQueue<A, N>) -> U) -> Result<U, TimerError> {
        self.queue.lock(|cell| match cell.try_borrow_mut() {
            Ok(mut queue) => Ok(f(&mut queue)),
            Err(_) => Err(TimerError::Reentrant),
        })
    }

    /// Take a timer from the pool, in the inert state.
    pub fn init(&self) -> Result<TimerId, TimerError> {
        self.lock(|queue| queue.init())?
    }

    /// Cancel `timer` if it runs and give it back to the pool.
    pub fn term(&self, timer: TimerId) -> Result<(), TimerError> {
        self.lock(|queue| queue.term(timer))?
    }

    /// Arm `timer` for `ticks` ticks. See [`TimerQueue::start`].
    pub fn start(
        &self,
        timer: TimerId,
        ticks: Tick,
        callback: TimerFn<A, N>,
        arg: A,
    ) -> Result<(), TimerError> {
        self.lock(|queue| queue.start(timer, ticks, callback, arg))?
    }

    /// Disarm `timer`; does nothing when it is not running.
    pub fn cancel(&self, timer: TimerId) -> Result<(), TimerError> {
        self.lock(|queue| queue.cancel(timer))?
    }

    /// Whether `timer` is currently armed.
    pub fn is_running(&self, timer: TimerId) -> Result<bool, TimerError> {
        self.lock(|queue| queue.is_running(timer))
    }

    /// Ticks left before `timer` fires, 0 when it is not armed.
    pub fn remaining(&self, timer: TimerId) -> Result<Tick, TimerError> {
        self.lock(|queue| queue.remaining(timer))
    }

    /// Ticks until the next expiry, `None` when nothing is armed.
    pub fn next_expiry(&self) -> Result<Option<Tick>, TimerError> {
        self.lock(|queue| queue.next_expiry())
    }

    /// Tick interrupt entry point: advance time by one tick.
    ///
    /// Returns the number of callbacks fired.
    pub fn evaluate(&self) -> Result<usize, TimerError> {
        self.lock(|queue| queue.evaluate())
    }

    /// Drive the queue from an executor: evaluate once per `ticker` period
    /// until `shutdown` completes, then return its output.
    pub async fn run<T: TickWait, F: Future>(&self, ticker: &mut T, shutdown: F) -> F::Output {
        pin_mut!(shutdown);
        loop {
            let tick = ticker.wait_tick();
            pin_mut!(tick);
            match select(tick, shutdown.as_mut()).await {
                Either::Left(((), _)) => {
                    if let Err(_err) = self.evaluate() {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("vtimer: tick skipped ({})", _err);
                    }
                }
                Either::Right((output, _)) => return output,
            }
        }
    }
}
