//! `vtimer` library: software timers for `no_std` systems. Any number of
//! application timers are multiplexed onto a single periodic tick interrupt
//! through a delta queue, with O(1) work per tick whatever the number of
//! armed timers.
//!
//! The crate exposes the time base (ticks and conversions), the lock-free
//! delta queue, the interrupt-safe front end, and the traits the platform
//! implements to feed it ticks.
#![no_std]
//==================================================================================
/// Tick type, configured tick frequency and time conversions.
pub mod core;
/// Caller contract violations reported by the engine.
pub mod error;
/// Delta queue of armed timers (lock-free inner operations).
pub mod queue;
/// Critical-section front end shared with the tick interrupt.
pub mod service;
/// Collaborator traits: hardware tick source and asynchronous tick pacing.
pub mod traits;
//==================================================================================
