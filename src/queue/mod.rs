//! Delta queue of armed timers.
//!
//! Armed timers form a doubly linked cycle anchored at a sentinel node and
//! ordered by expiry. Each node only stores the number of ticks separating it
//! from its predecessor (or from "now" for the first timer), so advancing time
//! touches the head node alone.
//!
//! ```text
//!   sentinel ──► Y(3) ──► Z(0) ──► X(2) ──► sentinel
//!                fires    fires    fires
//!                at +3    at +3    at +5
//! ```
//!
//! Nodes live in a fixed arena owned by the queue and link to each other by
//! index. A timer whose `next` points to itself is not linked (inert).
//!
//! The methods of [`TimerQueue`] are the lock-free inner variants: they assume
//! the caller already excludes the tick interrupt. Timer callbacks receive the
//! queue itself and use them directly. Foreground code goes through
//! [`VirtualTimers`](crate::service::VirtualTimers).
pub mod signature;

#[cfg(feature = "api-validation")]
use crate::core::MIN_START_TICKS;
use crate::core::{Tick, SENTINEL_TICKS};
use crate::error::TimerError;
#[cfg(feature = "api-validation")]
use signature::Signature;
use signature::require;

//==================================================================================Types

/// Expiry callback.
///
/// Runs from the tick context once the timer has been unlinked, with the
/// queue already consistent. It may start or cancel any timer, itself included.
pub type TimerFn<A, const N: usize> = fn(&mut TimerQueue<A, N>, TimerId, A);

/// Handle naming a timer slot of a [`TimerQueue`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerId(usize);

impl TimerId {
    /// Position of the timer in the queue arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index reserved for the sentinel node.
const SENTINEL: usize = usize::MAX;

/// List membership and relative expiry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Node {
    prev: usize,
    next: usize,
    /// Ticks after the previous node expires.
    delta: Tick,
}

impl Node {
    const SENTINEL: Self = Self {
        prev: SENTINEL,
        next: SENTINEL,
        delta: SENTINEL_TICKS,
    };

    /// Detached node pointing to itself.
    const fn detached(index: usize) -> Self {
        Self {
            prev: index,
            next: index,
            delta: 0,
        }
    }
}

struct Slot<A, const N: usize> {
    node: Node,
    callback: Option<TimerFn<A, N>>,
    arg: Option<A>,
    /// Slot handed out by [`TimerQueue::init`].
    allocated: bool,
    #[cfg(feature = "api-validation")]
    signature: Signature,
}

impl<A, const N: usize> Slot<A, N> {
    const VACANT: Self = Self {
        node: Node::SENTINEL,
        callback: None,
        arg: None,
        allocated: false,
        #[cfg(feature = "api-validation")]
        signature: Signature::Uninitialized,
    };

    /// Drop the scheduling data and detach the node.
    fn make_inert(&mut self, index: usize) {
        self.node = Node::detached(index);
        self.callback = None;
        self.arg = None;
        #[cfg(feature = "api-validation")]
        {
            self.signature = Signature::Inert;
        }
    }
}

/// Fixed-capacity delta queue of up to `N` timers carrying an argument of type `A`.
pub struct TimerQueue<A, const N: usize> {
    sentinel: Node,
    slots: [Slot<A, N>; N],
    armed: usize,
}

impl<A, const N: usize> core::fmt::Debug for TimerQueue<A, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("capacity", &N)
            .field("armed", &self.armed)
            .field("next_expiry", &self.next_expiry())
            .finish()
    }
}

impl<A, const N: usize> Default for TimerQueue<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, const N: usize> TimerQueue<A, N> {
    /// Empty queue with every timer slot free.
    pub const fn new() -> Self {
        Self {
            sentinel: Node::SENTINEL,
            slots: [const { Slot::VACANT }; N],
            armed: 0,
        }
    }

    //==================================================================================Lifecycle

    /// Take a free timer slot and put it in the inert state.
    pub fn init(&mut self) -> Result<TimerId, TimerError> {
        let index = self
            .slots
            .iter()
            .position(|slot| !slot.allocated)
            .ok_or(TimerError::PoolExhausted)?;

        let slot = &mut self.slots[index];
        slot.make_inert(index);
        slot.allocated = true;

        #[cfg(feature = "defmt")]
        defmt::trace!("vtimer: init #{}", index);

        Ok(TimerId(index))
    }

    /// Cancel the timer if needed and give its slot back to the pool.
    ///
    /// The handle must not be used afterwards; with `api-validation` any later
    /// use is rejected with [`TimerError::InvalidState`] until the slot is
    /// handed out again.
    pub fn term(&mut self, timer: TimerId) -> Result<(), TimerError> {
        self.cancel(timer)?;
        self.slots[timer.0] = Slot::VACANT;

        #[cfg(feature = "defmt")]
        defmt::trace!("vtimer: term #{}", timer.0);

        Ok(())
    }

    /// Unlink every timer. All allocated timers become inert and keep their handle.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.allocated {
                slot.make_inert(index);
            }
        }
        self.sentinel = Node::SENTINEL;
        self.armed = 0;
    }

    //==================================================================================Operations

    /// Arm `timer` to call `callback(queue, timer, arg)` after `ticks` ticks.
    ///
    /// The timer must be inert and `ticks` at least [`MIN_START_TICKS`](crate::core::MIN_START_TICKS).
    /// Among timers expiring on the same tick, the one armed first fires first.
    pub fn start(
        &mut self,
        timer: TimerId,
        ticks: Tick,
        callback: TimerFn<A, N>,
        arg: A,
    ) -> Result<(), TimerError> {
        let index = self.slot_index(timer)?;
        require!(
            self.slots[index].signature == Signature::Inert,
            TimerError::InvalidState
        );
        require!(ticks >= MIN_START_TICKS, TimerError::OutOfRange { ticks });

        // Walk past every timer expiring no later than the new one.
        let mut remaining = ticks;
        let mut current = self.sentinel.next;
        while current != SENTINEL && self.node(current).delta <= remaining {
            remaining -= self.node(current).delta;
            current = self.node(current).next;
        }

        let prev = self.node(current).prev;
        self.node_mut(prev).next = index;
        self.node_mut(current).prev = index;
        if current != SENTINEL {
            self.node_mut(current).delta -= remaining;
        }

        let slot = &mut self.slots[index];
        slot.node = Node {
            prev,
            next: current,
            delta: remaining,
        };
        slot.callback = Some(callback);
        slot.arg = Some(arg);
        #[cfg(feature = "api-validation")]
        {
            slot.signature = Signature::Armed;
        }
        self.armed += 1;

        #[cfg(feature = "defmt")]
        defmt::trace!("vtimer: start #{} for {} ticks", index, ticks);

        Ok(())
    }

    /// Disarm `timer` before it expires.
    ///
    /// Cancelling a timer that is not running (never started, already fired,
    /// already cancelled) does nothing.
    pub fn cancel(&mut self, timer: TimerId) -> Result<(), TimerError> {
        let index = self.slot_index(timer)?;
        require!(
            self.slots[index].signature != Signature::Uninitialized,
            TimerError::InvalidState
        );

        if !self.is_linked(index) {
            return Ok(());
        }

        let Node { prev, next, delta } = self.slots[index].node;
        // Hand the remaining delta over so every later expiry stays put.
        if next != SENTINEL {
            let successor = self.node_mut(next);
            successor.delta = successor.delta.saturating_add(delta);
        }
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;
        self.slots[index].make_inert(index);
        self.armed -= 1;

        #[cfg(feature = "defmt")]
        defmt::trace!("vtimer: cancel #{} with {} ticks to its predecessor", index, delta);

        Ok(())
    }

    /// Whether `timer` is currently armed.
    pub fn is_running(&self, timer: TimerId) -> bool {
        timer.0 < N && self.is_linked(timer.0)
    }

    /// Ticks left before `timer` fires, or 0 when it is not armed.
    pub fn remaining(&self, timer: TimerId) -> Tick {
        if !self.is_running(timer) {
            return 0;
        }

        let mut remaining: Tick = 0;
        let mut current = timer.0;
        while current != SENTINEL {
            let node = self.node(current);
            remaining = remaining.saturating_add(node.delta);
            current = node.prev;
        }
        remaining
    }

    /// Advance time by one tick and fire every timer expiring on it.
    ///
    /// Must be called exactly once per hardware tick from the tick context.
    /// Returns the number of callbacks invoked.
    pub fn evaluate(&mut self) -> usize {
        let mut head = self.sentinel.next;
        if head == SENTINEL {
            return 0;
        }

        let node = self.node_mut(head);
        node.delta = node.delta.saturating_sub(1);

        let mut fired = 0;
        // The sentinel never reaches zero and ends the loop.
        while self.node(head).delta == 0 {
            #[cfg(feature = "api-validation")]
            debug_assert_eq!(self.slots[head].signature, Signature::Armed);

            let next = self.node(head).next;
            self.sentinel.next = next;
            self.node_mut(next).prev = SENTINEL;
            self.armed -= 1;

            let slot = &mut self.slots[head];
            let callback = slot.callback.take();
            let arg = slot.arg.take();
            slot.make_inert(head);

            #[cfg(feature = "defmt")]
            defmt::trace!("vtimer: expire #{}", head);

            if let (Some(callback), Some(arg)) = (callback, arg) {
                callback(self, TimerId(head), arg);
                fired += 1;
            }
            // Callbacks may have re-armed or cancelled anything: restart from the head.
            head = self.sentinel.next;
        }
        fired
    }

    //==================================================================================Queries

    /// Number of armed timers.
    #[inline]
    pub fn armed(&self) -> usize {
        self.armed
    }

    /// Number of timer slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Ticks until the next expiry, `None` when nothing is armed.
    pub fn next_expiry(&self) -> Option<Tick> {
        let head = self.sentinel.next;
        (head != SENTINEL).then(|| self.node(head).delta)
    }

    //==================================================================================Internals

    fn slot_index(&self, timer: TimerId) -> Result<usize, TimerError> {
        if timer.0 < N {
            Ok(timer.0)
        } else {
            Err(TimerError::InvalidHandle { index: timer.0 })
        }
    }

    fn is_linked(&self, index: usize) -> bool {
        let slot = &self.slots[index];
        slot.allocated && slot.node.next != index
    }

    fn node(&self, index: usize) -> &Node {
        if index == SENTINEL {
            &self.sentinel
        } else {
            &self.slots[index].node
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node {
        if index == SENTINEL {
            &mut self.sentinel
        } else {
            &mut self.slots[index].node
        }
    }
}
