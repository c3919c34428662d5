//! Typed timer signature used to validate API usage.
//!
//! The signature only exists with the `api-validation` feature. Without it
//! the [`require!`] checks expand to nothing and the caller contract is trusted.

/// Lifecycle tag of a timer slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signature {
    /// Never initialised, or terminated.
    Uninitialized,
    /// Initialised and not linked into the queue.
    Inert,
    /// Linked into the queue, waiting to expire.
    Armed,
}

/// Return `$err` from the enclosing function when `$cond` does not hold.
/// Compiled out entirely without the `api-validation` feature.
macro_rules! require {
    ($cond:expr, $err:expr) => {
        #[cfg(feature = "api-validation")]
        {
            if !($cond) {
                #[cfg(feature = "defmt")]
                defmt::warn!("vtimer: rejected call ({})", $err);
                return Err($err);
            }
        }
    };
}

pub(crate) use require;
