//! Abstraction traits for the collaborators of the engine (hardware tick source and tick pacing).
pub mod tick_source;
pub mod tick_wait;
