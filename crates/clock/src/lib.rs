//! Wall clock for the page header: Eastern-time sampling and a scoped tick timer.
//!
//! # Invariants
//! - Samples always reflect America/New_York, never the host timezone.
//! - A dropped [`TickTimer`] fires no further callbacks.
//! - Formatting is a pure function of the sampled instant.

mod eastern;
mod sample;
mod timer;

pub use eastern::eastern_offset;
pub use sample::ClockSample;
pub use timer::TickTimer;
