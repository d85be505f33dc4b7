//! Core infrastructure: deterministic RNG and the time source.

mod clock;
mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use rng::EngineRng;
