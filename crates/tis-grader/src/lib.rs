//! Grading driver for TIS-100 solutions.
//!
//! Orchestrates the fixed three-test battery and the seed-driven random
//! battery over a worker pool, applies the timeout policy, and
//! classifies solutions (validated / cheat / hardcoded).

mod score;
mod seeds;
mod sim;

pub use score::Score;
pub use seeds::{SeedIter, SeedRange};
pub use sim::{SimError, Simulator, clear_stop, defaults, request_stop, stop_requested};
