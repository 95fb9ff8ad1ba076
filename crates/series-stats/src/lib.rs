pub mod stats;
pub mod trend;

#[cfg(test)]
mod stats_tests;

pub use stats::*;
pub use trend::*;
