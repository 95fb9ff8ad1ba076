pub mod allocation;
pub mod risk;

#[cfg(test)]
mod allocation_tests;

pub use allocation::*;
pub use risk::*;
