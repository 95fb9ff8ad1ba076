pub mod compare;

#[cfg(test)]
mod compare_tests;

pub use compare::*;
