//! Plain data shared by the craps engine and the trial runner.

pub mod craps;
mod fixed;

pub use fixed::{Decimal, DecimalError, SCALE};
