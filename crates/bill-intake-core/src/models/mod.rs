//! Domain models for bill intake.

mod intake;
mod progress;

pub use intake::*;
pub use progress::*;
