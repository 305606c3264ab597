//! Services built on the weather log

pub mod export;
pub mod journal;

pub use export::*;
pub use journal::*;
