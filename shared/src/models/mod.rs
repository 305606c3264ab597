//! Domain models for the greenhouse temperature log

mod observation;
mod persisted;
mod record;
mod weather_log;

pub use observation::*;
pub use persisted::*;
pub use record::*;
pub use weather_log::*;
