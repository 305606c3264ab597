//! Shared types and models for the greenhouse temperature log
//!
//! This crate contains the observation log, its rolling statistics and the
//! input gate, shared between the backend and the browser (via WASM).

pub mod models;
pub mod stats;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
