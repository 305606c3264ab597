//! Greenhouse temperature log
//!
//! Persistence, CSV export and configuration around the shared weather log.

pub mod config;
pub mod error;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult, StorageError, StorageResult};
