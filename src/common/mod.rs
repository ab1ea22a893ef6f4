//! Common module
//!
//! This module contains shared error types and the logger setup used by the
//! library and the `envkit` binary.

pub mod error;
pub mod log;

// Re-export commonly used types and functions
pub use error::{Error, Result};
pub use log::init_logger;
