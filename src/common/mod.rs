//! Common module
//!
//! This module contains shared error types and utility functions used throughout the crate.

pub mod error;
pub mod log;

// Re-export commonly used types and functions
pub use error::{DevconfError, Result};
pub use log::init_logger;
