//! Utility functions module
//!
//! Process-level helpers shared by the binary, currently shutdown signal handling.

pub mod signals;

pub use signals::shutdown_signal;
