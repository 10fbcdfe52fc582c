//! External service integration module
//! 
//! This module wraps the desktop tools the server shells out to.

pub mod notifier;

// Re-export main functions
pub use notifier::*;
