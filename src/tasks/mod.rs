//! Background tasks module
//! 
//! This module contains the countdown ticker that runs alongside the HTTP server.

pub mod countdown;

// Re-export main types
pub use countdown::Countdown;
