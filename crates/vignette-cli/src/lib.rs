//! Vignette terminal host.
//!
//! Reads configuration from the environment, loads a script and plays it in
//! the terminal: stdin lines become continue/skip/phase signals, and timers
//! and simulated media completion are delivered from a single tokio loop.

pub mod config;
pub mod error;
pub mod host;
pub mod input;
