//! Vignette Core — shared playback abstractions.
//!
//! This crate defines the fundamental traits and types that the script,
//! presentation and narrative crates depend on: the host-facing contracts
//! (stage, scheduler, media player, clock), the signal vocabulary, errors and
//! output events. It contains no I/O.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod media;
pub mod scheduler;
pub mod signal;
pub mod stage;
