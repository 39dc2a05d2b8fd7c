//! Vignette — Narrative Direction.
//!
//! Owns the traversal cursor, the advance algorithm and dispatch to the
//! per-event renderers. The [`application::director::Director`] is the only
//! component that moves the cursor.

pub mod application;
pub mod domain;

pub use application::director::Director;
