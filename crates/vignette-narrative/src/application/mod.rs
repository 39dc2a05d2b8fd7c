//! Application layer: wires the playthrough to renderers and host signals.

pub mod director;
