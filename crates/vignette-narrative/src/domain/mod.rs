//! Domain layer for narrative direction.

pub mod cursor;
pub mod events;
pub mod playthrough;
