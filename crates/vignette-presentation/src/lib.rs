//! Vignette — Presentation.
//!
//! Per-event-type renderers behind the [`renderer::EventRenderer`] contract,
//! the stateful chat reveal, and the media phase state machine. Renderers
//! only ever touch the outside world through the stage, scheduler and media
//! player handed to them in a [`renderer::RenderContext`].

pub mod chat;
pub mod comic;
pub mod fixed_dialogue;
pub mod media;
pub mod narration;
pub mod placeholder;
pub mod renderer;
