//! Domain values shared by the store, the month cache and the renderer.
//!
//! # Invariants
//! - A persisted event is identified by its store-assigned `EventId`.
//! - Event timestamps carry minute resolution.

pub mod event;
pub mod month;
