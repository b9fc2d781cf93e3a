//! Repository layer: the persistent store boundary.
//!
//! # Responsibility
//! - Define the event store contract used by the month cache.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Inserts return the id generated by the store, never a guessed one.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod event_repo;
