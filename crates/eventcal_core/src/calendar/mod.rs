//! Month arithmetic and text-grid rendering.
//!
//! # Responsibility
//! - Derive the weekday layout of a month from its context alone.
//! - Render the fixed-width month grid from plain inputs.
//!
//! # Invariants
//! - Both functions are pure; nothing here reads the cache or the store.
//! - `first_weekday + days_in_month + trailing_blanks` is a multiple of 7.

mod layout;
mod render;

pub use layout::{days_in_month, is_leap_year, month_layout, MonthLayout};
pub use render::{format_event_count, render, EVENT_MARKER};
