//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the calendar's use-cases.
//! - Keep the prompt loop decoupled from storage details.

pub mod month_calendar;
