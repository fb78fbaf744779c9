//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (clock, timers,
//! `localStorage`, navigation) from services and pages so the core stays
//! testable off the browser.

pub mod auth;
pub mod clock;
pub mod storage;
pub mod task;
