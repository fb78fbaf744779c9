//! Client state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain data structs wrapped in `RwSignal`s by `app`. Transitions live on the
//! structs so they can be tested without a reactive runtime.

pub mod auth;
pub mod competitors;
pub mod form;
pub mod search;
