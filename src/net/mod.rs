//! Client-side data model shared by services, state and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `types` defines the records persisted in browser storage and the shapes a
//! future backend would return. There is no HTTP client yet; see
//! `services::auth` for the simulated collaborators.

pub mod types;
