pub mod auth;
pub mod session;
pub mod token;
pub mod usage;
pub mod users;
pub mod validation;
