pub mod competitors;
pub mod dashboard;
pub mod login;
pub mod plan;
pub mod pricing;
pub mod register;
pub mod settings;
