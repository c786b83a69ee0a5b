pub mod auth;
pub mod dashboard;
pub mod incidents;
pub mod media;
