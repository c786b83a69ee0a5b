pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{IncidentRepository, PgIncidentRepository};
pub use services::IncidentService;
