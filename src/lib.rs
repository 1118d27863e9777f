pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Name reported by the service descriptor and in startup logs.
pub const SERVICE_NAME: &str = "Blog API";
