// astro-report-service/src/lib.rs

pub mod config;
pub mod error;
pub mod locale;
pub mod models;
pub mod pdf;
pub mod renderers;
pub mod reports;
pub mod routes;
pub mod upstream;
