pub mod config;
pub mod domain;
pub mod error;
pub mod files;
pub mod logging;
pub mod pipeline;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod observability;
