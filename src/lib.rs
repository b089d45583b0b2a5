/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Certificate issuance orchestration
pub mod issuance;
/// Data models
pub mod model;
/// Certificate document templating
pub mod render;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
