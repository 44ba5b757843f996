//! # CampusMap Gateway
//!
//! HTTP implementation of the [`campusmap_core::PersistenceGateway`] trait
//! against the remote CampusMap canvas API: typed request/response schemas,
//! bearer-token supply, and a small serde-backed configuration.

pub mod auth;
pub mod client;
pub mod config;
pub mod schema;

pub use auth::{Anonymous, StaticToken, TokenSource};
pub use client::HttpGateway;
pub use config::GatewayConfig;
