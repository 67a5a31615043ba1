//! NLC website: public site and admin portal.

pub mod admin;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod registry;
pub mod security;

pub use config::{AppConfig, ServerSettings};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
