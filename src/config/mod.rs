//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (snapshot into RawEnv)
//!     → validation.rs (check every rule, collect every violation)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to handlers and page renderers
//!
//! command-line flags
//!     → ServerSettings (bind address, timeouts, metrics)
//! ```
//!
//! # Design Decisions
//! - Config is built once per process and never mutated
//! - A failed validation is fatal to startup; there is no partial config
//! - Unknown environment keys are ignored

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, RawEnv};
pub use schema::{
    AppConfig, AppUrl, ConfigSchema, DatabaseUrl, RuntimeMode, ServerSettings, SettingRule, Shape,
    RUNTIME_MODES,
};
pub use validation::{validate, ValidationFailure, ValidationReport, Violation};
