//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (nosniff, frame denial, referrer policy)
//!     → Send to client
//! ```

pub mod headers;
