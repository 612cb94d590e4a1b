//! HTTP surface for the RMS rating management system.
//!
//! # Responsibility
//! - Map REST routes onto `rms_core` services.
//! - Own HTTP concerns: request-shape extraction, status codes, CORS,
//!   request logging, process configuration.
//!
//! # Invariants
//! - Every handler runs its use case as one unit of work on the blocking pool.
//! - Domain errors are translated to responses only in `error::ApiError`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use config::{ConfigError, DatabaseLocation, ServerConfig};
pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, Database};
