//! Secure CI Demo - a minimal HTTP service that reports whether an API key
//! secret is configured without revealing it.
//!
//! The binary in `main.rs` wires these modules together; they are exposed
//! here so integration tests can drive the router directly.

pub mod config;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod secret;
pub mod state;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
