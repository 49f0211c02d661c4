//! HTTP server module.
//!
//! Serves the router over plain HTTP; TLS is expected to be terminated in
//! front of the service. The server includes:
//! - Address validation from configuration
//! - Graceful shutdown on SIGTERM/SIGINT

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
