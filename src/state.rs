//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::secret::SecretReader;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Built once at startup and handed to the router. Nothing in it is mutated
/// after construction; the secret itself is re-read per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub secrets: Arc<SecretReader>,
}

impl AppState {
    /// Creates a new application state, pointing the secret reader at the configured path.
    pub fn new(config: AppConfig) -> Self {
        let secrets = SecretReader::new(&config.secret.path);
        Self {
            config: Arc::new(config),
            secrets: Arc::new(secrets),
        }
    }
}
