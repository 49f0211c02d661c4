//! Configuration status endpoint.
//!
//! Reports whether the API key secret is configured, with a masked preview.
//! The response never carries more of the secret than its configured prefix.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::{MAX_PREVIEW_CHARS, SERVICE_VERSION};
use crate::middleware::RequestId;
use crate::secret::SecretValue;
use crate::state::AppState;

/// Public view of the API key secret.
///
/// `api_key_preview` is `NOT_SET` when no secret is configured, otherwise the
/// first (at most 4) characters followed by `...`. A secret no longer than the
/// visible prefix is shown whole and still ends in `...`; the marker only
/// signals where the preview stops, not that characters were hidden.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ConfigStatus {
    pub api_key_configured: bool,
    pub api_key_preview: String,
    pub version: &'static str,
}

impl ConfigStatus {
    /// Derive the public status from a secret, showing at most `preview_chars`
    /// characters and never more than `MAX_PREVIEW_CHARS`.
    pub fn from_secret(secret: &SecretValue, preview_chars: usize) -> Self {
        Self {
            api_key_configured: secret.is_present(),
            api_key_preview: secret.preview(preview_chars.min(MAX_PREVIEW_CHARS)),
            version: SERVICE_VERSION,
        }
    }
}

/// Config status handler.
///
/// An unreadable secret file is logged and reported as not configured; the
/// request itself still succeeds.
#[instrument(
    name = "config_status::status",
    skip(state, request_id),
    fields(request_id = %request_id.0)
)]
pub async fn status(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ConfigStatus> {
    let secret = match state.secrets.read().await {
        Ok(secret) => secret,
        Err(e) => {
            tracing::error!(error = %e, "Secret file unreadable, reporting as not configured");
            SecretValue::Absent
        }
    };

    tracing::debug!(configured = secret.is_present(), "Resolved secret status");

    Json(ConfigStatus::from_secret(
        &secret,
        state.config.secret.preview_chars,
    ))
}
