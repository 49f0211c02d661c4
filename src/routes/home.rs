//! Service identity endpoint.

use axum::Json;
use serde::Serialize;

use crate::config::{SERVICE_NAME, SERVICE_VERSION};

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// Root handler: static name and API version.
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}
