//! Liveness check.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Server build version
    pub version: String,
}

/// Answers without touching the database, so it stays up while storage is degraded.
#[endpoint(
    tags("health"),
    summary = "Liveness",
    responses((status_code = StatusCode::OK, description = "Serving")),
)]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_reports_ok_without_state() -> TestResult {
        let service = Service::new(Router::with_path("api/health").get(handler));

        let body: serde_json::Value = TestClient::get("http://example.com/api/health")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

        Ok(())
    }
}
