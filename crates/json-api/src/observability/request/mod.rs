//! Request-level logging, request IDs, and parent trace extraction.

mod headers;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

use headers::REQUEST_ID_HEADER;

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    // Metrics scrapes and static images are not logged.
    if req.uri().path() == "/metrics" || req.uri().path().starts_with("/uploads/") {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let started = Instant::now();

    let request_id = headers::resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    headers::echo_request_id(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let remote_addr = req.remote_addr().to_string();
    let names = spans::request_span_name(&method, &path);
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::propagate_parent()
        && let Some(parent_context) = headers::parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = res.status_code.unwrap_or(StatusCode::OK);

    metrics::observe_request(
        &method,
        &names.otel_path,
        status.as_u16(),
        elapsed.as_secs_f64(),
    );

    let completed = Completed {
        method: &method,
        path: &path,
        status,
        duration_ms: elapsed.as_millis(),
    };

    span.record("status", status.as_u16());
    span.record("duration_ms", completed.duration_ms);
    span.in_scope(|| completed.log());
}

/// Summary of a served request, logged inside its span.
#[derive(Debug)]
struct Completed<'a> {
    method: &'a str,
    path: &'a str,
    status: StatusCode,
    duration_ms: u128,
}

impl Completed<'_> {
    fn log(&self) {
        let Self {
            method,
            path,
            status,
            duration_ms,
        } = self;
        let status = status.as_u16();

        match self.status {
            code if code.is_server_error() => {
                error!(status, duration_ms, "request.failed");
            }
            code if code.is_client_error() => {
                warn!(status, duration_ms, "request.rejected");
            }
            _ => info!(status, duration_ms, "request.completed"),
        }

        let threshold_ms = u128::from(settings::slow_request_threshold_ms());

        if *duration_ms > threshold_ms {
            warn!(method, path, duration_ms, threshold_ms, "request.slow");
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("ping").get(ok)),
        )
    }

    #[tokio::test]
    async fn generates_request_id_when_missing() {
        let res = TestClient::get("http://example.com/ping")
            .send(&service())
            .await;

        let request_id = res
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        assert!(!request_id.is_empty(), "expected a generated request id");
    }

    #[tokio::test]
    async fn echoes_incoming_request_id() {
        let res = TestClient::get("http://example.com/ping")
            .add_header(REQUEST_ID_HEADER, "order-7f3a", true)
            .send(&service())
            .await;

        assert_eq!(
            res.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("order-7f3a")
        );
    }
}
