//! Prometheus metrics: HTTP traffic plus marketplace events, exposed at `/metrics`.

use std::sync::OnceLock;

use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use salvo::{
    Response, handler,
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::error;

const DURATION_BUCKETS: [f64; 12] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Business events worth counting next to request traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Registration,
    Login,
    ProductClick,
    ProductSaved,
    PromotionCreated,
    ImageUploaded,
}

impl Event {
    const fn label(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Login => "login",
            Self::ProductClick => "product_click",
            Self::ProductSaved => "product_saved",
            Self::PromotionCreated => "promotion_created",
            Self::ImageUploaded => "image_uploaded",
        }
    }
}

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
    in_flight: IntGauge,
    events: IntCounterVec,
}

impl Metrics {
    fn register() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("marketplace_json".to_owned()), None)?;

        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Requests by method, route and status."),
            &["method", "route", "status_class", "status_code"],
        )?;
        let latency = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "Request latency by route.")
                .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        )?;
        let in_flight = IntGauge::new("http_requests_in_flight", "Requests being served.")?;
        let events = IntCounterVec::new(
            Opts::new("events_total", "Marketplace events by kind."),
            &["event"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        registry.register(Box::new(in_flight.clone()))?;
        registry.register(Box::new(events.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
            in_flight,
            events,
        })
    }
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            Metrics::register()
                .inspect_err(|source| error!("failed to register metrics: {source}"))
                .ok()
        })
        .as_ref()
}

/// Count one marketplace event.
pub(crate) fn record(event: Event) {
    record_many(event, 1);
}

pub(crate) fn record_many(event: Event, count: usize) {
    if let Some(metrics) = metrics() {
        metrics
            .events
            .with_label_values(&[event.label()])
            .inc_by(u64::try_from(count).unwrap_or(u64::MAX));
    }
}

/// Holds the in-flight gauge up until dropped.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static Metrics>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let metrics = metrics();

        if let Some(metrics) = metrics {
            metrics.in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let code = status_code.to_string();

    metrics
        .requests
        .with_label_values(&[method, route, status_class(status_code), &code])
        .inc();
    metrics
        .latency
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

fn status_class(status_code: u16) -> &'static str {
    match status_code / 100 {
        1 => "1xx",
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return;
    };

    let encoder = TextEncoder::new();
    let mut body = String::new();

    if let Err(source) = encoder.encode_utf8(&metrics.registry.gather(), &mut body) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    if let Err(source) = res.add_header(CONTENT_TYPE, encoder.format_type(), true) {
        error!("failed to set metrics content type: {source}");
    }

    res.render(body);
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_classes() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }

    #[tokio::test]
    async fn exposes_traffic_and_event_counters() -> TestResult {
        observe_request("GET", "/api/products", 200, 0.042);
        record(Event::ProductClick);

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let body = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        for name in [
            "marketplace_json_http_requests_total",
            "marketplace_json_http_request_duration_seconds",
            "marketplace_json_http_requests_in_flight",
            "marketplace_json_events_total{event=\"product_click\"}",
        ] {
            assert!(body.contains(name), "expected {name} in the exposition");
        }

        Ok(())
    }
}
