//! Subscriber installation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use crate::config::observability::{LogFormat, LoggingConfig};

use super::ObservabilityError;

/// Install the global subscriber: env filter, one formatter, and the OTel layer when exporting.
pub(super) fn init_subscriber(
    logging: &LoggingConfig,
    service_name: &str,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_unset| EnvFilter::new(default_directives(&logging.log_level)));

    let (compact, json) = match logging.log_format {
        LogFormat::Compact => (
            Some(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            ),
        ),
    };

    let spans = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_owned()))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .with(spans)
        .try_init()?;

    Ok(())
}

/// Database, HTTP/2 and exporter internals stay at `warn` unless `RUST_LOG` says otherwise.
fn default_directives(level: &str) -> String {
    format!("{level},sqlx=warn,h2=warn,hyper=warn,tower=warn,tonic=warn,opentelemetry=warn")
}

#[cfg(test)]
mod tests {
    use super::default_directives;

    #[test]
    fn default_directives_quiet_dependencies() {
        let directives = default_directives("marketplace_json=debug");

        assert!(directives.starts_with("marketplace_json=debug,"));
        assert!(directives.contains("sqlx=warn"));
    }
}
