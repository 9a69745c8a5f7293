use opentelemetry::KeyValue;
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::logs::SdkLoggerProvider;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<SdkLoggerProvider> = OnceLock::new();

/// Tokio runtime for the OTLP gRPC exporter. Tonic's `connect_lazy()`
/// spawns onto the current runtime, and the batch processor exports from
/// its own thread, so the channel gets a runtime that outlives `main`'s.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Install the console subscriber. `RUST_LOG` wins over `default_directive`.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .try_init();
}

/// Install an OTLP log exporter behind the `log` crate.
///
/// Only `log::*` records are exported; console narration stays on
/// `tracing`. Returns `true` when the bridge is active.
///
/// Reads config from environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address
///   - `OTEL_SERVICE_NAME`: service name tag (default: `service_name`)
///   - `SIGNOZ_INGESTION_KEY`: SigNoz Cloud access token (optional)
///   - `DEPLOY_ENV`: deployment environment tag (default: `development`)
pub fn init_telemetry(service_name: &str) -> bool {
    let endpoint = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(ep) if !ep.is_empty() => ep,
        _ => {
            tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP log export");
            return false;
        }
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| service_name.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let rt = match OTEL_RUNTIME.get() {
        Some(rt) => rt,
        None => match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .thread_name("otel-export")
            .build()
        {
            Ok(rt) => OTEL_RUNTIME.get_or_init(|| rt),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create OTEL runtime, skipping log export");
                return false;
            }
        },
    };
    let _guard = rt.enter();

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);

    // TLS with system roots for HTTPS endpoints (e.g. SigNoz Cloud)
    if endpoint.starts_with("https://") {
        log_builder = log_builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }

    if let Ok(key) = std::env::var("SIGNOZ_INGESTION_KEY") {
        if !key.is_empty() {
            match key.parse() {
                Ok(value) => {
                    let mut md = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
                    md.insert("signoz-ingestion-key", value);
                    log_builder = log_builder.with_metadata(md);
                }
                Err(_) => tracing::warn!("Ignoring invalid SIGNOZ_INGESTION_KEY value"),
            }
        }
    }

    let log_exporter = match log_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create OTLP log exporter");
            return false;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = LOGGER_PROVIDER.get_or_init(|| {
        SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => {
            log::set_max_level(log::LevelFilter::Info);
            tracing::info!(endpoint = %endpoint, version = APP_VERSION, "Run summaries exporting over OTLP");
            true
        }
        Err(_) => {
            tracing::warn!("Log bridge skipped, log crate logger already set");
            false
        }
    }
}

/// Flush pending log records. Call once before the process exits.
pub fn shutdown_telemetry() {
    if let Some(provider) = LOGGER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = ?e, "OTLP log provider shutdown failed");
        }
    }
}
