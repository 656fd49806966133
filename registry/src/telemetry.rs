// Telemetry module for structured logging and registry metrics

use anyhow::Result;
use metrics::{describe_gauge, gauge};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Gauge holding the number of registered listeners per category
pub const REGISTRY_SIZE_GAUGE: &str = "listener_registry_size";

/// Initialize structured logging with JSON formatting
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_logging(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::info!(log_level = log_level, "Structured logging initialized");

    Ok(())
}

/// Register metric descriptions with the installed recorder
pub fn describe_metrics() {
    describe_gauge!(
        REGISTRY_SIZE_GAUGE,
        "Number of registered listeners per category"
    );
}

/// Update the listener count gauge for `category`
#[inline]
pub fn update_registry_size(category: &'static str, size: usize) {
    gauge!(REGISTRY_SIZE_GAUGE, "category" => category).set(size as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_with_valid_level() {
        // A second init in the same process fails; either outcome is fine here
        let result = init_logging("debug");
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_metrics_recording_without_recorder() {
        describe_metrics();
        update_registry_size("job", 3);
        update_registry_size("scheduler", 0);
    }
}
