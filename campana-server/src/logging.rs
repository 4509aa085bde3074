// Logging module, powered by tracing-subscriber.
//
// The subscriber also installs the `log` bridge, so actix's request logger and any
// other `log::*` callers end up in the same output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    #[default]
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    /// Parses a format name; anything unrecognised falls back to compact text.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Build the `EnvFilter` from the base level and the noisy-crate overrides.
pub fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    // Suppress noisy third-party crates
    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_web", "warn"),
        // Request log lines from `middleware::Logger`
        ("actix_web::middleware::logger", "info"),
        ("mongodb", "warn"),
        ("h2", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

/// Installs the global subscriber writing to stdout.
pub fn init_logging(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_filter(build_env_filter(level)?)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_filter(build_env_filter(level)?)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()?;

    tracing::trace!(level, ?format, "Logging initialized");

    Ok(())
}
