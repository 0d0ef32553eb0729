//! Tracing subscriber setup.
//!
//! Library crates in this workspace only emit `tracing` events. Binaries
//! and test harnesses that want to see them install a subscriber once,
//! through [`TracingConfig::init`].
//!
//! # Example
//!
//! ```
//! use stratus_core::telemetry::{Level, TracingConfig, TracingFormat};
//!
//! // Development: pretty output with decode decisions visible
//! let dev = TracingConfig::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Pretty);
//!
//! // Production: JSON for log aggregation, quiet dependencies
//! let prod = TracingConfig::new()
//!     .with_format(TracingFormat::Json)
//!     .with_env_filter("stratus_rpc=info,stratus_resource=warn");
//!
//! assert_eq!(dev.level(), Level::DEBUG);
//! assert_eq!(prod.format(), TracingFormat::Json);
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use tracing::Level;

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable multi-line output (default).
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// JSON objects, one per line.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Subscriber configuration.
///
/// Filter precedence, highest first:
///
/// 1. an explicit [`with_env_filter`](Self::with_env_filter) string, if it parses
/// 2. `RUST_LOG`, if [`with_default_env`](Self::with_default_env) is enabled and it parses
/// 3. the configured [`level`](Self::level)
#[derive(Debug, Clone)]
pub struct TracingConfig {
    level: Level,
    format: TracingFormat,
    env_filter: Option<String>,
    default_env: bool,
    span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            default_env: false,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets filter directives, e.g. `stratus_rpc=debug,stratus_resource=warn`.
    #[must_use]
    pub fn with_env_filter(mut self, directives: impl Into<String>) -> Self {
        self.env_filter = Some(directives.into());
        self
    }

    /// Reads filter directives from `RUST_LOG` when no explicit filter is set.
    #[must_use]
    pub fn with_default_env(mut self, enabled: bool) -> Self {
        self.default_env = enabled;
        self
    }

    /// Emits span enter and exit events.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Returns the configured level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the configured format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    /// Builds the event filter.
    ///
    /// Directives that fail to parse are skipped in favor of the next source.
    #[must_use]
    pub fn filter(&self) -> EnvFilter {
        if let Some(filter) = self
            .env_filter
            .as_deref()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
        {
            return filter;
        }
        if self.default_env
            && let Ok(filter) = EnvFilter::try_from_default_env()
        {
            return filter;
        }
        EnvFilter::new(self.level.as_str())
    }

    /// Installs a global subscriber.
    ///
    /// Returns `false` if a global subscriber was already installed, in which
    /// case this call has no effect.
    pub fn init(&self) -> bool {
        let installed = tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(self.filter())
            .try_init()
            .is_ok();

        if installed {
            tracing::info!(
                level = %self.level,
                format = ?self.format,
                "tracing initialized"
            );
        }
        installed
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };
        let layer = tracing_subscriber::fmt::layer().with_span_events(span_events);

        match self.format {
            TracingFormat::Pretty => layer.pretty().boxed(),
            TracingFormat::Compact => layer.compact().boxed(),
            TracingFormat::Json => layer.json().boxed(),
        }
    }
}
