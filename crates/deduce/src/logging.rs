//! Structured logging for the reasoning core, using the `tracing` crate.
//!
//! The prover emits `debug!` events per query and saturation round, `trace!` events per
//! resolvent, and a `warn!` when a configured limit stops a search. This module
//! installs a subscriber that renders them.
//!
//! # Examples
//!
//! ```no_run
//! use deduce::logging::{LogFormat, LogLevel, TracingLoggerBuilder};
//!
//! TracingLoggerBuilder::new()
//!     .with_format(LogFormat::Compact)
//!     .with_level(LogLevel::Debug)
//!     .build()
//!     .expect("Failed to initialize logger");
//!
//! // Embedding applications log through the same subscriber
//! tracing::info!(cell = "(1, 0)", "asking whether the cell is safe");
//! ```
//!
//! The `DEDUCE_LOG` environment variable, when set, takes precedence over the
//! configured level and accepts any `EnvFilter` directive such as
//! `deduce_kb::resolution=trace`.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Environment variable holding a filter directive.
pub const LOG_ENV_VAR: &str = "DEDUCE_LOG";

/// Target of the reasoning core's events.
const CORE_TARGET: &str = "deduce_kb";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter { directive: String, message: String },
    #[error("Unknown log level '{0}'")]
    UnknownLevel(String),
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line output with colors
    Pretty,
    /// Single-line output without colors
    Compact,
    /// One JSON object per event
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Every resolvent
    Trace,
    /// Query and round summaries
    Debug,
    Info,
    /// Resource limits
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(LoggingError::UnknownLevel(s.to_string())),
        }
    }
}

/// Configuration builder for structured logging.
#[derive(Debug, Clone)]
pub struct TracingLoggerBuilder {
    format: LogFormat,
    level: LogLevel,
    env_filter: Option<String>,
    with_targets: bool,
    with_span_events: bool,
}

impl Default for TracingLoggerBuilder {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: LogLevel::Info,
            env_filter: None,
            with_targets: true,
            with_span_events: false,
        }
    }
}

impl TracingLoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Level applied to the reasoning core; other targets stay at `warn`.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set a custom filter directive (overrides the level setting).
    ///
    /// ```
    /// # use deduce::logging::TracingLoggerBuilder;
    /// let builder = TracingLoggerBuilder::new()
    ///     .with_env_filter("deduce_kb::resolution=trace");
    /// ```
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Include target names (module paths) in logs.
    pub fn with_targets(mut self, enabled: bool) -> Self {
        self.with_targets = enabled;
        self
    }

    /// Report entering and leaving the `refute` span.
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.with_span_events = enabled;
        self
    }

    /// The filter directive this builder would install, ignoring `DEDUCE_LOG`.
    pub fn directive(&self) -> String {
        match &self.env_filter {
            Some(filter) => filter.clone(),
            None => format!("warn,{}={}", CORE_TARGET, self.level.as_str()),
        }
    }

    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        if self.env_filter.is_none() {
            if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
                return Ok(filter);
            }
        }
        let directive = self.directive();
        EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
            directive,
            message: e.to_string(),
        })
    }

    /// Build and install the global subscriber.
    ///
    /// Only one subscriber can be installed per process; later calls fail with
    /// [`LoggingError::Init`].
    pub fn build(self) -> Result<(), LoggingError> {
        let env_filter = self.filter()?;
        let span_events = if self.with_span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let init_error = |e: tracing_subscriber::util::TryInitError| LoggingError::Init(e.to_string());

        match self.format {
            LogFormat::Pretty => {
                let layer = fmt::layer()
                    .with_target(self.with_targets)
                    .with_span_events(span_events)
                    .pretty();
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .try_init()
                    .map_err(init_error)
            }
            LogFormat::Compact => {
                let layer = fmt::layer()
                    .with_target(self.with_targets)
                    .with_span_events(span_events)
                    .with_ansi(false)
                    .compact();
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .try_init()
                    .map_err(init_error)
            }
            LogFormat::Json => {
                let layer = fmt::layer()
                    .with_target(self.with_targets)
                    .with_span_events(span_events)
                    .json();
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .try_init()
                    .map_err(init_error)
            }
        }
    }
}

/// Install a compact subscriber at the given level for the reasoning core.
pub fn init_logging(level: LogLevel) -> Result<(), LoggingError> {
    TracingLoggerBuilder::new()
        .with_format(LogFormat::Compact)
        .with_level(level)
        .build()
}
