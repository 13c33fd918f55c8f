//! Structured logging for the `knows` binary.
//!
//! Diagnostics are written to `stderr` so graph payloads on `stdout` can be
//! piped straight into other tools. `KNOWS_LOG_FORMAT` selects between
//! human-readable and JSON lines; `RUST_LOG` sets the filter.

use std::{env, fmt, io, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing::{Subscriber, debug};
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
};

/// Environment variable selecting the log line format.
pub const LOG_FORMAT_ENV: &str = "KNOWS_LOG_FORMAT";

const DEFAULT_DIRECTIVE: &str = "info";

static INITIALISED: OnceLock<LogFormat> = OnceLock::new();

/// Errors raised while configuring logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `KNOWS_LOG_FORMAT` held bytes that are not UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the variable.
        name: &'static str,
        /// Error from the environment lookup.
        #[source]
        source: env::VarError,
    },
    /// `KNOWS_LOG_FORMAT` named a format other than `human` or `json`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value that failed to parse.
        provided: String,
    },
}

/// Shape of each log line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text for terminals.
    #[default]
    Human,
    /// One JSON object per event, including the active span list.
    Json,
}

impl LogFormat {
    /// Reads the format from `KNOWS_LOG_FORMAT`, defaulting to
    /// [`LogFormat::Human`] when the variable is unset.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when the variable is not UTF-8 or names an
    /// unknown format.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(env::var(LOG_FORMAT_ENV))
    }

    fn from_lookup(lookup: Result<String, env::VarError>) -> Result<Self, LoggingError> {
        match lookup {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            }),
        }
    }

    fn layer<S>(self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(io::stderr);
        match self {
            Self::Human => layer.boxed(),
            Self::Json => layer
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Json => "json",
        })
    }
}

/// Installs the global subscriber once per process.
///
/// Later calls return without touching the existing configuration. When some
/// other component already owns the global dispatcher, a one-line notice is
/// printed and that subscriber is left in place.
///
/// # Errors
/// Returns [`LoggingError`] when `KNOWS_LOG_FORMAT` is malformed.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let format = LogFormat::from_env()?;
    if let Err(source) = install(format) {
        report_existing_subscriber(&source);
    }
    INITIALISED.get_or_init(|| format);
    Ok(())
}

fn install(format: LogFormat) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(format.layer())
        .try_init()?;

    if LogTracer::init().is_err() {
        debug!("log records already bridged into tracing");
    }
    debug!(%format, "logging initialised");
    Ok(())
}

#[expect(
    clippy::print_stderr,
    reason = "tracing belongs to another subscriber at this point"
)]
fn report_existing_subscriber(source: &TryInitError) {
    eprintln!("structured logging already configured elsewhere: {source}");
}
