//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events. Applications that do not install their
//! own subscriber can call [`init_tracing`] (or hand a [`TracingConfig`] to the client
//! builder) to get formatted output on stdout, stderr or a daily-rolling file.
//!
//! ```rust,ignore
//! let _guard = genwire::observability::init_tracing(TracingConfig::development())?;
//! ```

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoUtc;

use crate::error::LlmError;

/// Line format for emitted events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line, human-oriented
    Pretty,
    /// Single-line text
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// Where formatted events are written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    /// Daily-rolling files named `{prefix}.YYYY-MM-DD` under `directory`
    File {
        directory: PathBuf,
        file_name_prefix: String,
    },
}

/// Subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// When false, [`init_tracing`] does nothing
    pub enabled: bool,
    /// `EnvFilter` directive, e.g. `genwire=debug,warn`
    pub filter: String,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Include the event target (module path)
    pub with_target: bool,
    /// Include thread ids
    pub with_thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::minimal()
    }
}

impl TracingConfig {
    /// Debug-level pretty output on stdout
    pub fn development() -> Self {
        Self {
            enabled: true,
            filter: "genwire=debug,info".to_string(),
            format: LogFormat::Pretty,
            output: LogOutput::Stdout,
            with_target: true,
            with_thread_ids: false,
        }
    }

    /// Info-level compact output, crate events only
    pub fn minimal() -> Self {
        Self {
            enabled: true,
            filter: "genwire=info,off".to_string(),
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            with_target: false,
            with_thread_ids: false,
        }
    }

    /// Info-level JSON lines on stdout
    pub fn json_production() -> Self {
        Self {
            enabled: true,
            filter: "genwire=info,warn".to_string(),
            format: LogFormat::Json,
            output: LogOutput::Stdout,
            with_target: true,
            with_thread_ids: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::minimal()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Write to daily-rolling files instead of a console stream
    pub fn with_log_file(self, directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        self.with_output(LogOutput::File {
            directory: directory.into(),
            file_name_prefix: prefix.into(),
        })
    }
}

/// Install a global subscriber built from `config`.
///
/// Returns the writer guard; keep it alive or buffered events are lost on exit. If a
/// global subscriber is already installed this is a no-op returning `Ok(None)`.
pub fn init_tracing(config: TracingConfig) -> Result<Option<WorkerGuard>, LlmError> {
    if !config.enabled {
        return Ok(None);
    }

    let filter = EnvFilter::try_new(&config.filter).map_err(|e| {
        LlmError::ConfigurationError(format!("Invalid tracing filter `{}`: {e}", config.filter))
    })?;

    let (writer, guard) = match &config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File {
            directory,
            file_name_prefix,
        } => tracing_appender::non_blocking(tracing_appender::rolling::daily(
            directory,
            file_name_prefix,
        )),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_timer(ChronoUtc::rfc_3339())
        .with_target(config.with_target)
        .with_thread_ids(config.with_thread_ids);

    let init_result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    match init_result {
        Ok(()) => Ok(Some(guard)),
        Err(e) => {
            if e.to_string().contains("already been set") {
                tracing::debug!("global tracing subscriber already installed");
                Ok(None)
            } else {
                Err(LlmError::ConfigurationError(format!(
                    "Failed to initialize tracing: {e}"
                )))
            }
        }
    }
}
