//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Events go to stderr at the level chosen on the command line and, during a
//! run, to the run log file at `info` or more verbose.
//!
//! # Log Levels
//!
//! - `error`: fatal errors
//! - `warn`: non-fatal issues
//! - `info`: stage progress, parse rates, rule outcomes, output paths
//! - `debug`: per-rule mask construction and other detail
//! - `trace`: everything else

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events are shown at the configured level.
const WORKSPACE_TARGETS: &[&str] = &[
    "dq_cli",
    "dq_ingest",
    "dq_model",
    "dq_report",
    "dq_transform",
    "dq_validate",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for stderr output.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter`.
    pub use_env_filter: bool,
    /// Whether to include timestamps in stderr output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to use ANSI colors on stderr.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Run log file. Always written without ANSI and with timestamps.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// Set the run log file (stderr only when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Level used for the log file: never less verbose than `info`.
    pub fn file_level(&self) -> LevelFilter {
        self.level_filter.max(LevelFilter::INFO)
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global tracing subscriber.
///
/// Call once at startup. Creates the log file's parent directory when needed.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let stderr_filter = if config.use_env_filter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter(config.level_filter))
    } else {
        default_filter(config.level_filter)
    };
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(
        config.format,
        io::stderr,
        config.with_ansi,
        config.with_timestamps,
        config.with_target,
        stderr_filter,
    )];
    if let Some(path) = &config.log_file {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        layers.push(fmt_layer(
            config.format,
            SharedFileWriter::new(file),
            false,
            true,
            true,
            default_filter(config.file_level()),
        ));
    }
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(io::Error::other)
}

fn fmt_layer<W>(
    format: LogFormat,
    writer: W,
    ansi: bool,
    timestamps: bool,
    target: bool,
    filter: EnvFilter,
) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(target);
    match (format, timestamps) {
        (LogFormat::Json, _) => layer.json().with_filter(filter).boxed(),
        (LogFormat::Compact, true) => layer.compact().with_filter(filter).boxed(),
        (LogFormat::Compact, false) => layer.compact().without_time().with_filter(filter).boxed(),
        (LogFormat::Pretty, true) => layer.with_filter(filter).boxed(),
        (LogFormat::Pretty, false) => layer.without_time().with_filter(filter).boxed(),
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Directives for workspace crates at `level`; other crates stay at `warn` or quieter.
fn default_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(default_directives(level))
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    let external = if level == "off" || level == "error" {
        level.as_str()
    } else {
        "warn"
    };
    let mut directives = vec![external.to_string()];
    directives.extend(
        WORKSPACE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}")),
    );
    directives.join(",")
}
