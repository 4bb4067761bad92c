//! Logging bootstrap for tagsel binaries.
//!
//! Library crates only emit `tracing` events; a binary calls [`init_logging`]
//! once at startup to decide where those events go.
mod config;
mod error;
mod format;
mod level;
mod timer;

pub use config::LogConfig;
pub use error::{LogError, LogResult};
pub use format::LogFormat;
pub use level::LogLevel;
pub use timer::{LogTimeZone, Rfc3339Timer};

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber described by `cfg`.
///
/// Records are written to stderr so that stdout stays free for program output.
/// Fails with [`LogError::AlreadyInitialized`] if a global subscriber exists.
///
/// # Examples
/// ```no_run
/// use tagsel_observe::{LogConfig, init_logging};
///
/// init_logging(&LogConfig::default()).expect("logging");
/// tracing::info!("logging ready");
/// ```
pub fn init_logging(cfg: &LogConfig) -> LogResult<()> {
    match cfg.format {
        LogFormat::Text => text(cfg),
        LogFormat::Json => json(cfg),
        LogFormat::Journald => journald(cfg),
    }
}

fn text(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets)
        .with_timer(Rfc3339Timer::new(cfg.tz));

    install(
        tracing_subscriber::registry()
            .with(cfg.level.to_env_filter())
            .with(layer),
    )
}

fn json(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(Rfc3339Timer::new(cfg.tz));

    install(
        tracing_subscriber::registry()
            .with(cfg.level.to_env_filter())
            .with(layer),
    )
}

#[cfg(target_os = "linux")]
fn journald(cfg: &LogConfig) -> LogResult<()> {
    let layer =
        tracing_journald::layer().map_err(|e| LogError::JournaldInitFailed(e.to_string()))?;

    install(
        tracing_subscriber::registry()
            .with(cfg.level.to_env_filter())
            .with(layer),
    )
}

#[cfg(not(target_os = "linux"))]
fn journald(_cfg: &LogConfig) -> LogResult<()> {
    Err(LogError::JournaldNotSupported)
}

fn install<S>(subscriber: S) -> LogResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}
