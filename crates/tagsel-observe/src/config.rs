use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{format::LogFormat, level::LogLevel, timer::LogTimeZone};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive (e.g. `"info"`, `"tagsel_core=trace,info"`).
    pub level: LogLevel,
    /// Timezone for timestamps.
    pub tz: LogTimeZone,
    /// Include the emitting module path in each record.
    pub with_targets: bool,
    /// Colour text output when writing to a terminal.
    pub use_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::default(),
            tz: LogTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LogConfig {
    /// Colour is used only when enabled and stderr is a terminal.
    ///
    /// Evaluated at initialization so redirects are detected accurately.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
