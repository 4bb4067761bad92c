use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::LogError;

/// Validated `EnvFilter` directive string.
///
/// Stores the raw directive (e.g. `"info"`, `"tagsel_core=trace,warn"`) and
/// checks it with [`EnvFilter::try_new`] on construction, so converting it to a
/// filter later cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LogLevel(String);

impl LogLevel {
    /// # Examples
    /// ```
    /// use tagsel_observe::LogLevel;
    ///
    /// let lvl = LogLevel::new("tagsel_core=debug,info").unwrap();
    /// assert_eq!(lvl.as_str(), "tagsel_core=debug,info");
    /// assert!(LogLevel::new("tagsel_core=loud").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LogError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the subscriber filter for this directive.
    pub fn to_env_filter(&self) -> EnvFilter {
        // Validated in `try_from`; fall back to the default if that ever changes.
        EnvFilter::try_new(self.as_str()).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LogLevel(s)),
            Err(e) => Err(LogError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LogLevel> for String {
    fn from(l: LogLevel) -> Self {
        l.0
    }
}
