use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::constants::{AT_INSTALL, POST_INSTALL};
use crate::error::{ModelError, ModelResult};

/// A single label attached to a test unit.
///
/// A tag is a non-empty token drawn from `[A-Za-z0-9_]+`.
/// Construction validates the token, so every `Tag` in circulation is well-formed.
///
/// # Examples
/// ```
/// use tagsel_model::Tag;
///
/// let tag = Tag::new("slow").unwrap();
/// assert_eq!(tag.as_str(), "slow");
///
/// assert!(Tag::new("").is_err());
/// assert!(Tag::new("two words").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Tag(String);

impl Tag {
    /// Create a tag, validating the token.
    pub fn new(s: impl Into<String>) -> ModelResult<Self> {
        Self::try_from(s.into())
    }

    /// Returns `true` if `s` is a well-formed tag token.
    pub fn is_valid(s: &str) -> bool {
        check(s).is_ok()
    }

    /// The `at_install` tag.
    pub fn at_install() -> Self {
        Self::known(AT_INSTALL)
    }

    /// The `post_install` tag.
    pub fn post_install() -> Self {
        Self::known(POST_INSTALL)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn known(name: &'static str) -> Self {
        debug_assert!(Self::is_valid(name));
        Self(name.to_owned())
    }
}

fn check(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("tag is empty");
    }
    if s.chars().any(char::is_whitespace) {
        return Err("tag contains whitespace");
    }
    if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("tag may only contain ASCII letters, digits and '_'");
    }
    Ok(())
}

impl TryFrom<String> for Tag {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match check(&s) {
            Ok(()) => Ok(Tag(s)),
            Err(reason) => Err(ModelError::InvalidTag { value: s, reason }),
        }
    }
}

impl FromStr for Tag {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl From<Tag> for String {
    fn from(t: Tag) -> Self {
        t.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
