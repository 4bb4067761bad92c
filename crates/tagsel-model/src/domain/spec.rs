use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{Tag, TagSet};
use crate::error::{ModelError, ModelResult};

/// One tag specifier as written by a test author.
///
/// - `X`  adds `X`
/// - `-X` removes `X`
///
/// Specifiers are applied left-to-right, so the last occurrence of a tag wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub enum TagSpec {
    Add(Tag),
    Remove(Tag),
}

impl TagSpec {
    /// Apply this specifier to a set under construction.
    pub fn apply(&self, set: &mut TagSet) {
        match self {
            TagSpec::Add(t) => {
                set.insert(t.clone());
            }
            TagSpec::Remove(t) => {
                set.discard(t.as_str());
            }
        }
    }
}

impl FromStr for TagSpec {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        let invalid = |reason| ModelError::InvalidTag {
            value: s.to_owned(),
            reason,
        };

        if s.is_empty() {
            return Err(invalid("specifier is empty"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(invalid("specifier contains whitespace"));
        }
        match s.strip_prefix('-') {
            Some("") => Err(invalid("missing tag after '-'")),
            Some(rest) => Tag::new(rest)
                .map(TagSpec::Remove)
                .map_err(|e| retarget(e, s)),
            None => Tag::new(s).map(TagSpec::Add),
        }
    }
}

/// Report errors against the full specifier, not just the stripped tag.
fn retarget(err: ModelError, spec: &str) -> ModelError {
    let ModelError::InvalidTag { reason, .. } = err;
    ModelError::InvalidTag {
        value: spec.to_owned(),
        reason,
    }
}

impl TryFrom<String> for TagSpec {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TagSpec> for String {
    fn from(s: TagSpec) -> Self {
        s.to_string()
    }
}

impl fmt::Display for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagSpec::Add(t) => write!(f, "{t}"),
            TagSpec::Remove(t) => write!(f, "-{t}"),
        }
    }
}
