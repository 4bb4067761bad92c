//! Selection expression parser.
//!
//! Grammar (whitespace around commas and terms is insignificant):
//!
//! ```text
//! expr := term ("," term)*
//! term := sign? TAG
//! sign := "+" | "-"
//! TAG  := [A-Za-z0-9_]+
//! ```
//!
//! A missing sign means `+`. The same tag mentioned twice resolves to its last
//! occurrence, so `slow,-slow` excludes `slow`.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tagsel_model::{Tag, TagSet};
use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult};

/// Whether a term asks to include or exclude its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Include,
    Exclude,
}

/// Parsed selection: two disjoint sets of tags.
///
/// An empty filter selects every unit tagged `standard` (see [`crate::select`]).
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Filter {
    include: TagSet,
    exclude: TagSet,
}

impl Filter {
    /// The empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a selection string. Shorthand for [`parse_selection`].
    pub fn parse(text: &str) -> CoreResult<Self> {
        parse_selection(text)
    }

    /// Tags requested with `+` or no sign.
    pub fn include(&self) -> &TagSet {
        &self.include
    }

    /// Tags requested with `-`.
    pub fn exclude(&self) -> &TagSet {
        &self.exclude
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Returns `true` if `tag` appears at either polarity.
    pub fn mentions(&self, tag: &str) -> bool {
        self.include.contains(tag) || self.exclude.contains(tag)
    }

    /// The polarity `tag` is mentioned with, if any.
    pub fn polarity_of(&self, tag: &str) -> Option<Polarity> {
        if self.include.contains(tag) {
            Some(Polarity::Include)
        } else if self.exclude.contains(tag) {
            Some(Polarity::Exclude)
        } else {
            None
        }
    }

    /// Copy of this filter with `tag` included, overriding an earlier exclusion.
    pub fn with_include(&self, tag: Tag) -> Filter {
        let mut out = self.clone();
        out.push(Polarity::Include, tag);
        out
    }

    /// Copy of this filter with `tag` excluded, overriding an earlier inclusion.
    pub fn with_exclude(&self, tag: Tag) -> Filter {
        let mut out = self.clone();
        out.push(Polarity::Exclude, tag);
        out
    }

    /// Apply one term; the latest polarity for a tag replaces any earlier one.
    fn push(&mut self, polarity: Polarity, tag: Tag) {
        match polarity {
            Polarity::Include => {
                self.exclude.discard(tag.as_str());
                self.include.insert(tag);
            }
            Polarity::Exclude => {
                self.include.discard(tag.as_str());
                self.exclude.insert(tag);
            }
        }
    }

    /// Parse `text` and fold its terms into this filter.
    fn extend_from(&mut self, text: &str) -> CoreResult<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        for (idx, raw) in text.split(',').enumerate() {
            let (polarity, tag) = parse_term(idx, raw)?;
            trace!(term = raw.trim(), ?polarity, "selection term");
            self.push(polarity, tag);
        }
        Ok(())
    }
}

fn parse_term(idx: usize, raw: &str) -> CoreResult<(Polarity, Tag)> {
    let term = raw.trim();
    let invalid = |reason: String| CoreError::InvalidSelection {
        token: term.to_owned(),
        reason,
    };

    if term.is_empty() {
        return Err(invalid(format!("empty term at position {}", idx + 1)));
    }

    let (polarity, name) = match term.as_bytes()[0] {
        b'+' => (Polarity::Include, &term[1..]),
        b'-' => (Polarity::Exclude, &term[1..]),
        _ => (Polarity::Include, term),
    };
    if name.is_empty() {
        return Err(invalid("missing tag after sign".to_owned()));
    }

    let tag = Tag::new(name)
        .map_err(|tagsel_model::ModelError::InvalidTag { reason, .. }| invalid(reason.to_owned()))?;
    Ok((polarity, tag))
}

/// Parse a single selection string into a [`Filter`].
///
/// Unknown tags are not an error; they simply match nothing.
///
/// # Examples
/// ```
/// use tagsel_core::parse_selection;
///
/// let f = parse_selection("slow, -at_install, +post_install").unwrap();
/// assert!(f.include().contains("slow"));
/// assert!(f.include().contains("post_install"));
/// assert!(f.exclude().contains("at_install"));
///
/// assert!(parse_selection("").unwrap().is_empty());
/// assert!(parse_selection("slow,+").is_err());
/// ```
pub fn parse_selection(text: &str) -> CoreResult<Filter> {
    let mut filter = Filter::new();
    filter.extend_from(text)?;
    debug!(input = text, filter = %filter, "parsed selection");
    Ok(filter)
}

/// Parse several selection strings as if they were joined with commas.
///
/// Later strings override earlier ones tag by tag, which is how repeated
/// `--test-tags` options combine.
pub fn parse_selections<I, S>(texts: I) -> CoreResult<Filter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut filter = Filter::new();
    for text in texts {
        filter.extend_from(text.as_ref())?;
    }
    debug!(filter = %filter, "parsed selections");
    Ok(filter)
}

impl FromStr for Filter {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selection(s)
    }
}

impl TryFrom<String> for Filter {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse_selection(&s)
    }
}

impl From<Filter> for String {
    fn from(f: Filter) -> Self {
        f.to_string()
    }
}

/// Canonical form: sorted includes, then sorted `-`-prefixed excludes.
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self
            .include
            .iter()
            .map(|t| t.as_str().to_owned())
            .chain(self.exclude.iter().map(|t| format!("-{t}")));

        for (i, term) in terms.enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&term)?;
        }
        Ok(())
    }
}
