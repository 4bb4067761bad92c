//! Tag attacher: resolves a unit's effective [`TagSet`] from its specifiers.
//!
//! Resolution is eager. A child's set is computed from its parent's already
//! effective set at declaration time, never looked up lazily during selection.
use tagsel_model::{AT_INSTALL, POST_INSTALL, TagSet, TagSpec};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};

/// Resolve the effective tags of `unit`.
///
/// - The starting set is `inherited` when the unit has a parent, otherwise
///   [`TagSet::default_seed`] (`{standard, at_install, base}`).
/// - Specifiers are applied left-to-right: `X` adds, `-X` removes, the last
///   occurrence of a tag wins.
///
/// Every specifier is validated before any is applied; the first malformed one
/// aborts the declaration with [`CoreError::InvalidTag`] naming it and the unit.
///
/// # Examples
/// ```
/// use tagsel_core::tag;
///
/// let tags = tag("stock.TestMove", None, ["-at_install", "post_install"]).unwrap();
/// assert!(tags.contains("post_install"));
/// assert!(!tags.contains("at_install"));
/// assert!(tags.contains("standard"));
/// ```
pub fn tag<I, S>(unit: &str, inherited: Option<&TagSet>, specifiers: I) -> CoreResult<TagSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let specs = specifiers
        .into_iter()
        .map(|s| parse_specifier(unit, s.as_ref()))
        .collect::<CoreResult<Vec<_>>>()?;

    let mut tags = match inherited {
        Some(parent) => parent.clone(),
        None => TagSet::default_seed(),
    };
    for spec in &specs {
        spec.apply(&mut tags);
    }

    if tags.contains(AT_INSTALL) == tags.contains(POST_INSTALL) {
        warn!(
            unit,
            tags = %tags,
            "a test should be either at_install or post_install"
        );
    }
    debug!(unit, specifiers = specs.len(), tags = %tags, "resolved unit tags");
    Ok(tags)
}

fn parse_specifier(unit: &str, raw: &str) -> CoreResult<TagSpec> {
    raw.parse::<TagSpec>()
        .map_err(|tagsel_model::ModelError::InvalidTag { reason, .. }| CoreError::InvalidTag {
            unit: unit.to_owned(),
            specifier: raw.to_owned(),
            reason: reason.to_owned(),
        })
}
