//! Selector evaluator: decides whether a unit's tags satisfy a [`Filter`].
use tagsel_model::{STANDARD, TagSet};
use tracing::trace;

use crate::selection::Filter;

/// Decide whether a unit with effective tags `tags` is selected by `filter`.
///
/// Rules, in order:
/// 1. Any excluded tag present in `tags` rejects the unit.
/// 2. An empty include side behaves like `{standard}`.
/// 3. Otherwise the unit is selected iff it carries at least one included tag.
///
/// Pure and total: equal inputs always give equal outputs.
///
/// # Examples
/// ```
/// use tagsel_core::{parse_selection, select};
/// use tagsel_model::TagSet;
///
/// let tags = TagSet::default_seed();
/// assert!(select(&tags, &parse_selection("").unwrap()));
/// assert!(!select(&tags, &parse_selection("slow").unwrap()));
/// assert!(!select(&tags, &parse_selection("-at_install").unwrap()));
/// ```
pub fn select(tags: &TagSet, filter: &Filter) -> bool {
    if let Some(hit) = filter.exclude().iter().find(|t| tags.contains(t.as_str())) {
        trace!(tags = %tags, excluded = %hit, "unit rejected by exclusion");
        return false;
    }

    let selected = if filter.include().is_empty() {
        tags.contains(STANDARD)
    } else {
        tags.intersects(filter.include())
    };
    trace!(
        tags = %tags,
        filter = %filter,
        fallback = filter.include().is_empty(),
        selected,
        "unit evaluated"
    );
    selected
}

impl Filter {
    /// Method form of [`select`].
    #[inline]
    pub fn matches(&self, tags: &TagSet) -> bool {
        select(tags, self)
    }
}
