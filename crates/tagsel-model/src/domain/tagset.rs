use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::domain::Tag;
use crate::domain::constants::DEFAULT_SEED;

/// Unordered set of [`Tag`]s attached to a test unit, based on [`BTreeSet`].
///
/// The set operations are pure: [`TagSet::union`], [`TagSet::with`] and
/// [`TagSet::remove`] return a fresh set and leave the receiver untouched.
/// Iteration order is lexicographic, which keeps diagnostics stable.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// The seed of a unit with no parent: `{standard, at_install, base}`.
    pub fn default_seed() -> Self {
        DEFAULT_SEED.into_iter().map(Tag::known).collect()
    }

    /// Returns `true` if the set holds a tag with this name.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Returns `true` if at least one tag is present in both sets.
    pub fn intersects(&self, other: &TagSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|t| large.contains(t.as_str()))
    }

    /// Set union.
    pub fn union(&self, other: &TagSet) -> TagSet {
        TagSet(self.0.union(&other.0).cloned().collect())
    }

    /// Copy of this set with `tag` added.
    pub fn with(&self, tag: Tag) -> TagSet {
        let mut out = self.clone();
        out.0.insert(tag);
        out
    }

    /// Copy of this set without `tag`; a no-op if it is absent.
    pub fn remove(&self, tag: &str) -> TagSet {
        let mut out = self.clone();
        out.0.remove(tag);
        out
    }

    /// Insert a tag in place. Intended for construction only.
    ///
    /// Returns `self` for chaining.
    pub fn insert(&mut self, tag: Tag) -> &mut Self {
        self.0.insert(tag);
        self
    }

    /// Remove a tag in place. Intended for construction only.
    pub fn discard(&mut self, tag: &str) -> &mut Self {
        self.0.remove(tag);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate through all tags in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Tag> for TagSet {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = std::collections::btree_set::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::collections::btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tag.as_str())?;
        }
        f.write_str("}")
    }
}
