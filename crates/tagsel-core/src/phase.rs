//! Phase coordinator.
//!
//! The harness runs the corpus twice: an install pass and a post-install pass.
//! For each pass the user filter is extended with the pass's own tag on the
//! include side and the other pass's tag on the exclude side, unless the user
//! already mentioned that tag. User polarity for a phase tag always wins.
use serde::{Deserialize, Serialize};
use tagsel_model::{AT_INSTALL, POST_INSTALL, Phase, TagSet};

use crate::selection::Filter;
use crate::selector::select;

/// Derive the `(install, post_install)` filters for a user filter.
///
/// # Examples
/// ```
/// use tagsel_core::{parse_selection, phase_filters};
///
/// let (install, post) = phase_filters(&parse_selection("slow").unwrap());
/// assert_eq!(install.to_string(), "at_install,slow,-post_install");
/// assert_eq!(post.to_string(), "post_install,slow,-at_install");
/// ```
pub fn phase_filters(filter: &Filter) -> (Filter, Filter) {
    (
        derive(filter, Phase::Install),
        derive(filter, Phase::PostInstall),
    )
}

fn derive(user: &Filter, phase: Phase) -> Filter {
    let mut out = user.clone();
    if !user.mentions(phase.tag_name()) {
        out = out.with_include(phase.tag());
    }
    let other = phase.opposite();
    if !user.mentions(other.tag_name()) {
        out = out.with_exclude(other.tag());
    }
    out
}

/// A set with neither phase tag is never eligible for the post-install pass.
fn eligible(phase: Phase, tags: &TagSet) -> bool {
    phase == Phase::Install || tags.contains(AT_INSTALL) || tags.contains(POST_INSTALL)
}

/// Both phase-specific filters derived from one user filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseFilters {
    install: Filter,
    post_install: Filter,
}

impl PhaseFilters {
    pub fn new(user: &Filter) -> Self {
        let (install, post_install) = phase_filters(user);
        Self {
            install,
            post_install,
        }
    }

    /// The derived filter for `phase`.
    pub fn for_phase(&self, phase: Phase) -> &Filter {
        match phase {
            Phase::Install => &self.install,
            Phase::PostInstall => &self.post_install,
        }
    }

    /// Returns `true` if a unit with `tags` runs during `phase`.
    ///
    /// The unit's own tags are evaluated against the derived filter.
    pub fn runs_in(&self, phase: Phase, tags: &TagSet) -> bool {
        eligible(phase, tags) && select(tags, self.for_phase(phase))
    }

    /// Evaluate a unit against both phases.
    pub fn schedule(&self, tags: &TagSet) -> Schedule {
        Schedule {
            install: self.runs_in(Phase::Install, tags),
            post_install: self.runs_in(Phase::PostInstall, tags),
        }
    }
}

impl From<&Filter> for PhaseFilters {
    fn from(user: &Filter) -> Self {
        Self::new(user)
    }
}

/// Where a single unit runs.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub install: bool,
    pub post_install: bool,
}

impl Schedule {
    pub fn runs_in(&self, phase: Phase) -> bool {
        match phase {
            Phase::Install => self.install,
            Phase::PostInstall => self.post_install,
        }
    }

    /// Phases the unit runs in, in execution order.
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        Phase::ALL.into_iter().filter(move |p| self.runs_in(*p))
    }

    /// Returns `true` if the unit runs in neither phase.
    pub fn is_skipped(&self) -> bool {
        !self.install && !self.post_install
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_selection;
    use tagsel_model::Tag;

    fn set(tags: &[&str]) -> TagSet {
        tags.iter().map(|t| Tag::new(*t).unwrap()).collect()
    }

    fn filters(expr: &str) -> PhaseFilters {
        PhaseFilters::new(&parse_selection(expr).unwrap())
    }

    #[test]
    fn empty_filter_gains_phase_tags() {
        let (install, post) = phase_filters(&Filter::new());
        assert_eq!(install.to_string(), "at_install,-post_install");
        assert_eq!(post.to_string(), "post_install,-at_install");
    }

    #[test]
    fn user_polarity_for_phase_tags_wins() {
        let (install, post) = phase_filters(&parse_selection("-at_install").unwrap());
        assert_eq!(install.to_string(), "-at_install,-post_install");
        assert_eq!(post.to_string(), "post_install,-at_install");

        let (install, post) = phase_filters(&parse_selection("post_install").unwrap());
        assert_eq!(install.to_string(), "at_install,post_install");
        assert_eq!(post.to_string(), "post_install,-at_install");
    }

    #[test]
    fn default_unit_runs_at_install_only() {
        let s = filters("").schedule(&TagSet::default_seed());
        assert_eq!(
            s,
            Schedule {
                install: true,
                post_install: false
            }
        );
        assert_eq!(s.phases().collect::<Vec<_>>(), [Phase::Install]);
    }

    #[test]
    fn post_install_unit_runs_post_install_only() {
        let tags = set(&["standard", "base", "post_install", "slow"]);
        let f = filters("");
        assert!(!f.runs_in(Phase::Install, &tags));
        assert!(f.runs_in(Phase::PostInstall, &tags));
    }

    #[test]
    fn unit_with_both_phase_tags_is_excluded_from_both() {
        let tags = set(&["standard", "at_install", "post_install"]);
        assert!(filters("").schedule(&tags).is_skipped());
    }

    #[test]
    fn unit_without_phase_tags_never_runs_post_install() {
        let tags = set(&["standard", "slow"]);
        let s = filters("slow").schedule(&tags);
        assert!(s.install);
        assert!(!s.post_install);

        let s = filters("post_install,slow").schedule(&tags);
        assert!(s.install);
        assert!(!s.post_install);
    }

    #[test]
    fn removed_phase_tag_is_not_restored() {
        let f = filters("");
        assert!(f.schedule(&TagSet::new()).is_skipped());
        assert!(f.schedule(&set(&["base"])).is_skipped());
        assert!(!f.runs_in(Phase::Install, &set(&["nightly"])));
    }

    #[test]
    fn exclusions_still_apply_per_phase() {
        let tags = set(&["standard", "at_install", "slow"]);
        assert!(filters("-slow").schedule(&tags).is_skipped());
    }

    #[test]
    fn for_phase_returns_derived_filter() {
        let f = filters("stock");
        assert!(f.for_phase(Phase::Install).include().contains("at_install"));
        assert!(f.for_phase(Phase::PostInstall).exclude().contains("at_install"));
    }
}
