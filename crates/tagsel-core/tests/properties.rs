//! Property-based tests for the selection algebra.

use proptest::prelude::*;
use tagsel_core::{Filter, PhaseFilters, parse_selection, phase_filters, select};
use tagsel_model::{Phase, Tag, TagSet};

// ── Strategies ──────────────────────────────────────────────────────────────

/// Small alphabet so generated tags and filters actually overlap.
fn arb_tag_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("standard"),
        Just("at_install"),
        Just("post_install"),
        Just("base"),
        Just("nodatabase"),
        Just("slow"),
        Just("stock"),
        Just("nightly"),
    ]
}

/// Same alphabet without the phase tags.
fn arb_plain_tag_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("standard"),
        Just("base"),
        Just("slow"),
        Just("stock"),
        Just("nightly"),
    ]
}

fn arb_tagset() -> impl Strategy<Value = TagSet> {
    prop::collection::vec(arb_tag_name(), 0..6)
        .prop_map(|names| names.into_iter().map(|n| Tag::new(n).unwrap()).collect())
}

fn arb_term(names: impl Strategy<Value = &'static str>) -> impl Strategy<Value = String> {
    (prop_oneof![Just(""), Just("+"), Just("-")], names)
        .prop_map(|(sign, name)| format!("{sign}{name}"))
}

fn arb_selection() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_term(arb_tag_name()), 0..6).prop_map(|terms| terms.join(","))
}

fn arb_plain_selection() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_term(arb_plain_tag_name()), 0..6)
        .prop_map(|terms| terms.join(" , "))
}

// ── Property tests ───────────────────────────────────────────────────────────

proptest! {
    /// Evaluation is deterministic.
    #[test]
    fn select_is_deterministic(tags in arb_tagset(), expr in arb_selection()) {
        let f = parse_selection(&expr).unwrap();
        prop_assert_eq!(select(&tags, &f), select(&tags, &f));
        prop_assert_eq!(select(&tags, &f), select(&tags.clone(), &f.clone()));
    }

    /// The empty selection picks exactly the `standard` units.
    #[test]
    fn empty_selection_is_standard(tags in arb_tagset()) {
        let f = parse_selection("").unwrap();
        prop_assert_eq!(select(&tags, &f), tags.contains("standard"));
    }

    /// A present excluded tag always rejects, whatever else the filter says.
    #[test]
    fn exclusion_is_absolute(
        tags in arb_tagset(),
        expr in arb_selection(),
        x in arb_tag_name(),
    ) {
        prop_assume!(tags.contains(x));
        let f = parse_selection(&format!("{expr},-{x}").trim_start_matches(',')).unwrap();
        prop_assert!(!select(&tags, &f));
    }

    /// Growing a non-empty include side never deselects a unit.
    #[test]
    fn include_is_monotonic(
        tags in arb_tagset(),
        base in prop::collection::vec(arb_plain_tag_name(), 1..4),
        extra in prop::collection::vec(arb_plain_tag_name(), 0..4),
        excluded in prop::collection::vec(arb_tag_name(), 0..3),
    ) {
        let mut f1 = Filter::new();
        for name in &base {
            f1 = f1.with_include(Tag::new(*name).unwrap());
        }
        let mut f2 = f1.clone();
        for name in &extra {
            f2 = f2.with_include(Tag::new(*name).unwrap());
        }
        for name in &excluded {
            if !f2.include().contains(name) {
                f1 = f1.with_exclude(Tag::new(*name).unwrap());
                f2 = f2.with_exclude(Tag::new(*name).unwrap());
            }
        }

        prop_assert_eq!(f1.exclude(), f2.exclude());
        if select(&tags, &f1) {
            prop_assert!(select(&tags, &f2));
        }
    }

    /// Canonical formatting re-parses to the same filter.
    #[test]
    fn canonical_form_roundtrips(expr in arb_selection()) {
        let f = parse_selection(&expr).unwrap();
        let again = parse_selection(&f.to_string()).unwrap();
        prop_assert_eq!(&f, &again);
        prop_assert_eq!(f.to_string(), again.to_string());
    }

    /// Without user-mentioned phase tags, no unit runs in both phases.
    #[test]
    fn phases_are_disjoint(tags in arb_tagset(), expr in arb_plain_selection()) {
        let user = parse_selection(&expr).unwrap();
        let filters = PhaseFilters::new(&user);
        let s = filters.schedule(&tags);
        prop_assert!(!(s.install && s.post_install), "{} ran in both phases under {:?}", tags, expr);

        if tags.contains("at_install") || tags.contains("post_install") {
            let (install, post) = phase_filters(&user);
            prop_assert!(!(select(&tags, &install) && select(&tags, &post)));
            prop_assert_eq!(select(&tags, &install), filters.runs_in(Phase::Install, &tags));
        }
    }

    /// The coordinator agrees with the evaluator on the unit's own tags.
    #[test]
    fn runs_in_matches_derived_filter(tags in arb_tagset(), expr in arb_selection()) {
        let user = parse_selection(&expr).unwrap();
        let filters = PhaseFilters::new(&user);
        let (install, post) = phase_filters(&user);

        prop_assert_eq!(filters.runs_in(Phase::Install, &tags), select(&tags, &install));
        if tags.contains("at_install") || tags.contains("post_install") {
            prop_assert_eq!(filters.runs_in(Phase::PostInstall, &tags), select(&tags, &post));
        } else {
            prop_assert!(!filters.runs_in(Phase::PostInstall, &tags));
        }

        let empty = TagSet::new();
        prop_assert!(filters.schedule(&empty).is_skipped());
    }
}
