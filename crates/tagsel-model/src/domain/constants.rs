//! Reserved tag names.
//!
//! These names are bit-stable: selection strings in CI scripts refer to them
//! literally, so they must never be renamed.

/// Present on every unit unless explicitly removed; the default selection.
pub const STANDARD: &str = "standard";

/// Marks a unit as eligible for the install-time phase. Seeded by default.
pub const AT_INSTALL: &str = "at_install";

/// Marks a unit as eligible for the post-install phase. Opt-in only.
pub const POST_INSTALL: &str = "post_install";

/// Legacy origin marker. Seeded by default, otherwise an ordinary tag.
pub const BASE: &str = "base";

/// The unit does not need the surrounding data fixture.
///
/// Ordinary tag for selection purposes; harnesses may consult it separately.
pub const NODATABASE: &str = "nodatabase";

/// Tags seeded onto a unit that has no parent.
pub const DEFAULT_SEED: [&str; 3] = [STANDARD, AT_INSTALL, BASE];
