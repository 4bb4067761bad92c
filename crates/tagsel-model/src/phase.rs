use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{AT_INSTALL, POST_INSTALL, Tag};

/// One of the two scheduled passes over the test corpus.
///
/// - `Install`: right after the fixture under test is initialized.
/// - `PostInstall`: after every fixture is initialized.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Install,
    PostInstall,
}

impl Phase {
    /// Both phases in execution order.
    pub const ALL: [Phase; 2] = [Phase::Install, Phase::PostInstall];

    /// Name of the tag that marks a unit as eligible for this phase.
    pub const fn tag_name(self) -> &'static str {
        match self {
            Phase::Install => AT_INSTALL,
            Phase::PostInstall => POST_INSTALL,
        }
    }

    /// The tag that marks a unit as eligible for this phase.
    pub fn tag(self) -> Tag {
        match self {
            Phase::Install => Tag::at_install(),
            Phase::PostInstall => Tag::post_install(),
        }
    }

    /// The other phase.
    pub const fn opposite(self) -> Phase {
        match self {
            Phase::Install => Phase::PostInstall,
            Phase::PostInstall => Phase::Install,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Install => "install",
            Phase::PostInstall => "post-install",
        };
        f.write_str(s)
    }
}
