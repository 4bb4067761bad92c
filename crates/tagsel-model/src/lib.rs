mod domain;
pub use domain::{AT_INSTALL, BASE, NODATABASE, POST_INSTALL, STANDARD};
pub use domain::{Tag, TagSet, TagSpec, UnitId};

mod error;
pub use error::{ModelError, ModelResult};

mod phase;
pub use phase::Phase;
