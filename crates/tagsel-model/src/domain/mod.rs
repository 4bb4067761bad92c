mod tag;
pub use tag::Tag;

mod tagset;
pub use tagset::TagSet;

mod spec;
pub use spec::TagSpec;

pub(crate) mod constants;
pub use constants::{AT_INSTALL, BASE, NODATABASE, POST_INSTALL, STANDARD};

/// Stable identity of a test unit (class, method or group).
///
/// Typically a dotted path such as `stock.tests.TestMove.test_confirm`.
/// The model does not interpret it beyond equality.
pub type UnitId = String;
