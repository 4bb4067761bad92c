pub mod attach;
pub mod error;
pub mod phase;
pub mod plan;
pub mod registry;
pub mod selection;
pub mod selector;

pub use attach::tag;
pub use error::{CoreError, CoreResult};
pub use phase::{PhaseFilters, Schedule, phase_filters};
pub use plan::PhasePlan;
pub use registry::{Declaration, TestUnit, UnitRegistry};
pub use selection::{Filter, parse_selection, parse_selections};
pub use selector::select;
