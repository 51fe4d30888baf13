pub mod dates;
pub mod dependency;
pub mod phase;
pub mod project;

pub use dates::{add_days, DateRange, PhaseDates};
pub use dependency::{find_cycle, validate_dependencies, Dependency};
pub use phase::{Phase, PhaseStatus, DEFAULT_PHASE_COLOR};
pub use project::Project;
