//! The exhaustive search over all admissible dispatch orders of a job set.
//!
//! The search reports to an [`Agent`](crate::agents::Agent) while it runs; every reconfiguration
//! strategy observes and steers the search only through that protocol.
mod explorer;
mod job_set;
mod node;
mod options;
mod result;
pub mod termination;

pub use explorer::explore;
pub use job_set::JobSet;
pub use node::ScheduleNode;
pub use options::ExplorationOptions;
pub use result::ExplorationResult;
pub use result::ExplorationStatistics;
