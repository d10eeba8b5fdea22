//! Automatic reconfiguration of job sets which miss deadlines.
//!
//! The [`Manager`] first checks whether a job set is schedulable. If it is not, two strategies
//! search for a list of [`Solution`]s:
//! - the pessimistic strategy removes uncertainty from the arrival and execution times of the
//!   jobs which lie on a path to a deadline miss;
//! - the graph strategy builds a [`RatingGraph`], cuts it at the points where a worse job was
//!   dispatched instead of a better one, and adds precedence constraints which rule out those
//!   choices.
//!
//! Solutions can be checked independently with [`verify_solution`].
mod attempt;
mod dot;
mod error;
mod graph_cutter;
mod job_sequence;
mod manager;
mod options;
mod rating_graph;
mod solution;
pub mod strategies;
mod sub_graph;
mod verifier;

pub use attempt::generate_precedence_attempts;
pub use attempt::AppliedAttempt;
pub use attempt::PrecedenceAttempt;
pub use dot::write_dot;
pub use error::ReconfigurationError;
pub use graph_cutter::cut_rating_graph;
pub use graph_cutter::sort_cuts_backward;
pub use graph_cutter::RatingGraphCut;
pub use job_sequence::JobSequence;
pub use manager::Manager;
pub use manager::ReconfigurationOutcome;
pub use manager::ReconfigurationStatistics;
pub use options::ReconfigurationOptions;
pub use options::StrategySelection;
pub use rating_graph::RatingGraph;
pub use rating_graph::RatingNodeId;
pub use solution::Solution;
pub use sub_graph::SubGraph;
pub use sub_graph::SubGraphNodeId;
pub use verifier::verify_solution;
