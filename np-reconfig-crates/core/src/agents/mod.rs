//! Observers of a single exploration pass.
//!
//! The explorer calls the hooks of an [`Agent`] synchronously while it visits the nodes of the
//! schedule-abstraction graph. Every node owns an [`Agent::Attachment`], which is created by the
//! agent when the node is created and dropped together with the node. Agents are single-use:
//! every pass constructs a fresh one.
mod cut_check;
mod cut_explore;
mod failure_job_set;
mod failure_search;
mod job_sequence_history;
mod rating_graph;

pub use cut_check::CutCheckAgent;
pub use cut_check::CutCheckOutcome;
pub use cut_check::CutCheckPosition;
pub use cut_explore::CutExploreAgent;
pub use cut_explore::CutExplorePosition;
pub use cut_test::CutTestAgent;
pub use cut_test::CutTestResult;
pub use failure_job_set::FailureJobSetAgent;
pub use failure_search::FailureSearchAgent;
pub use failure_search::FailureSearchAttachment;
pub use job_sequence_history::JobSequenceHistoryAgent;
pub use rating_graph::RatingGraphAgent;

use crate::exploration::ScheduleNode;
use crate::problem::Job;

/// The callback protocol between the explorer and the reconfiguration engine.
///
/// Every hook has a default which does nothing, so an agent only implements the events it is
/// interested in.
pub trait Agent {
    /// The payload which every node of the pass carries.
    type Attachment: Default;

    fn create_initial_node_attachment(&mut self) -> Self::Attachment {
        Self::Attachment::default()
    }

    /// Creates the attachment of the node reached by dispatching `next_job` from `parent`.
    ///
    /// Only called for transitions which passed [`Agent::is_allowed`].
    fn create_next_node_attachment(
        &mut self,
        _parent: &ScheduleNode<Self::Attachment>,
        _next_job: &Job,
    ) -> Self::Attachment {
        Self::Attachment::default()
    }

    /// Called instead of [`Agent::create_next_node_attachment`] when the successor of `parent`
    /// is folded into the existing node `destination`.
    fn merge_node_attachments(
        &mut self,
        _destination: &mut ScheduleNode<Self::Attachment>,
        _parent: &ScheduleNode<Self::Attachment>,
        _next_job: &Job,
    ) {
    }

    /// `late_job` may miss its deadline when dispatched from `node`; no successor is created.
    fn missed_deadline(&mut self, _node: &mut ScheduleNode<Self::Attachment>, _late_job: &Job) {}

    /// Nothing was dispatched from `node`, although it has pending jobs and no deadline was
    /// missed.
    fn encountered_dead_end(&mut self, _node: &mut ScheduleNode<Self::Attachment>) {}

    /// Every job has been dispatched on the paths to `node`.
    fn finished_node(&mut self, _node: &mut ScheduleNode<Self::Attachment>) {}

    /// Whether the explorer may dispatch `next_job` from `node`.
    fn is_allowed(&mut self, _node: &ScheduleNode<Self::Attachment>, _next_job: &Job) -> bool {
        true
    }

    /// Whether the successor of `parent` reached through `taken_job` may be folded into
    /// `destination`, which the explorer considers equivalent.
    fn allow_merge(
        &self,
        _parent: &ScheduleNode<Self::Attachment>,
        _taken_job: &Job,
        _destination: &ScheduleNode<Self::Attachment>,
    ) -> bool {
        true
    }

    /// Whether `job` is held back at `node` as if it had not been released yet.
    ///
    /// A withheld job is not dispatched, and unlike a job rejected by [`Agent::is_allowed`] it
    /// does not keep less urgent jobs from being dispatched. Only consulted when
    /// [`Agent::may_potentially_forbid_jobs`] holds.
    fn is_withheld(&self, _node: &ScheduleNode<Self::Attachment>, _job: &Job) -> bool {
        false
    }

    /// Whether [`Agent::is_allowed`] may return `false` or [`Agent::is_withheld`] may return
    /// `true`.
    ///
    /// Dead ends are then caused by the agent and do not make the job set unschedulable.
    fn may_potentially_forbid_jobs(&self) -> bool {
        false
    }
}

/// An agent which only lets the explorer determine schedulability.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveAgent;

impl Agent for PassiveAgent {
    type Attachment = ();
}
