use log::debug;

use super::Agent;
use crate::exploration::explore;
use crate::exploration::ScheduleNode;
use crate::problem::Job;
use crate::problem::JobIndex;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::RatingGraphCut;
use crate::reconfiguration::ReconfigurationError;
use crate::reconfiguration::ReconfigurationOptions;
use crate::reconfiguration::SubGraphNodeId;

/// Where a node lies relative to the cut being explored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutExplorePosition {
    Prefix(SubGraphNodeId),
    /// Past the point of choice, where the unclassified job `first_job` was dispatched.
    Continued { first_job: JobIndex, has_failed: bool },
    /// Past the point of choice, behind a job which is already classified.
    Diverged,
}

impl Default for CutExplorePosition {
    fn default() -> Self {
        CutExplorePosition::Prefix(SubGraphNodeId::ROOT)
    }
}

/// Explores past the point of choice of a cut and classifies the jobs dispatched there by
/// whether anything behind them fails.
///
/// At the point of choice the forbidden jobs are withheld rather than rejected, as they would be
/// once a precedence constraint delays them, so less urgent jobs they used to block become
/// candidates as well.
#[derive(Debug)]
pub struct CutExploreAgent<'cut> {
    cut: &'cut RatingGraphCut,
    new_good_jobs: Vec<JobIndex>,
    new_bad_jobs: Vec<JobIndex>,
}

impl<'cut> CutExploreAgent<'cut> {
    /// Widens `cut` until a pass discovers no new bad job, and returns the number of passes.
    ///
    /// Good jobs are added to the extra allowed jobs of the cut, bad jobs to its extra forbidden
    /// jobs.
    pub fn explore(
        problem: &SchedulingProblem,
        cut: &mut RatingGraphCut,
        options: &ReconfigurationOptions,
    ) -> Result<usize, ReconfigurationError> {
        let exploration_options = options.exploration_options().with_early_exit(false);

        let mut num_passes = 0;
        loop {
            let mut agent = CutExploreAgent {
                cut,
                new_good_jobs: Vec::new(),
                new_bad_jobs: Vec::new(),
            };

            let result = explore(problem, exploration_options, &mut agent);
            num_passes += 1;
            if result.was_timed_out() {
                return Err(ReconfigurationError::AnalysisTimedOut);
            }

            let CutExploreAgent {
                new_good_jobs,
                new_bad_jobs,
                ..
            } = agent;
            debug!(
                "Explored past the cut: good jobs {new_good_jobs:?}, bad jobs {new_bad_jobs:?}"
            );

            cut.extra_allowed_jobs.extend(new_good_jobs);
            if new_bad_jobs.is_empty() {
                return Ok(num_passes);
            }
            cut.extra_forbidden_jobs.extend(new_bad_jobs);
        }
    }

    fn successor_position(&self, parent: CutExplorePosition, job: JobIndex) -> CutExplorePosition {
        match parent {
            CutExplorePosition::Prefix(node) if self.cut.previous_jobs.is_leaf(node) => {
                if self.cut.is_classified(job) {
                    CutExplorePosition::Diverged
                } else {
                    CutExplorePosition::Continued {
                        first_job: job,
                        has_failed: false,
                    }
                }
            }
            CutExplorePosition::Prefix(node) => self
                .cut
                .previous_jobs
                .can_take_job(node, job)
                .map_or(CutExplorePosition::Diverged, CutExplorePosition::Prefix),
            continued_or_diverged => continued_or_diverged,
        }
    }

    fn failed_node(&mut self, node: &mut ScheduleNode<CutExplorePosition>) {
        if let CutExplorePosition::Continued {
            first_job,
            has_failed,
        } = node.attachment_mut()
        {
            *has_failed = true;

            let first_job = *first_job;
            if let Some(position) = self.new_good_jobs.iter().position(|&job| job == first_job) {
                let _ = self.new_good_jobs.remove(position);
                self.new_bad_jobs.push(first_job);
            }
        }
    }
}

impl Agent for CutExploreAgent<'_> {
    type Attachment = CutExplorePosition;

    fn create_next_node_attachment(
        &mut self,
        parent: &ScheduleNode<CutExplorePosition>,
        next_job: &Job,
    ) -> CutExplorePosition {
        let position = self.successor_position(*parent.attachment(), next_job.index());

        if let (CutExplorePosition::Prefix(_), CutExplorePosition::Continued { first_job, .. }) =
            (parent.attachment(), position)
        {
            if !self.new_good_jobs.contains(&first_job) && !self.new_bad_jobs.contains(&first_job)
            {
                self.new_good_jobs.push(first_job);
            }
        }

        position
    }

    fn missed_deadline(&mut self, node: &mut ScheduleNode<CutExplorePosition>, _late_job: &Job) {
        self.failed_node(node);
    }

    fn encountered_dead_end(&mut self, node: &mut ScheduleNode<CutExplorePosition>) {
        self.failed_node(node);
    }

    fn is_withheld(&self, node: &ScheduleNode<CutExplorePosition>, job: &Job) -> bool {
        match *node.attachment() {
            CutExplorePosition::Prefix(node) => {
                self.cut.previous_jobs.is_leaf(node) && self.cut.is_forbidden(job.index())
            }
            CutExplorePosition::Continued { .. } | CutExplorePosition::Diverged => false,
        }
    }

    fn is_allowed(&mut self, node: &ScheduleNode<CutExplorePosition>, next_job: &Job) -> bool {
        match *node.attachment() {
            CutExplorePosition::Prefix(node) if self.cut.previous_jobs.is_leaf(node) => true,
            CutExplorePosition::Prefix(node) => self
                .cut
                .previous_jobs
                .can_take_job(node, next_job.index())
                .is_some(),
            CutExplorePosition::Continued { has_failed, .. } => !has_failed,
            CutExplorePosition::Diverged => false,
        }
    }

    fn allow_merge(
        &self,
        parent: &ScheduleNode<CutExplorePosition>,
        taken_job: &Job,
        destination: &ScheduleNode<CutExplorePosition>,
    ) -> bool {
        let is_failed = |position: CutExplorePosition| {
            matches!(
                position,
                CutExplorePosition::Continued {
                    has_failed: true,
                    ..
                }
            )
        };

        !is_failed(*parent.attachment())
            && !is_failed(*destination.attachment())
            && self.successor_position(*parent.attachment(), taken_job.index())
                == *destination.attachment()
    }

    fn may_potentially_forbid_jobs(&self) -> bool {
        true
    }
}
