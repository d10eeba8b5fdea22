use log::debug;

use super::Agent;
use crate::exploration::explore;
use crate::exploration::ScheduleNode;
use crate::problem::Job;
use crate::problem::SchedulingProblem;
use crate::reconfiguration::RatingGraph;
use crate::reconfiguration::RatingNodeId;
use crate::reconfiguration::ReconfigurationError;
use crate::reconfiguration::ReconfigurationOptions;

/// Records the explored graph into a [`RatingGraph`].
///
/// Transitions from nodes which missed a deadline are not explored any further, and such nodes
/// are never merged with others.
#[derive(Debug, Default)]
pub struct RatingGraphAgent {
    rating_graph: RatingGraph,
}

impl RatingGraphAgent {
    /// Explores `problem` without stopping at deadline misses and rates the resulting graph.
    pub fn generate(
        problem: &SchedulingProblem,
        options: &ReconfigurationOptions,
    ) -> Result<RatingGraph, ReconfigurationError> {
        let mut agent = RatingGraphAgent::default();

        let result = explore(
            problem,
            options.exploration_options().with_early_exit(false),
            &mut agent,
        );
        if result.was_timed_out() {
            return Err(ReconfigurationError::AnalysisTimedOut);
        }

        agent.rating_graph.compute_ratings();
        debug!(
            "Built a rating graph with {} nodes and {} edges, root rating {}",
            agent.rating_graph.num_nodes(),
            agent.rating_graph.num_edges(),
            agent.rating_graph.rating(RatingNodeId::ROOT)
        );

        Ok(agent.rating_graph)
    }
}

impl Agent for RatingGraphAgent {
    type Attachment = RatingNodeId;

    fn create_next_node_attachment(
        &mut self,
        parent: &ScheduleNode<RatingNodeId>,
        next_job: &Job,
    ) -> RatingNodeId {
        self.rating_graph
            .add_node(*parent.attachment(), next_job.index())
    }

    fn merge_node_attachments(
        &mut self,
        destination: &mut ScheduleNode<RatingNodeId>,
        parent: &ScheduleNode<RatingNodeId>,
        next_job: &Job,
    ) {
        self.rating_graph.insert_edge(
            *parent.attachment(),
            *destination.attachment(),
            next_job.index(),
        );
    }

    fn missed_deadline(&mut self, node: &mut ScheduleNode<RatingNodeId>, _late_job: &Job) {
        self.rating_graph.set_missed_deadline(*node.attachment());
    }

    fn finished_node(&mut self, node: &mut ScheduleNode<RatingNodeId>) {
        self.rating_graph.set_successful(*node.attachment());
    }

    fn is_allowed(&mut self, node: &ScheduleNode<RatingNodeId>, next_job: &Job) -> bool {
        !self
            .rating_graph
            .will_miss_deadline(*node.attachment(), next_job.index())
    }

    fn allow_merge(
        &self,
        parent: &ScheduleNode<RatingNodeId>,
        taken_job: &Job,
        destination: &ScheduleNode<RatingNodeId>,
    ) -> bool {
        !self.rating_graph.has_missed_deadline(*destination.attachment())
            && !self
                .rating_graph
                .will_miss_deadline(*parent.attachment(), taken_job.index())
    }
}
