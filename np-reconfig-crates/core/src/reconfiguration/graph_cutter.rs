use std::cmp::Reverse;

use super::RatingGraph;
use super::RatingNodeId;
use super::SubGraph;
use super::SubGraphNodeId;
use crate::containers::HashMap;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::problem::JobIndex;

/// Ratings closer together than this are treated as equal; averaging in `f32` leaves rounding
/// noise in otherwise identical ratings.
const RATING_TOLERANCE: f32 = 1e-5;

/// A candidate repair: at the end of the prefix `previous_jobs`, dispatching one of the
/// `forbidden_jobs` leads to fewer successful continuations than dispatching one of the
/// `allowed_jobs`.
#[derive(Clone, Debug)]
pub struct RatingGraphCut {
    /// The rating-graph node at which the choice is made.
    pub node: RatingNodeId,
    /// Every path from the root to `node`; its leaf is the point of choice.
    pub previous_jobs: SubGraph,
    pub forbidden_jobs: Vec<JobIndex>,
    pub allowed_jobs: Vec<JobIndex>,
    /// Jobs which were found to fail after the choice when exploring past it.
    pub extra_forbidden_jobs: Vec<JobIndex>,
    /// Jobs which were found to succeed after the choice when exploring past it.
    pub extra_allowed_jobs: Vec<JobIndex>,
}

impl RatingGraphCut {
    pub fn is_forbidden(&self, job: JobIndex) -> bool {
        self.forbidden_jobs.contains(&job) || self.extra_forbidden_jobs.contains(&job)
    }

    pub fn is_allowed(&self, job: JobIndex) -> bool {
        self.allowed_jobs.contains(&job) || self.extra_allowed_jobs.contains(&job)
    }

    /// Whether `job` has been put into one of the four job lists.
    pub fn is_classified(&self, job: JobIndex) -> bool {
        self.is_forbidden(job) || self.is_allowed(job)
    }

    /// The number of jobs dispatched before the point of choice.
    pub fn prefix_length(&self) -> usize {
        self.previous_jobs.length()
    }
}

/// Finds the points of the rated graph at which a job was dispatched although another job with a
/// strictly better rating was available.
///
/// Two ratings only differ when they are further apart than [`RATING_TOLERANCE`].
///
/// The graph is searched depth first from the root. Nodes rated `1.0` need no repair and are not
/// entered, and neither are the children behind a worse choice.
pub fn cut_rating_graph(graph: &RatingGraph) -> Vec<RatingGraphCut> {
    let mut parents = KeyedVec::with_capacity(graph.num_nodes());
    for _ in 0..graph.num_nodes() {
        let _ = parents.push(Vec::new());
    }
    for (parent, _, child) in graph.edges() {
        parents[child].push(parent);
    }

    let mut has_visited = vec![false; graph.num_nodes()];
    let mut cuts = Vec::new();
    let mut stack = vec![RatingNodeId::ROOT];

    while let Some(node) = stack.pop() {
        if has_visited[node.index()] || graph.rating(node) == 1.0 {
            continue;
        }
        has_visited[node.index()] = true;

        let best_child_rating = graph
            .children(node)
            .map(|(_, child)| graph.rating(child))
            .fold(f32::NEG_INFINITY, f32::max);

        let mut forbidden_jobs = Vec::new();
        let mut allowed_jobs = Vec::new();
        let mut next_nodes = Vec::new();
        for (job, child) in graph.children(node) {
            if graph.rating(child) + RATING_TOLERANCE < best_child_rating {
                forbidden_jobs.push(job);
            } else {
                allowed_jobs.push(job);
                next_nodes.push(child);
            }
        }
        stack.extend(next_nodes.into_iter().rev());

        if !forbidden_jobs.is_empty() {
            cuts.push(RatingGraphCut {
                node,
                previous_jobs: previous_jobs(graph, &parents, node),
                forbidden_jobs,
                allowed_jobs,
                extra_forbidden_jobs: Vec::new(),
                extra_allowed_jobs: Vec::new(),
            });
        }
    }

    cuts
}

/// Orders the cuts by the length of their prefix, longest first.
pub fn sort_cuts_backward(cuts: &mut [RatingGraphCut]) {
    cuts.sort_by_key(|cut| Reverse(cut.prefix_length()));
}

/// Builds the sub-graph of all paths from the root to `cut_node`.
///
/// The ancestors are numbered in descending order, starting at `cut_node`, so that every ancestor
/// can be attached to one of its already numbered children; reversing the result makes the root
/// the first node.
fn previous_jobs(
    graph: &RatingGraph,
    parents: &KeyedVec<RatingNodeId, Vec<RatingNodeId>>,
    cut_node: RatingNodeId,
) -> SubGraph {
    let mut ancestors: HashSet<RatingNodeId> = HashSet::default();
    let mut pending = vec![cut_node];
    while let Some(node) = pending.pop() {
        for &parent in &parents[node] {
            if ancestors.insert(parent) {
                pending.push(parent);
            }
        }
    }

    let mut ancestors = ancestors.into_iter().collect::<Vec<_>>();
    ancestors.sort_unstable_by_key(|&node| Reverse(node));

    let mut sub_graph_nodes: HashMap<RatingNodeId, SubGraphNodeId> = HashMap::default();
    let _ = sub_graph_nodes.insert(cut_node, SubGraphNodeId::ROOT);

    let mut backwards = SubGraph::default();
    for node in ancestors {
        let mut sub_graph_node = None;
        for (job, child) in graph.children(node) {
            let Some(&child_node) = sub_graph_nodes.get(&child) else {
                continue;
            };

            match sub_graph_node {
                None => sub_graph_node = Some(backwards.add_edge_to_new_node(child_node, job)),
                Some(existing) => {
                    backwards.add_edge_between_existing_nodes(child_node, existing, job)
                }
            }
        }

        if let Some(sub_graph_node) = sub_graph_node {
            let _ = sub_graph_nodes.insert(node, sub_graph_node);
        }
    }

    backwards.reversed()
}
