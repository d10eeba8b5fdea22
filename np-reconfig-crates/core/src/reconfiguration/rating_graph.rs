#![allow(clippy::double_parens, reason = "originates inside the bitfield macro")]

use bitfield_struct::bitfield;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::np_assert_moderate;
use crate::np_assert_simple;
use crate::problem::JobIndex;

/// Rating of a node at which a deadline was missed, until [`RatingGraph::compute_ratings`] turns
/// it into `0.0`.
const MISSED_DEADLINE: f32 = -1.0;
const SUCCESSFUL: f32 = 1.0;

/// Identifies a node of a [`RatingGraph`]; children always have a larger identifier than their
/// parents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RatingNodeId(usize);

impl RatingNodeId {
    pub const ROOT: RatingNodeId = RatingNodeId(0);
}

impl StorageKey for RatingNodeId {
    fn index(&self) -> usize {
        self.0
    }

    fn create_from_index(index: usize) -> Self {
        RatingNodeId(index)
    }
}

/// An edge of the rating graph, packed into a single word.
#[bitfield(u128)]
struct RatingEdge {
    #[bits(40)]
    parent: u64,
    #[bits(40)]
    child: u64,
    #[bits(24)]
    taken_job: u32,
    #[bits(24)]
    __: u32,
}

impl RatingEdge {
    fn between(parent: RatingNodeId, child: RatingNodeId, taken_job: JobIndex) -> RatingEdge {
        RatingEdge::new()
            .with_parent(parent.0 as u64)
            .with_child(child.0 as u64)
            .with_taken_job(taken_job as u32)
    }

    fn parent_node(&self) -> RatingNodeId {
        RatingNodeId(self.parent() as usize)
    }

    fn child_node(&self) -> RatingNodeId {
        RatingNodeId(self.child() as usize)
    }

    fn job(&self) -> JobIndex {
        self.taken_job() as JobIndex
    }
}

/// The decision space of an exploration, compressed into a graph whose nodes are rated by the
/// fraction of their continuations which meet every deadline.
///
/// The edges are stored in one flat list which is kept sorted by parent, so the children of a
/// node form a contiguous range.
#[derive(Clone, Debug)]
pub struct RatingGraph {
    ratings: KeyedVec<RatingNodeId, f32>,
    edges: Vec<RatingEdge>,
}

impl Default for RatingGraph {
    fn default() -> Self {
        let mut ratings = KeyedVec::default();
        let _ = ratings.push(0.0);
        RatingGraph {
            ratings,
            edges: Vec::new(),
        }
    }
}

impl RatingGraph {
    pub fn num_nodes(&self) -> usize {
        self.ratings.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = RatingNodeId> {
        self.ratings.keys()
    }

    /// Adds a child of `parent` which is reached by taking `taken_job`.
    ///
    /// When that transition is already known to miss a deadline, no node is created and `parent`
    /// is returned instead.
    pub fn add_node(&mut self, parent: RatingNodeId, taken_job: JobIndex) -> RatingNodeId {
        if self.will_miss_deadline(parent, taken_job) {
            return parent;
        }

        let child = self.ratings.push(0.0);
        self.insert_edge(parent, child, taken_job);
        child
    }

    /// Records that `child` can also be reached from `parent` by taking `taken_job`.
    pub fn insert_edge(&mut self, parent: RatingNodeId, child: RatingNodeId, taken_job: JobIndex) {
        np_assert_simple!(self.ratings.contains_key(parent));
        np_assert_simple!(self.ratings.contains_key(child));
        np_assert_simple!(parent < child);

        let edge = RatingEdge::between(parent, child, taken_job);
        let position = self.edges.partition_point(|edge| edge.parent_node() <= parent);
        if position == self.edges.len() {
            self.edges.push(edge);
        } else {
            self.edges.insert(position, edge);
        }
    }

    pub fn set_missed_deadline(&mut self, node: RatingNodeId) {
        self.ratings[node] = MISSED_DEADLINE;
    }

    /// Marks the children of `node` as successful, or `node` itself when it has no children.
    pub fn set_successful(&mut self, node: RatingNodeId) {
        let children = self.children(node).map(|(_, child)| child).collect::<Vec<_>>();
        if children.is_empty() {
            self.ratings[node] = SUCCESSFUL;
        }
        for child in children {
            self.ratings[child] = SUCCESSFUL;
        }
    }

    /// Whether `parent` missed a deadline, or taking `candidate_job` from it is known to.
    pub fn will_miss_deadline(&self, parent: RatingNodeId, candidate_job: JobIndex) -> bool {
        self.ratings[parent] == MISSED_DEADLINE
            || self.children(parent).any(|(taken_job, child)| {
                taken_job == candidate_job && self.ratings[child] == MISSED_DEADLINE
            })
    }

    pub fn has_missed_deadline(&self, node: RatingNodeId) -> bool {
        self.ratings[node] == MISSED_DEADLINE
    }

    /// Replaces the provisional ratings by the fraction of successful continuations.
    ///
    /// Every child has a larger identifier than its parents, so visiting the nodes in descending
    /// order rates all children before their parents.
    pub fn compute_ratings(&mut self) {
        np_assert_moderate!(self
            .edges
            .windows(2)
            .all(|pair| pair[0].parent_node() <= pair[1].parent_node()));

        for node in self.ratings.keys().rev() {
            if self.ratings[node] == MISSED_DEADLINE {
                self.ratings[node] = 0.0;
                continue;
            }

            let (sum, num_children) = self
                .children(node)
                .fold((0.0, 0), |(sum, count), (_, child)| {
                    (sum + self.ratings[child], count + 1)
                });
            if num_children > 0 {
                self.ratings[node] = sum / num_children as f32;
            }
        }
    }

    pub fn rating(&self, node: RatingNodeId) -> f32 {
        self.ratings[node]
    }

    /// The outgoing edges of `node` as pairs of the taken job and the child.
    pub fn children(
        &self,
        node: RatingNodeId,
    ) -> impl Iterator<Item = (JobIndex, RatingNodeId)> + '_ {
        let start = self.edges.partition_point(|edge| edge.parent_node() < node);
        let end = self.edges.partition_point(|edge| edge.parent_node() <= node);
        self.edges[start..end]
            .iter()
            .map(|edge| (edge.job(), edge.child_node()))
    }

    /// The incoming edges of `node` as pairs of the taken job and the parent.
    ///
    /// This scans every edge; callers which need the parents of many nodes should index them once.
    pub fn parents(
        &self,
        node: RatingNodeId,
    ) -> impl Iterator<Item = (JobIndex, RatingNodeId)> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.child_node() == node)
            .map(|edge| (edge.job(), edge.parent_node()))
    }

    /// All edges as triples of parent, taken job and child.
    pub fn edges(&self) -> impl Iterator<Item = (RatingNodeId, JobIndex, RatingNodeId)> + '_ {
        self.edges
            .iter()
            .map(|edge| (edge.parent_node(), edge.job(), edge.child_node()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_packed_into_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<RatingEdge>(), 16);

        let edge = RatingEdge::between(
            RatingNodeId((1 << 40) - 1),
            RatingNodeId(123_456_789),
            (1 << 24) - 1,
        );
        assert_eq!(edge.parent_node(), RatingNodeId((1 << 40) - 1));
        assert_eq!(edge.child_node(), RatingNodeId(123_456_789));
        assert_eq!(edge.job(), (1 << 24) - 1);
    }

    #[test]
    fn ratings_average_over_children() {
        let mut graph = RatingGraph::default();
        let good = graph.add_node(RatingNodeId::ROOT, 0);
        let mixed = graph.add_node(RatingNodeId::ROOT, 1);
        let good_after_mixed = graph.add_node(mixed, 0);
        let bad_after_mixed = graph.add_node(mixed, 2);

        graph.set_successful(good);
        graph.set_successful(good_after_mixed);
        graph.set_missed_deadline(bad_after_mixed);
        graph.compute_ratings();

        assert_eq!(graph.rating(good), 1.0);
        assert_eq!(graph.rating(bad_after_mixed), 0.0);
        assert_eq!(graph.rating(mixed), 0.5);
        assert_eq!(graph.rating(RatingNodeId::ROOT), 0.75);
    }

    #[test]
    fn an_only_child_passes_its_rating_on() {
        let mut graph = RatingGraph::default();
        let child = graph.add_node(RatingNodeId::ROOT, 3);
        graph.set_successful(child);
        graph.compute_ratings();

        assert_eq!(graph.rating(RatingNodeId::ROOT), 1.0);
    }

    #[test]
    fn transitions_from_failed_nodes_collapse() {
        let mut graph = RatingGraph::default();
        let failed = graph.add_node(RatingNodeId::ROOT, 0);
        graph.set_missed_deadline(failed);

        assert!(graph.will_miss_deadline(RatingNodeId::ROOT, 0));
        assert!(!graph.will_miss_deadline(RatingNodeId::ROOT, 1));
        assert_eq!(graph.add_node(failed, 1), failed);
        assert_eq!(graph.num_nodes(), 2);
    }

    #[test]
    fn merge_edges_keep_children_contiguous() {
        let mut graph = RatingGraph::default();
        let first = graph.add_node(RatingNodeId::ROOT, 0);
        let second = graph.add_node(RatingNodeId::ROOT, 1);
        let merged = graph.add_node(first, 1);
        graph.insert_edge(second, merged, 0);
        graph.insert_edge(RatingNodeId::ROOT, merged, 2);

        assert_eq!(
            graph.children(RatingNodeId::ROOT).collect::<Vec<_>>(),
            vec![(0, first), (1, second), (2, merged)]
        );
        assert_eq!(
            graph.parents(merged).map(|(_, parent)| parent).collect::<Vec<_>>(),
            vec![RatingNodeId::ROOT, first, second]
        );
    }
}
