use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::np_assert_simple;
use crate::problem::JobIndex;

/// Identifies a node of a [`SubGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubGraphNodeId(u32);

impl SubGraphNodeId {
    pub const ROOT: SubGraphNodeId = SubGraphNodeId(0);
}

impl StorageKey for SubGraphNodeId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        SubGraphNodeId(index as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SubGraphEdge {
    child: SubGraphNodeId,
    taken_job: JobIndex,
}

/// A small directed graph of job choices which starts at [`SubGraphNodeId::ROOT`].
///
/// A cut stores the paths from the root of the rating graph to the node at which a worse choice
/// was made; the leaf of the sub-graph is that node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubGraph {
    nodes: KeyedVec<SubGraphNodeId, Vec<SubGraphEdge>>,
}

impl Default for SubGraph {
    fn default() -> Self {
        SubGraph::with_nodes(1)
    }
}

impl SubGraph {
    fn with_nodes(num_nodes: usize) -> SubGraph {
        let mut nodes = KeyedVec::with_capacity(num_nodes);
        for _ in 0..num_nodes {
            let _ = nodes.push(Vec::new());
        }
        SubGraph { nodes }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The node reached by taking `job` from `node`, if the sub-graph contains that edge.
    pub fn can_take_job(&self, node: SubGraphNodeId, job: JobIndex) -> Option<SubGraphNodeId> {
        np_assert_simple!(self.nodes.contains_key(node));
        self.nodes[node]
            .iter()
            .find(|edge| edge.taken_job == job)
            .map(|edge| edge.child)
    }

    pub fn is_leaf(&self, node: SubGraphNodeId) -> bool {
        np_assert_simple!(self.nodes.contains_key(node));
        self.nodes[node].is_empty()
    }

    /// The number of edges on the path which always follows the first outgoing edge.
    pub fn length(&self) -> usize {
        let mut length = 0;
        let mut node = SubGraphNodeId::ROOT;
        while let Some(edge) = self.nodes[node].first() {
            node = edge.child;
            length += 1;
        }
        length
    }

    /// The jobs on the outgoing edges of `node`, together with the nodes they lead to.
    pub fn edges(&self, node: SubGraphNodeId) -> impl Iterator<Item = (JobIndex, SubGraphNodeId)> + '_ {
        self.nodes[node]
            .iter()
            .map(|edge| (edge.taken_job, edge.child))
    }

    pub fn add_edge_to_new_node(
        &mut self,
        start: SubGraphNodeId,
        taken_job: JobIndex,
    ) -> SubGraphNodeId {
        np_assert_simple!(self.nodes.contains_key(start));
        let end = self.nodes.push(Vec::new());
        self.nodes[start].push(SubGraphEdge {
            child: end,
            taken_job,
        });
        end
    }

    pub fn add_edge_between_existing_nodes(
        &mut self,
        start: SubGraphNodeId,
        end: SubGraphNodeId,
        taken_job: JobIndex,
    ) {
        np_assert_simple!(self.nodes.contains_key(start));
        np_assert_simple!(self.nodes.contains_key(end));
        self.nodes[start].push(SubGraphEdge {
            child: end,
            taken_job,
        });
    }

    /// The sub-graph with every edge flipped, in which node `i` becomes node `n - 1 - i`.
    pub fn reversed(&self) -> SubGraph {
        let num_nodes = self.nodes.len();
        let mirror = |node: SubGraphNodeId| SubGraphNodeId::create_from_index(num_nodes - 1 - node.index());

        let mut reversed = SubGraph::with_nodes(num_nodes);
        for node in self.nodes.keys() {
            for edge in &self.nodes[node] {
                reversed.add_edge_between_existing_nodes(
                    mirror(edge.child),
                    mirror(node),
                    edge.taken_job,
                );
            }
        }
        reversed
    }
}
