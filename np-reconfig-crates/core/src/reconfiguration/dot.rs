use std::io::Write;

use super::RatingGraph;
use super::RatingGraphCut;
use crate::containers::StorageKey;
use crate::problem::SchedulingProblem;

/// Writes `graph` in the Graphviz DOT format.
///
/// Nodes are labelled with their rating and edges with the job which was dispatched. The points
/// of choice of `cuts` are filled, and the edges to their forbidden jobs are drawn in red.
pub fn write_dot(
    writer: &mut impl Write,
    graph: &RatingGraph,
    problem: &SchedulingProblem,
    cuts: &[RatingGraphCut],
) -> std::io::Result<()> {
    writeln!(writer, "digraph rating_graph {{")?;

    for node in graph.nodes() {
        let style = if cuts.iter().any(|cut| cut.node == node) {
            ", style=filled, fillcolor=orange"
        } else {
            ""
        };
        writeln!(
            writer,
            "  n{} [label=\"{:.3}\"{style}];",
            node.index(),
            graph.rating(node)
        )?;
    }

    for (parent, job, child) in graph.edges() {
        let is_regret = cuts
            .iter()
            .any(|cut| cut.node == parent && cut.forbidden_jobs.contains(&job));
        writeln!(
            writer,
            "  n{} -> n{} [label=\"{}\"{}];",
            parent.index(),
            child.index(),
            problem.job(job).id(),
            if is_regret { ", color=red" } else { "" }
        )?;
    }

    writeln!(writer, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Interval;
    use crate::problem::Job;
    use crate::problem::JobId;
    use crate::reconfiguration::cut_rating_graph;
    use crate::reconfiguration::RatingNodeId;

    #[test]
    fn regret_edge_is_highlighted() {
        let problem = SchedulingProblem::new(
            (0..2)
                .map(|index| {
                    Job::new(
                        JobId::new(index as u64, 0),
                        index,
                        Interval::point(0),
                        Interval::point(1),
                        10,
                        0,
                    )
                })
                .collect(),
            vec![],
        );

        let mut graph = RatingGraph::default();
        let good = graph.add_node(RatingNodeId::ROOT, 0);
        let bad = graph.add_node(RatingNodeId::ROOT, 1);
        graph.set_successful(good);
        graph.set_missed_deadline(bad);
        graph.compute_ratings();
        let cuts = cut_rating_graph(&graph);

        let mut output = Vec::new();
        write_dot(&mut output, &graph, &problem, &cuts).expect("writing to a vector succeeds");

        let expected = "digraph rating_graph {\n\
                        \x20 n0 [label=\"0.500\", style=filled, fillcolor=orange];\n\
                        \x20 n1 [label=\"1.000\"];\n\
                        \x20 n2 [label=\"0.000\"];\n\
                        \x20 n0 -> n1 [label=\"T0J0\"];\n\
                        \x20 n0 -> n2 [label=\"T1J0\", color=red];\n\
                        }\n";
        assert_eq!(String::from_utf8(output).expect("valid utf-8"), expected);
    }
}
