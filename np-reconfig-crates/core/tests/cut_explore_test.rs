#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use np_reconfig_core::agents::CutExploreAgent;
use np_reconfig_core::agents::RatingGraphAgent;
use np_reconfig_core::reconfiguration::cut_rating_graph;
use np_reconfig_core::reconfiguration::RatingGraphCut;
use np_reconfig_core::reconfiguration::RatingNodeId;
use np_reconfig_core::ReconfigurationOptions;
use np_reconfig_core::SchedulingProblem;

fn only_cut(problem: &SchedulingProblem) -> RatingGraphCut {
    let graph = RatingGraphAgent::generate(problem, &ReconfigurationOptions::default())
        .expect("no limits were set");
    assert!(graph.rating(RatingNodeId::ROOT) < 1.0);

    let mut cuts = cut_rating_graph(&graph);
    assert_eq!(cuts.len(), 1);
    cuts.remove(0)
}

#[test]
fn jobs_behind_the_long_job_are_forbidden_one_pass_at_a_time() {
    let problem = helpers::blocking_long_job();
    let mut cut = only_cut(&problem);
    assert_eq!(cut.prefix_length(), 1);
    assert_eq!(cut.forbidden_jobs, vec![4]);
    assert_eq!(cut.allowed_jobs, vec![1, 2]);

    let num_passes = CutExploreAgent::explore(&problem, &mut cut, &ReconfigurationOptions::default())
        .expect("no limits were set");

    // Job 5 only becomes a candidate once job 4 waits, and job 6 once job 5 does. Job 3 stays
    // blocked by the more urgent job 2.
    assert_eq!(num_passes, 3);
    assert_eq!(cut.extra_forbidden_jobs, vec![5, 6]);
    assert!(cut.extra_allowed_jobs.is_empty());
}

#[test]
fn widening_a_fully_classified_cut_needs_one_pass() {
    let problem = helpers::uncertain_releases();
    let mut cut = only_cut(&problem);

    let num_passes = CutExploreAgent::explore(&problem, &mut cut, &ReconfigurationOptions::default())
        .expect("no limits were set");

    assert_eq!(num_passes, 1);
    assert!(cut.extra_allowed_jobs.is_empty());
    assert!(cut.extra_forbidden_jobs.is_empty());
}
