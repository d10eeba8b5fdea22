use std::time::Instant;

use log::trace;

use super::termination::Combinator;
use super::termination::DepthBudget;
use super::termination::TerminationCondition;
use super::termination::TimeBudget;
use super::ExplorationOptions;
use super::ExplorationResult;
use super::ExplorationStatistics;
use super::JobSet;
use super::ScheduleNode;
use crate::agents::Agent;
use crate::containers::HashMap;
use crate::np_assert_simple;
use crate::problem::Interval;
use crate::problem::Job;
use crate::problem::JobIndex;
use crate::problem::SchedulingProblem;
use crate::problem::Time;

/// Explores every admissible dispatch order of the non-preemptive job set `problem` on a single
/// processor under work-conserving fixed-priority scheduling, reporting to `agent` along the way.
///
/// The schedule-abstraction graph is expanded breadth first: the nodes of a level are expanded in
/// the order in which they were created and the candidate jobs of a node in ascending index
/// order. The precedence constraints of `problem` are expected to be valid.
pub fn explore<A: Agent>(
    problem: &SchedulingProblem,
    options: ExplorationOptions,
    agent: &mut A,
) -> ExplorationResult {
    Explorer::new(problem, options).run(agent)
}

struct Explorer<'a> {
    problem: &'a SchedulingProblem,
    options: ExplorationOptions,
    /// For every job, its predecessors together with the suspension after them.
    predecessors: Vec<Vec<(JobIndex, Interval)>>,
    has_successors: Vec<bool>,
}

/// What happened while dispatching the candidates of a single node.
#[derive(Clone, Copy, Debug, Default)]
struct Expansion {
    missed_deadline: bool,
    has_successor: bool,
}

/// The level which is currently being built.
struct NextLevel<Attachment> {
    nodes: Vec<ScheduleNode<Attachment>>,
    by_scheduled_jobs: HashMap<JobSet, Vec<usize>>,
}

impl<'a> Explorer<'a> {
    fn new(problem: &'a SchedulingProblem, options: ExplorationOptions) -> Self {
        let lookup = problem.job_index_lookup();

        let mut predecessors = vec![Vec::new(); problem.num_jobs()];
        let mut has_successors = vec![false; problem.num_jobs()];
        for constraint in problem.precedence_constraints().iter() {
            let from = lookup.get(&constraint.from()).copied();
            let to = lookup.get(&constraint.to()).copied();
            np_assert_simple!(
                from.is_some() && to.is_some(),
                "Precedence constraint {constraint} refers to an unknown job"
            );

            if let (Some(from), Some(to)) = (from, to) {
                predecessors[to].push((from, constraint.suspension()));
                has_successors[from] = true;
            }
        }

        Explorer {
            problem,
            options,
            predecessors,
            has_successors,
        }
    }

    fn run<A: Agent>(&self, agent: &mut A) -> ExplorationResult {
        let started_at = Instant::now();
        let mut termination = Combinator::new(
            self.options.time_limit.map(TimeBudget::starting_now),
            self.options.max_depth.map(DepthBudget::new),
        );

        let mut statistics = ExplorationStatistics::default();
        let mut has_deadline_miss = false;
        let mut has_dead_end = false;
        let mut was_timed_out = false;

        let num_jobs = self.problem.num_jobs();
        let mut current = vec![ScheduleNode::root(
            num_jobs,
            agent.create_initial_node_attachment(),
        )];
        statistics.num_nodes = 1;

        'levels: while !current.is_empty() {
            statistics.max_width = statistics.max_width.max(current.len());

            let mut next = NextLevel {
                nodes: Vec::new(),
                by_scheduled_jobs: HashMap::default(),
            };

            for node in current.iter_mut() {
                if node.scheduled_jobs().len() == num_jobs {
                    agent.finished_node(node);
                    continue;
                }

                if termination.should_stop() {
                    was_timed_out = true;
                    break 'levels;
                }

                let expansion = self.expand(node, agent, &mut next, &mut statistics);

                if expansion.missed_deadline {
                    has_deadline_miss = true;
                    if self.options.early_exit {
                        break 'levels;
                    }
                } else if !expansion.has_successor {
                    trace!("Dead end after jobs {}", node.scheduled_jobs());
                    statistics.num_dead_ends += 1;
                    agent.encountered_dead_end(node);

                    if !agent.may_potentially_forbid_jobs() {
                        has_dead_end = true;
                        if self.options.early_exit {
                            break 'levels;
                        }
                    }
                }
            }

            termination.level_has_been_explored();
            current = next.nodes;
        }

        statistics.exploration_time_ms = started_at.elapsed().as_millis();

        ExplorationResult {
            has_deadline_miss,
            has_dead_end,
            was_timed_out,
            statistics,
        }
    }

    /// Dispatches every eligible job from `node` and adds the resulting states to `next`.
    fn expand<A: Agent>(
        &self,
        node: &mut ScheduleNode<A::Attachment>,
        agent: &mut A,
        next: &mut NextLevel<A::Attachment>,
        statistics: &mut ExplorationStatistics,
    ) -> Expansion {
        let mut expansion = Expansion::default();

        let mut ready_intervals = self.ready_intervals(node);
        if agent.may_potentially_forbid_jobs() {
            ready_intervals.retain(|&(job_index, _)| {
                !agent.is_withheld(node, self.problem.job(job_index))
            });
        }
        let Some(earliest_certain_release) = ready_intervals.iter().map(|(_, r)| r.max()).min()
        else {
            return expansion;
        };
        let latest_idle = node.availability().max().max(earliest_certain_release);

        for &(job_index, ready) in &ready_intervals {
            let job = self.problem.job(job_index);

            let latest_without_preemption_by_urgent_job = ready_intervals
                .iter()
                .filter(|(other, _)| self.problem.job(*other).has_higher_priority_than(job))
                .map(|(_, other_ready)| other_ready.max() - 1)
                .min()
                .unwrap_or(Time::MAX);

            let earliest_start = node.availability().min().max(ready.min());
            let latest_start = latest_idle.min(latest_without_preemption_by_urgent_job);
            if earliest_start > latest_start {
                continue;
            }

            if !agent.is_allowed(node, job) {
                continue;
            }

            let finish = Interval::new(
                earliest_start + job.cost().min(),
                latest_start + job.cost().max(),
            );

            if finish.max() > job.deadline() {
                trace!(
                    "Job {} may finish at {} after jobs {}, missing its deadline {}",
                    job.id(),
                    finish.max(),
                    node.scheduled_jobs(),
                    job.deadline()
                );
                statistics.num_deadline_misses += 1;
                expansion.missed_deadline = true;
                agent.missed_deadline(node, job);

                if self.options.early_exit {
                    return expansion;
                }
                continue;
            }

            expansion.has_successor = true;
            statistics.num_edges += 1;
            self.add_successor(node, job, finish, agent, next, statistics);
        }

        expansion
    }

    /// The ready intervals of the pending jobs whose predecessors have all been dispatched.
    fn ready_intervals<Attachment>(
        &self,
        node: &ScheduleNode<Attachment>,
    ) -> Vec<(JobIndex, Interval)> {
        (0..self.problem.num_jobs())
            .filter(|&job_index| !node.scheduled_jobs().contains(job_index))
            .filter_map(|job_index| {
                let mut ready = self.problem.job(job_index).arrival();
                for &(predecessor, suspension) in &self.predecessors[job_index] {
                    let finish = node.finish_time(predecessor)?;
                    ready = ready.lower_bounded_by(&finish.shifted_by(&suspension));
                }
                Some((job_index, ready))
            })
            .collect()
    }

    fn add_successor<A: Agent>(
        &self,
        parent: &ScheduleNode<A::Attachment>,
        job: &Job,
        finish: Interval,
        agent: &mut A,
        next: &mut NextLevel<A::Attachment>,
        statistics: &mut ExplorationStatistics,
    ) {
        let scheduled_jobs = parent.scheduled_jobs().with(job.index());

        let mut finish_times = parent.finish_times().to_vec();
        if self.has_successors[job.index()] {
            let position = finish_times.partition_point(|&(index, _)| index < job.index());
            finish_times.insert(position, (job.index(), finish));
        }

        if self.options.merge_states {
            if let Some(candidates) = next.by_scheduled_jobs.get(&scheduled_jobs) {
                for &candidate in candidates {
                    let destination = &mut next.nodes[candidate];
                    if destination.availability().intersects(&finish)
                        && agent.allow_merge(parent, job, destination)
                    {
                        destination.absorb(finish, &finish_times);
                        agent.merge_node_attachments(destination, parent, job);
                        statistics.num_merges += 1;
                        return;
                    }
                }
            }
        }

        let attachment = agent.create_next_node_attachment(parent, job);
        next.by_scheduled_jobs
            .entry(scheduled_jobs.clone())
            .or_default()
            .push(next.nodes.len());
        next.nodes.push(ScheduleNode::successor(
            scheduled_jobs,
            finish,
            finish_times,
            parent.depth() + 1,
            attachment,
        ));
        statistics.num_nodes += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::agents::PassiveAgent;
    use crate::problem::JobId;
    use crate::problem::PrecedenceConstraint;

    fn job(index: usize, arrival: (Time, Time), cost: (Time, Time), deadline: Time) -> Job {
        Job::new(
            JobId::new(index as u64, 0),
            index,
            Interval::new(arrival.0, arrival.1),
            Interval::new(cost.0, cost.1),
            deadline,
            index as i64,
        )
    }

    /// Counts the events reported by the explorer and forbids or withholds the listed jobs.
    #[derive(Default)]
    struct RecordingAgent {
        forbidden: Vec<JobIndex>,
        withheld: Vec<JobIndex>,
        missed_jobs: Vec<JobIndex>,
        num_finished: usize,
        num_dead_ends: usize,
        num_merges: usize,
    }

    impl Agent for RecordingAgent {
        type Attachment = ();

        fn merge_node_attachments(
            &mut self,
            _destination: &mut ScheduleNode<()>,
            _parent: &ScheduleNode<()>,
            _job: &Job,
        ) {
            self.num_merges += 1;
        }

        fn missed_deadline(&mut self, _node: &mut ScheduleNode<()>, late_job: &Job) {
            self.missed_jobs.push(late_job.index());
        }

        fn encountered_dead_end(&mut self, _node: &mut ScheduleNode<()>) {
            self.num_dead_ends += 1;
        }

        fn finished_node(&mut self, _node: &mut ScheduleNode<()>) {
            self.num_finished += 1;
        }

        fn is_allowed(&mut self, _node: &ScheduleNode<()>, job: &Job) -> bool {
            !self.forbidden.contains(&job.index())
        }

        fn is_withheld(&self, _node: &ScheduleNode<()>, job: &Job) -> bool {
            self.withheld.contains(&job.index())
        }

        fn may_potentially_forbid_jobs(&self) -> bool {
            !self.forbidden.is_empty() || !self.withheld.is_empty()
        }
    }

    #[test]
    fn independent_jobs_with_loose_deadlines_are_schedulable() {
        let problem = SchedulingProblem::new(
            vec![job(0, (0, 0), (1, 2), 10), job(1, (0, 0), (1, 2), 10)],
            vec![],
        );

        let result = explore(&problem, ExplorationOptions::default(), &mut PassiveAgent);

        assert!(result.is_schedulable());
        assert!(!result.was_timed_out());
    }

    #[test]
    fn priority_inversion_through_release_jitter_misses_a_deadline() {
        // The urgent job may arrive just after the long job has started.
        let problem = SchedulingProblem::new(
            vec![job(0, (0, 5), (1, 1), 6), job(1, (0, 0), (8, 8), 100)],
            vec![],
        );
        let mut agent = RecordingAgent::default();

        let result = explore(
            &problem,
            ExplorationOptions::default().with_early_exit(false),
            &mut agent,
        );

        assert!(!result.is_schedulable());
        assert_eq!(agent.missed_jobs, vec![0]);
        assert_eq!(result.statistics().num_deadline_misses, 1);
    }

    #[test]
    fn equivalent_states_are_merged() {
        // Job 0 may arrive late, so both orders of jobs 0 and 1 are admissible.
        let problem = SchedulingProblem::new(
            vec![
                job(0, (0, 10), (1, 1), 100),
                job(1, (0, 0), (1, 1), 100),
                job(2, (20, 20), (1, 1), 100),
            ],
            vec![],
        );

        let mut merging_agent = RecordingAgent::default();
        let merged = explore(&problem, ExplorationOptions::default(), &mut merging_agent);

        let mut separating_agent = RecordingAgent::default();
        let separated = explore(
            &problem,
            ExplorationOptions::default().with_merge_states(false),
            &mut separating_agent,
        );

        assert!(merged.is_schedulable());
        assert_eq!(merging_agent.num_merges, 1);
        assert_eq!(merging_agent.num_finished, 1);
        assert_eq!(merged.statistics().num_nodes, 5);

        assert!(separated.is_schedulable());
        assert_eq!(separating_agent.num_merges, 0);
        assert_eq!(separating_agent.num_finished, 2);
        assert_eq!(separated.statistics().num_nodes, 7);
    }

    #[test]
    fn precedence_constraints_delay_the_successor() {
        let from = job(0, (0, 0), (5, 5), 100);
        let to = Job::new(
            JobId::new(1, 0),
            1,
            Interval::point(0),
            Interval::point(1),
            5,
            -1,
        );
        let problem = SchedulingProblem::new(
            vec![from, to],
            vec![PrecedenceConstraint::without_suspension(
                JobId::new(0, 0),
                JobId::new(1, 0),
            )],
        );

        let result = explore(&problem, ExplorationOptions::default(), &mut PassiveAgent);

        assert!(!result.is_schedulable());
    }

    #[test]
    fn withheld_jobs_do_not_block_less_urgent_jobs() {
        let problem = SchedulingProblem::new(
            vec![job(0, (0, 0), (1, 1), 10), job(1, (0, 0), (1, 1), 10)],
            vec![],
        );

        let mut forbidding_agent = RecordingAgent {
            forbidden: vec![0],
            ..Default::default()
        };
        let forbidden = explore(&problem, ExplorationOptions::default(), &mut forbidding_agent);

        let mut withholding_agent = RecordingAgent {
            withheld: vec![0],
            ..Default::default()
        };
        let withheld = explore(&problem, ExplorationOptions::default(), &mut withholding_agent);

        // Job 0 is certainly released at time 0, so forbidding it still blocks job 1.
        assert_eq!(forbidden.statistics().num_nodes, 1);
        assert_eq!(forbidding_agent.num_dead_ends, 1);

        assert_eq!(withheld.statistics().num_nodes, 2);
        assert_eq!(withholding_agent.num_dead_ends, 1);
        assert!(withheld.is_schedulable());
    }

    #[test]
    fn forbidding_every_candidate_reports_an_uncounted_dead_end() {
        let problem = SchedulingProblem::new(vec![job(0, (0, 0), (1, 1), 10)], vec![]);
        let mut agent = RecordingAgent {
            forbidden: vec![0],
            ..Default::default()
        };

        let result = explore(&problem, ExplorationOptions::default(), &mut agent);

        assert_eq!(agent.num_dead_ends, 1);
        assert_eq!(agent.num_finished, 0);
        assert!(result.is_schedulable());
    }

    #[test]
    fn depth_budget_aborts_the_pass() {
        let problem = SchedulingProblem::new(
            vec![job(0, (0, 0), (1, 1), 10), job(1, (0, 0), (1, 1), 10)],
            vec![],
        );
        let options = ExplorationOptions {
            max_depth: Some(1),
            ..Default::default()
        };

        let result = explore(&problem, options, &mut PassiveAgent);

        assert!(result.was_timed_out());
        assert!(!result.is_schedulable());
    }

    #[test]
    fn exhausted_time_budget_aborts_the_pass() {
        let problem = SchedulingProblem::new(vec![job(0, (0, 0), (1, 1), 10)], vec![]);
        let options = ExplorationOptions {
            time_limit: Some(Duration::ZERO),
            ..Default::default()
        };

        let result = explore(&problem, options, &mut PassiveAgent);

        assert!(result.was_timed_out());
    }
}
