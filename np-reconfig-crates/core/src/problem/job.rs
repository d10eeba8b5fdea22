use std::fmt::Display;
use std::fmt::Formatter;

use super::Interval;
use super::JobIndex;
use super::Priority;
use super::Time;

/// The identity of a job: the task it belongs to and its number within that task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId {
    pub task: u64,
    pub job: u64,
}

impl JobId {
    pub fn new(task: u64, job: u64) -> JobId {
        JobId { task, job }
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}J{}", self.task, self.job)
    }
}

/// A non-preemptive job whose arrival and execution times are only known as intervals.
///
/// The `index` is dense and zero-based; every structure of the reconfiguration engine refers to
/// jobs through it rather than through the [`JobId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    index: JobIndex,
    arrival: Interval,
    cost: Interval,
    deadline: Time,
    priority: Priority,
}

impl Job {
    pub fn new(
        id: JobId,
        index: JobIndex,
        arrival: Interval,
        cost: Interval,
        deadline: Time,
        priority: Priority,
    ) -> Job {
        Job {
            id,
            index,
            arrival,
            cost,
            deadline,
            priority,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn index(&self) -> JobIndex {
        self.index
    }

    pub fn arrival(&self) -> Interval {
        self.arrival
    }

    pub fn cost(&self) -> Interval {
        self.cost
    }

    pub fn deadline(&self) -> Time {
        self.deadline
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Lower priority values are more urgent; ties are broken by the job index.
    pub fn has_higher_priority_than(&self, other: &Job) -> bool {
        (self.priority, self.index) < (other.priority, other.index)
    }

    /// Collapses the arrival interval onto its latest admissible value.
    pub fn assume_pessimistic_arrival(&mut self) {
        self.arrival = Interval::point(self.arrival.max());
    }

    /// Collapses the execution-time interval onto its worst case.
    pub fn assume_pessimistic_running_time(&mut self) {
        self.cost = Interval::point(self.cost.max());
    }
}

impl Display for Job {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (arrival {}, cost {}, deadline {}, priority {})",
            self.id, self.arrival, self.cost, self.deadline, self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(index: usize, priority: Priority) -> Job {
        Job::new(
            JobId::new(0, index as u64),
            index,
            Interval::new(0, 10),
            Interval::new(2, 5),
            50,
            priority,
        )
    }

    #[test]
    fn priority_ties_are_broken_by_index() {
        assert!(job(1, 5).has_higher_priority_than(&job(0, 6)));
        assert!(job(0, 5).has_higher_priority_than(&job(1, 5)));
        assert!(!job(1, 5).has_higher_priority_than(&job(0, 5)));
    }

    #[test]
    fn pessimistic_assumptions_collapse_onto_the_upper_bound() {
        let mut job = job(0, 0);

        job.assume_pessimistic_arrival();
        assert_eq!(job.arrival(), Interval::point(10));
        assert_eq!(job.cost(), Interval::new(2, 5));

        job.assume_pessimistic_running_time();
        assert_eq!(job.cost(), Interval::point(5));
    }
}
