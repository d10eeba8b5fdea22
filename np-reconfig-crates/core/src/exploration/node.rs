use super::JobSet;
use crate::np_assert_advanced;
use crate::np_assert_eq_simple;
use crate::problem::Interval;
use crate::problem::JobIndex;

/// A state of the schedule-abstraction graph, carrying the payload of the active
/// [`Agent`](crate::agents::Agent).
#[derive(Debug)]
pub struct ScheduleNode<Attachment> {
    scheduled_jobs: JobSet,
    availability: Interval,
    /// Finish intervals of the scheduled jobs which have successors, sorted by job index.
    finish_times: Vec<(JobIndex, Interval)>,
    depth: usize,
    attachment: Attachment,
}

impl<Attachment> ScheduleNode<Attachment> {
    pub(crate) fn root(num_jobs: usize, attachment: Attachment) -> Self {
        ScheduleNode {
            scheduled_jobs: JobSet::empty(num_jobs),
            availability: Interval::point(0),
            finish_times: Vec::new(),
            depth: 0,
            attachment,
        }
    }

    pub(crate) fn successor(
        scheduled_jobs: JobSet,
        availability: Interval,
        finish_times: Vec<(JobIndex, Interval)>,
        depth: usize,
        attachment: Attachment,
    ) -> Self {
        np_assert_advanced!(finish_times.windows(2).all(|pair| pair[0].0 < pair[1].0));

        ScheduleNode {
            scheduled_jobs,
            availability,
            finish_times,
            depth,
            attachment,
        }
    }

    /// The jobs which have been dispatched on every path to this node.
    pub fn scheduled_jobs(&self) -> &JobSet {
        &self.scheduled_jobs
    }

    /// The interval in which the processor may become idle.
    pub fn availability(&self) -> Interval {
        self.availability
    }

    /// The number of jobs dispatched before reaching this node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    pub fn attachment_mut(&mut self) -> &mut Attachment {
        &mut self.attachment
    }

    pub(crate) fn finish_time(&self, job: JobIndex) -> Option<Interval> {
        self.finish_times
            .binary_search_by_key(&job, |&(index, _)| index)
            .ok()
            .map(|position| self.finish_times[position].1)
    }

    pub(crate) fn finish_times(&self) -> &[(JobIndex, Interval)] {
        &self.finish_times
    }

    /// Widens this node so that it also covers a state with the same job set.
    pub(crate) fn absorb(&mut self, availability: Interval, finish_times: &[(JobIndex, Interval)]) {
        np_assert_eq_simple!(self.finish_times.len(), finish_times.len());

        self.availability = self.availability.hull(&availability);
        for ((own_job, own_finish), (other_job, other_finish)) in
            self.finish_times.iter_mut().zip(finish_times)
        {
            np_assert_eq_simple!(own_job, other_job);
            *own_finish = own_finish.hull(other_finish);
        }
    }
}
