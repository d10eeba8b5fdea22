use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::IndexCollection;
use crate::np_assert_eq_simple;
use crate::problem::JobIndex;

/// The job choices along a path through the schedule-abstraction graph, one frame per depth.
///
/// After merges a frame holds every job which was dispatched at that depth on one of the merged
/// paths.
#[derive(Clone, Debug, Default)]
pub struct JobSequence {
    choices: Vec<IndexCollection>,
}

impl JobSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_next(&mut self, next_job: JobIndex) {
        self.choices.push([next_job].into_iter().collect());
    }

    pub fn extended_copy(&self, next_job: JobIndex) -> JobSequence {
        let mut extended = self.clone();
        extended.add_next(next_job);
        extended
    }

    /// Unions every frame with the frame at the same depth of `other`.
    pub fn merge(&mut self, other: &JobSequence) {
        np_assert_eq_simple!(self.choices.len(), other.choices.len());
        for (own, theirs) in self.choices.iter_mut().zip(&other.choices) {
            own.merge(theirs);
        }
    }

    /// Whether every frame of `self` is a subset of the frame at the same depth of `other`.
    ///
    /// With `strict`, `other` must also be longer.
    pub fn is_prefix_of(&self, other: &JobSequence, strict: bool) -> bool {
        if other.len() < self.len() || (strict && other.len() == self.len()) {
            return false;
        }

        self.choices
            .iter()
            .zip(&other.choices)
            .all(|(own, theirs)| own.is_subset_of(theirs))
    }

    pub fn last(&self) -> Option<&IndexCollection> {
        self.choices.last()
    }

    pub fn get(&self, depth: usize) -> Option<&IndexCollection> {
        self.choices.get(depth)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl Display for JobSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (depth, frame) in self.choices.iter().enumerate() {
            if depth > 0 {
                write!(f, " -> ")?;
            }
            let jobs = frame.iter().map(|job| job.to_string()).collect::<Vec<_>>();
            if jobs.len() == 1 {
                write!(f, "{}", jobs[0])?;
            } else {
                write!(f, "{{{}}}", jobs.join(", "))?;
            }
        }
        Ok(())
    }
}
