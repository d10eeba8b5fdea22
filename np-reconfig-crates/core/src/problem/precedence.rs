use std::fmt::Display;
use std::fmt::Formatter;
use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use super::Interval;
use super::JobId;
use super::Time;
use crate::np_assert_simple;

/// Requires that `to` does not start before `from` has finished and the suspension has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrecedenceConstraint {
    from: JobId,
    to: JobId,
    suspension: Interval,
}

impl PrecedenceConstraint {
    pub fn new(from: JobId, to: JobId, suspension: Interval) -> PrecedenceConstraint {
        PrecedenceConstraint {
            from,
            to,
            suspension,
        }
    }

    /// A constraint which lets `to` start immediately after `from` finishes.
    pub fn without_suspension(from: JobId, to: JobId) -> PrecedenceConstraint {
        PrecedenceConstraint::new(from, to, Interval::point(0))
    }

    pub fn from(&self) -> JobId {
        self.from
    }

    pub fn to(&self) -> JobId {
        self.to
    }

    pub fn suspension(&self) -> Interval {
        self.suspension
    }

    fn sort_key(&self) -> (JobId, JobId, Time, Time) {
        (
            self.from,
            self.to,
            self.suspension.min(),
            self.suspension.max(),
        )
    }
}

impl Display for PrecedenceConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if self.suspension != Interval::point(0) {
            write!(f, " (suspension {})", self.suspension)?;
        }
        Ok(())
    }
}

/// A point to which [`PrecedenceConstraints::restore`] can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// The precedence constraints of a job set, stored as a trail.
///
/// Trial modifications push a [`Checkpoint`] before adding constraints; restoring it removes
/// exactly the constraints added since, which returns the list to its earlier value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrecedenceConstraints {
    current_checkpoint: usize,
    /// At index i is the position where the i-th checkpoint starts on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<PrecedenceConstraint>,
}

impl PrecedenceConstraints {
    pub fn new(constraints: Vec<PrecedenceConstraint>) -> PrecedenceConstraints {
        PrecedenceConstraints {
            current_checkpoint: 0,
            trail_delimiter: Vec::new(),
            trail: constraints,
        }
    }

    pub fn push(&mut self, constraint: PrecedenceConstraint) {
        self.trail.push(constraint)
    }

    pub fn new_checkpoint(&mut self) -> Checkpoint {
        let checkpoint = Checkpoint(self.current_checkpoint);

        self.current_checkpoint += 1;
        self.trail_delimiter.push(self.trail.len());

        checkpoint
    }

    /// Removes every constraint added after `checkpoint` was created and returns them, most
    /// recent first.
    pub fn restore(&mut self, checkpoint: Checkpoint) -> Rev<Drain<'_, PrecedenceConstraint>> {
        np_assert_simple!(checkpoint.0 < self.current_checkpoint);

        let new_trail_len = self.trail_delimiter[checkpoint.0];

        self.current_checkpoint = checkpoint.0;
        self.trail_delimiter.truncate(checkpoint.0);
        self.trail.drain(new_trail_len..).rev()
    }

    /// Whether both lists hold the same constraints, irrespective of their order.
    pub fn is_set_equal(&self, other: &[PrecedenceConstraint]) -> bool {
        let mut own = self.trail.clone();
        let mut other = other.to_vec();
        own.sort_by_key(PrecedenceConstraint::sort_key);
        own.dedup();
        other.sort_by_key(PrecedenceConstraint::sort_key);
        other.dedup();

        own == other
    }
}

impl Deref for PrecedenceConstraints {
    type Target = [PrecedenceConstraint];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}
