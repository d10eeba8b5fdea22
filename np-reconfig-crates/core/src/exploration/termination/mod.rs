//! A [`TerminationCondition`] is polled by the explorer before every node expansion. It indicates
//! when a pass should be aborted, even though no verdict has been reached. An aborted pass is
//! reported as timed out.

mod combinator;
mod depth_budget;
mod time_budget;

pub use combinator::Combinator;
pub use depth_budget::DepthBudget;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition.
pub trait TerminationCondition {
    /// Returns `true` when the pass should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called once every level of the graph has been expanded.
    fn level_has_been_explored(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn level_has_been_explored(&mut self) {
        if let Some(t) = self {
            t.level_has_been_explored()
        }
    }
}
