use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once a node deeper than the budget would be
/// expanded.
#[derive(Debug, Copy, Clone)]
pub struct DepthBudget {
    budget: usize,
    num_levels: usize,
}

impl DepthBudget {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            num_levels: 0,
        }
    }
}

impl TerminationCondition for DepthBudget {
    fn should_stop(&mut self) -> bool {
        self.num_levels >= self.budget
    }

    fn level_has_been_explored(&mut self) {
        self.num_levels += 1;
    }
}
