use std::time::Duration;

/// Options which control a single exploration pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplorationOptions {
    /// Stop the pass as soon as the verdict is known to be unschedulable.
    pub early_exit: bool,
    /// Fold successors into equivalent nodes of the same level.
    pub merge_states: bool,
    /// The deepest level which may still be expanded.
    pub max_depth: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl Default for ExplorationOptions {
    fn default() -> Self {
        ExplorationOptions {
            early_exit: true,
            merge_states: true,
            max_depth: None,
            time_limit: None,
        }
    }
}

impl ExplorationOptions {
    pub fn with_early_exit(self, early_exit: bool) -> Self {
        ExplorationOptions { early_exit, ..self }
    }

    pub fn with_merge_states(self, merge_states: bool) -> Self {
        ExplorationOptions {
            merge_states,
            ..self
        }
    }
}
