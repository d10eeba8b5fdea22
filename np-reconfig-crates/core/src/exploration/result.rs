use crate::create_statistics_struct;

create_statistics_struct!(
    /// Counters gathered during one exploration pass; they are diagnostics only.
    ExplorationStatistics {
        num_nodes: usize,
        num_edges: usize,
        num_merges: usize,
        num_deadline_misses: usize,
        num_dead_ends: usize,
        /// The size of the largest level.
        max_width: usize,
        exploration_time_ms: u128,
});

/// The verdict of one exploration pass.
#[derive(Clone, Copy, Debug)]
pub struct ExplorationResult {
    pub(crate) has_deadline_miss: bool,
    pub(crate) has_dead_end: bool,
    pub(crate) was_timed_out: bool,
    pub(crate) statistics: ExplorationStatistics,
}

impl ExplorationResult {
    /// Whether every explored path met all deadlines.
    ///
    /// A pass which was aborted by its bounds is never schedulable.
    pub fn is_schedulable(&self) -> bool {
        !self.has_deadline_miss && !self.has_dead_end && !self.was_timed_out
    }

    pub fn was_timed_out(&self) -> bool {
        self.was_timed_out
    }

    pub fn statistics(&self) -> &ExplorationStatistics {
        &self.statistics
    }
}
