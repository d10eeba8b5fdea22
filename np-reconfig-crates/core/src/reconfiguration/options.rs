use std::time::Duration;

use crate::exploration::ExplorationOptions;

/// Which strategies the [`Manager`](super::Manager) may use, and in which order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StrategySelection {
    /// Tighten timing assumptions first and fall back to adding precedence constraints.
    #[default]
    PessimisticThenGraph,
    PessimisticOnly,
    GraphOnly,
}

/// Options of a reconfiguration run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconfigurationOptions {
    pub strategy: StrategySelection,
    /// The limit of every individual exploration pass.
    pub time_limit: Option<Duration>,
    /// The depth limit of every individual exploration pass.
    pub max_depth: Option<usize>,
}

impl ReconfigurationOptions {
    /// The options of a pass which stops at the first deadline miss and merges states.
    pub(crate) fn exploration_options(&self) -> ExplorationOptions {
        ExplorationOptions {
            time_limit: self.time_limit,
            max_depth: self.max_depth,
            ..ExplorationOptions::default()
        }
    }
}
