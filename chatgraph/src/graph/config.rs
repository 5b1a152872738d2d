//! Executor configuration.

use std::time::Duration;

/// Default bound on reasoning/tool round trips per user turn.
pub const DEFAULT_MAX_ROUND_TRIPS: usize = 25;

/// Limits applied by `ChatGraph` to every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Maximum number of TOOL steps in one user turn before the run fails with
    /// `GraphError::LoopExceeded`.
    pub max_round_trips: usize,
    /// Default deadline for each node invocation; `RunOptions::node_timeout` overrides it.
    pub node_timeout: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_round_trips: DEFAULT_MAX_ROUND_TRIPS,
            node_timeout: None,
        }
    }
}

impl ExecutorConfig {
    pub fn with_max_round_trips(mut self, max_round_trips: usize) -> Self {
        self.max_round_trips = max_round_trips;
        self
    }

    pub fn with_node_timeout(mut self, timeout: Duration) -> Self {
        self.node_timeout = Some(timeout);
        self
    }
}

/// Per-call options for one user turn.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the runner's default system prompt for this turn.
    pub system_prompt: Option<String>,
    /// Overrides `ExecutorConfig::node_timeout` for this turn.
    pub node_timeout: Option<Duration>,
}

impl RunOptions {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_node_timeout(mut self, timeout: Duration) -> Self {
        self.node_timeout = Some(timeout);
        self
    }
}
