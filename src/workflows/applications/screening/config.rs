use std::time::Duration;

const DEFAULT_SCORING_TIMEOUT: Duration = Duration::from_secs(5);

/// Dials for the screening orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningConfig {
    /// Upper bound on one external scoring call. Past this the call is
    /// treated as failed and the baseline path is taken; there is no retry.
    pub scoring_timeout: Duration,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            scoring_timeout: DEFAULT_SCORING_TIMEOUT,
        }
    }
}
