//! This module defines configuration options forwarded to the native calculator when it is
//! initialized.

/// Settings passed to the calculator's initialization entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Whether the calculator should use its small-system code path.
    ///
    /// Small systems (cells shorter than twice the interaction cutoff) need ghost atom
    /// replication; the calculator only performs it when this flag is set.
    pub small: bool,
    /// The process rank reported to the calculator. The calculator only prints its
    /// parameter-file summary on rank 0.
    pub rank: i32,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            small: true,
            rank: 0,
        }
    }
}
