use thiserror::Error;

/// Benchmark error types covering configuration, bootstrap, and harness failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RttError {
    /// Configuration or initialization error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The responder execution context could not be created.
    #[error("context creation failed: {0}")]
    ContextCreation(String),

    /// A scheduling or affinity request was rejected.
    #[error("placement failed: {0}")]
    Placement(String),

    /// The responder vanished while trials were still outstanding.
    #[error("responder disconnected after {completed} of {requested} trials")]
    ResponderGone {
        /// Successful trials recorded before the disconnect.
        completed: u64,
        /// Trials the benchmark was asked to run.
        requested: u64,
    },
}

/// Convenience type alias for benchmark operations.
pub type RttResult<T> = Result<T, RttError>;
