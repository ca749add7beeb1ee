//! Error types for the viewer.
//!
//! Each concern gets its own enum; [`Error`] is what the binaries bubble up.

/// Rejected or unreadable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A population count was zero.
    #[error("{field} must be at least 1")]
    InvalidCount {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A rate or coefficient fell outside [0, 1] (or was not finite).
    #[error("{field} must lie within [0, 1], got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A generation has to last at least one step.
    #[error("steps_per_generation must be at least 1")]
    ZeroStepsPerGeneration,

    /// The settings file could not be read or written.
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid YAML for [`crate::config::Settings`].
    #[error("settings yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failures reported by an [`crate::engine::Engine`] or its factory.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine refused to build from the given parameters.
    #[error("engine construction failed: {reason}")]
    Construction {
        /// Explanation supplied by the engine.
        reason: String,
    },

    /// A single step failed. The engine state is whatever the engine left.
    #[error("engine step failed: {reason}")]
    Step {
        /// Explanation supplied by the engine.
        reason: String,
    },
}

/// Reasons a fast-forward burst did not complete.
#[derive(Debug, thiserror::Error)]
pub enum FastForwardError {
    /// A burst was requested while another one had not finished.
    #[error("fast-forward already running")]
    AlreadyRunning,

    /// The engine did not reach the requested number of generations within
    /// the configured step limit.
    #[error("fast-forward gave up after {steps} steps with {completed}/{target} generations")]
    StepLimitReached {
        /// Steps taken before giving up.
        steps: u64,
        /// Generations completed during the burst.
        completed: u32,
        /// Generations requested.
        target: u32,
    },

    /// The engine failed mid-burst.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Top-level error for startup and the host loops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine could not be built or stepped.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// No window or drawing context could be obtained.
    #[error("render target unavailable: {0}")]
    RenderTargetUnavailable(String),

    /// A fast-forward burst failed.
    #[error(transparent)]
    FastForward(#[from] FastForwardError),
}
