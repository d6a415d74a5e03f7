//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps every failure
//! mode during startup and serving.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cordpull_core::config::ConfigError,
    },

    /// The configured starting parameters were rejected by the session.
    #[error("session error: {source}")]
    Session {
        /// The underlying validation error.
        #[from]
        source: cordpull_decision::ParameterError,
    },

    /// Observer API server failed to start.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying startup error.
        #[from]
        source: cordpull_observer::StartupError,
    },

    /// The Observer task ended abnormally.
    #[error("observer task failed: {message}")]
    ObserverTask {
        /// Description of the task failure.
        message: String,
    },
}
