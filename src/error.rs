use thiserror::Error;

/// Every failure is terminal: it flows into the final report and the
/// process exits. Nothing is retried.
#[derive(Error, Debug)]
pub enum PtimeError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    /// The OS refused to create the process. Carries the raw OS message.
    #[error("{0}")]
    Spawn(std::io::Error),

    /// The wait call itself failed, independently of the child's outcome.
    #[error("wait failed: {0}")]
    Wait(std::io::Error),

    #[error("Failed to register signal handler: {0}")]
    SignalHandler(String),
}

pub type Result<T> = std::result::Result<T, PtimeError>;
