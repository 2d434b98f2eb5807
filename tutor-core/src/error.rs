use thiserror::Error;

/// Everything that can go wrong in a single homework action.
///
/// None of these is fatal: each is scoped to the action that raised it and the conversation
/// keeps every prior message. The `Display` text is what the user sees as a transient notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Could not capture the image: {0}")]
    CaptureFailed(String),

    #[error("Could not read text from the image: {0}")]
    ExtractionFailed(String),

    #[error("No text was found in the image")]
    NoTextFound,

    #[error("Could not reach the tutor: {0}")]
    ResponseUnavailable(String),

    #[error("The tutor returned an empty reply")]
    EmptyReply,

    /// Validation failure; callers treat it as a silent no-op.
    #[error("Message is empty")]
    EmptyInput,

    #[error("Still waiting for the previous reply")]
    ResponsePending,

    #[error("Config error: {0}")]
    Config(String),
}

impl FlowError {
    /// Validation failures are ignored silently instead of being shown as a notice.
    pub fn is_silent(&self) -> bool {
        matches!(self, FlowError::EmptyInput)
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;
