/// Failure reported by an external service adapter.
///
/// The `Display` text is what the user sees, so adapters put the backend's own
/// message into it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("{0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The service answered successfully but the body was unusable.
    #[error("{0}")]
    InvalidResponse(String),
}

impl ServiceError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ServiceError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether the same operation with a different payload could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ServiceError::Rejected { .. } | ServiceError::InvalidResponse(_)
        )
    }
}
