/// Failure taxonomy shared by every operation of the service.
///
/// Each variant carries the message that ends up (or may end up, depending on
/// the error-detail policy) in the `detail` field of the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    InvalidInput(String),
    NotFound(String),
    Classifier(String),
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Classifier(_) => "classifier",
            ServiceError::Internal(_) => "internal",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::InvalidInput(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Classifier(msg)
            | ServiceError::Internal(msg) => msg,
        }
    }

    /// Client-caused failures are reported verbatim regardless of policy.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidInput(_) | ServiceError::NotFound(_)
        )
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ServiceError::NotFound(msg) => write!(f, "not found: {msg}"),
            ServiceError::Classifier(msg) => write!(f, "classifier: {msg}"),
            ServiceError::Internal(msg) => write!(f, "internal: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}
