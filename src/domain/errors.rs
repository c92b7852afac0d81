#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Client-side check failed before any backend call was made.
    Validation(String),
    /// Bad credentials, or no session where one is required.
    Auth(String),
    /// The provider refused a write (permission, constraint, unauthenticated).
    BackendRejected(String),
    /// Transport or provider failure on a read.
    BackendUnavailable(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::Validation(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
            DomainError::Auth(msg) => {
                write!(f, "Authentication failed: {}", msg)
            }
            DomainError::BackendRejected(msg) => {
                write!(f, "Backend rejected the request: {}", msg)
            }
            DomainError::BackendUnavailable(msg) => {
                write!(f, "Backend unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
