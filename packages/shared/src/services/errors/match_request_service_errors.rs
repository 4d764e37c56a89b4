use std::fmt;

#[derive(Debug)]
pub enum MatchRequestServiceError {
    RepositoryError(String),
    RequestNotFound,
    RequesteeNotFound,
    ProfileNotFound,
    ValidationError(String),
    /// The request has already been accepted, declined or deleted; no
    /// further transitions are permitted.
    AlreadyResolved,
    /// The caller is not the party allowed to perform this transition.
    NotPermitted,
}

impl fmt::Display for MatchRequestServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchRequestServiceError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
            MatchRequestServiceError::RequestNotFound => write!(f, "Match request not found"),
            MatchRequestServiceError::RequesteeNotFound => {
                write!(f, "Requestee has no player profile")
            }
            MatchRequestServiceError::ProfileNotFound => {
                write!(f, "Requester has no player profile")
            }
            MatchRequestServiceError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            MatchRequestServiceError::AlreadyResolved => {
                write!(f, "Match request has already been resolved")
            }
            MatchRequestServiceError::NotPermitted => {
                write!(f, "Caller may not perform this transition")
            }
        }
    }
}

impl std::error::Error for MatchRequestServiceError {}
