use std::fmt;

#[derive(Debug)]
pub enum MatchServiceError {
    RepositoryError(String),
    MatchNotFound,
    ValidationError(String),
    NotParticipant,
}

impl fmt::Display for MatchServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            MatchServiceError::MatchNotFound => write!(f, "Match not found"),
            MatchServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            MatchServiceError::NotParticipant => {
                write!(f, "Caller is not a participant in this match")
            }
        }
    }
}

impl std::error::Error for MatchServiceError {}
