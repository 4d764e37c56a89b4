use std::fmt;

#[derive(Debug)]
pub enum ProfileServiceError {
    RepositoryError(String),
    ProfileNotFound,
    ValidationError(String),
}

impl fmt::Display for ProfileServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProfileServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            ProfileServiceError::ProfileNotFound => write!(f, "Player profile not found"),
            ProfileServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ProfileServiceError {}
