use std::fmt;

#[derive(Debug)]
pub enum DirectoryServiceError {
    RepositoryError(String),
}

impl fmt::Display for DirectoryServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DirectoryServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DirectoryServiceError {}
