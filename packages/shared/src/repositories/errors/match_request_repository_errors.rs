#[derive(Debug)]
pub enum MatchRequestRepositoryError {
    NotFound,
    /// A conditional write lost its status precondition: the request is no
    /// longer pending, or the caller is not the requester of a cancel.
    StatusConflict,
    Serialization(String),
    DynamoDb(String),
    Transaction(String),
}

impl std::fmt::Display for MatchRequestRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchRequestRepositoryError::NotFound => write!(f, "Match request not found"),
            MatchRequestRepositoryError::StatusConflict => {
                write!(f, "Match request is no longer pending")
            }
            MatchRequestRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            MatchRequestRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            MatchRequestRepositoryError::Transaction(msg) => {
                write!(f, "Transaction error: {}", msg)
            }
        }
    }
}

impl std::error::Error for MatchRequestRepositoryError {}
