#[derive(Debug)]
pub enum ProfileRepositoryError {
    NotFound,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for ProfileRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileRepositoryError::NotFound => write!(f, "Player profile not found"),
            ProfileRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ProfileRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for ProfileRepositoryError {}
