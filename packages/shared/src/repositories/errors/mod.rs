pub mod match_repository_errors;
pub mod match_request_repository_errors;
pub mod profile_repository_errors;
pub mod user_repository_errors;
