pub mod auth_service_errors;
pub mod directory_service_errors;
pub mod match_request_service_errors;
pub mod match_service_errors;
pub mod profile_service_errors;
pub mod user_service_errors;
