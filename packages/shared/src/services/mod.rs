pub mod auth_service;
pub mod directory_service;
pub mod errors;
pub mod match_request_service;
pub mod match_service;
pub mod profile_service;
pub mod user_service;
