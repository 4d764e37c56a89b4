pub mod auth;
pub mod directory;
pub mod match_request;
pub mod profile;
pub mod scheduled_match;
pub mod user;
