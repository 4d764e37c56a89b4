pub mod auth;
pub mod health;
pub mod ladder;
pub mod matches;
pub mod players;
pub mod profile;
pub mod requests;
