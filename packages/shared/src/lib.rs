pub mod crypto;
pub mod models;
pub mod repositories;
pub mod services;
