use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(email: String, password_hash: String, display_name: String) -> Self {
        UserAccount {
            id: Uuid::new_v4().to_string(),
            email,
            display_name,
            password_hash,
            email_verified: false,
            created_at: Utc::now(),
        }
    }
}
