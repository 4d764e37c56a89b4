use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    /// Email-verification token; delivery of the verification email is an
    /// external concern.
    pub verification_token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    /// What the token is good for: "access", "verify_email" or
    /// "reset_password".
    pub purpose: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PasswordResetResponse {
    /// Single-use reset token; delivery by email is an external concern.
    pub reset_token: String,
}
