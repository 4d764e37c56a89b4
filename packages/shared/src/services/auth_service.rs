use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

use crate::crypto::password;
use crate::models::auth::responses::{LoginResponse, TokenClaims};
use crate::services::errors::auth_service_errors::AuthServiceError;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::services::user_service::UserService;

pub const PURPOSE_ACCESS: &str = "access";
pub const PURPOSE_VERIFY_EMAIL: &str = "verify_email";
pub const PURPOSE_RESET_PASSWORD: &str = "reset_password";

const ACCESS_TOKEN_HOURS: i64 = 24;
const SINGLE_USE_TOKEN_HOURS: i64 = 1;

pub struct AuthService {
    user_service: Arc<UserService>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>) -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET environment variable must be set");
        AuthService {
            user_service,
            jwt_secret,
        }
    }

    pub fn with_jwt_secret(user_service: Arc<UserService>, jwt_secret: String) -> Self {
        AuthService {
            user_service,
            jwt_secret,
        }
    }

    pub async fn authenticate_user(
        &self,
        email: &str,
        plain_password: &str,
    ) -> Result<LoginResponse, AuthServiceError> {
        if email.is_empty() || plain_password.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Email or password cannot be empty".to_string(),
            ));
        }

        match self.user_service.get_account_by_email(email).await {
            Ok(account) => {
                let verified = password::verify_password(&account.password_hash, plain_password)
                    .map_err(|e| AuthServiceError::ValidationError(e.to_string()))?;
                if verified {
                    self.generate_access_token(&account.id)
                } else {
                    Err(AuthServiceError::InvalidCredentials)
                }
            }
            Err(UserServiceError::UserNotFound) => Err(AuthServiceError::InvalidCredentials),
            Err(err) => Err(AuthServiceError::UserServiceError(err)),
        }
    }

    pub fn generate_access_token(&self, user_id: &str) -> Result<LoginResponse, AuthServiceError> {
        let expires_in = ACCESS_TOKEN_HOURS * 60 * 60;
        let token = self.encode_token(user_id, PURPOSE_ACCESS, ACCESS_TOKEN_HOURS)?;
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }

    /// Short-lived token proving ownership of the registered email address.
    /// Dispatching it by email is outside this system.
    pub fn generate_email_verification_token(
        &self,
        user_id: &str,
    ) -> Result<String, AuthServiceError> {
        self.encode_token(user_id, PURPOSE_VERIFY_EMAIL, SINGLE_USE_TOKEN_HOURS)
    }

    pub fn generate_password_reset_token(&self, user_id: &str) -> Result<String, AuthServiceError> {
        self.encode_token(user_id, PURPOSE_RESET_PASSWORD, SINGLE_USE_TOKEN_HOURS)
    }

    pub fn verify_token(&self, token: &str, purpose: &str) -> Result<TokenClaims, AuthServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let validation = Validation::default();

        let claims = match decode::<TokenClaims>(token, &decoding_key, &validation) {
            Ok(token_data) => token_data.claims,
            Err(err) => {
                return match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        Err(AuthServiceError::ExpiredToken)
                    }
                    _ => Err(AuthServiceError::InvalidToken),
                }
            }
        };

        // A verification or reset token must never pass as an access token,
        // and vice versa.
        if claims.purpose != purpose {
            return Err(AuthServiceError::InvalidToken);
        }
        Ok(claims)
    }

    pub fn extract_user_id_from_token(&self, token: &str) -> Result<String, AuthServiceError> {
        let claims = self.verify_token(token, PURPOSE_ACCESS)?;
        Ok(claims.sub)
    }

    pub async fn verify_email(&self, token: &str) -> Result<(), AuthServiceError> {
        let claims = self.verify_token(token, PURPOSE_VERIFY_EMAIL)?;
        self.user_service
            .mark_email_verified(&claims.sub)
            .await
            .map_err(AuthServiceError::UserServiceError)
    }

    /// Issues a reset token for the account behind `email`, or
    /// `InvalidCredentials` if no such account exists.
    pub async fn request_password_reset(&self, email: &str) -> Result<String, AuthServiceError> {
        match self.user_service.get_account_by_email(email).await {
            Ok(account) => self.generate_password_reset_token(&account.id),
            Err(UserServiceError::UserNotFound) => Err(AuthServiceError::InvalidCredentials),
            Err(err) => Err(AuthServiceError::UserServiceError(err)),
        }
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError> {
        let claims = self.verify_token(token, PURPOSE_RESET_PASSWORD)?;
        self.user_service
            .change_password(&claims.sub, new_password)
            .await
            .map_err(|e| match e {
                UserServiceError::ValidationError(msg) => AuthServiceError::ValidationError(msg),
                other => AuthServiceError::UserServiceError(other),
            })
    }

    fn encode_token(
        &self,
        user_id: &str,
        purpose: &str,
        hours: i64,
    ) -> Result<String, AuthServiceError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: (now + Duration::hours(hours)).timestamp() as usize,
            iat: now.timestamp() as usize,
            purpose: purpose.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AuthServiceError::JwtError(format!("{:#?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    fn service_with_secret(secret: &str) -> AuthService {
        AuthService::with_jwt_secret(
            Arc::new(UserService::new(Arc::new(MockUserRepository::new()))),
            secret.to_string(),
        )
    }

    #[test]
    fn test_access_token_roundtrip() {
        let auth_service = service_with_secret("test-secret-key");

        let login_response = auth_service.generate_access_token("user-1").unwrap();
        assert_eq!(login_response.token_type, "Bearer");
        assert_eq!(login_response.expires_in, 24 * 60 * 60);

        let claims = auth_service
            .verify_token(&login_response.token, PURPOSE_ACCESS)
            .unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.purpose, PURPOSE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let auth_service = service_with_secret("test-secret-key");
        let result = auth_service.verify_token("invalid-token", PURPOSE_ACCESS);
        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));
    }

    #[test]
    fn test_purpose_mismatch_rejected() {
        let auth_service = service_with_secret("test-secret-key");

        let reset_token = auth_service.generate_password_reset_token("user-1").unwrap();
        let result = auth_service.extract_user_id_from_token(&reset_token);
        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        let verify_token = auth_service
            .generate_email_verification_token("user-1")
            .unwrap();
        assert!(auth_service
            .verify_token(&verify_token, PURPOSE_VERIFY_EMAIL)
            .is_ok());
        assert!(auth_service
            .verify_token(&verify_token, PURPOSE_RESET_PASSWORD)
            .is_err());
    }

    #[test]
    fn test_different_secrets_produce_incompatible_tokens() {
        let auth_service1 = service_with_secret("secret1");
        let auth_service2 = service_with_secret("secret2");

        let token1 = auth_service1.generate_access_token("user-1").unwrap().token;
        let token2 = auth_service2.generate_access_token("user-1").unwrap().token;
        assert_ne!(token1, token2);

        assert!(auth_service1.verify_token(&token1, PURPOSE_ACCESS).is_ok());
        assert!(auth_service2.verify_token(&token1, PURPOSE_ACCESS).is_err());
        assert!(auth_service1.verify_token(&token2, PURPOSE_ACCESS).is_err());
    }

    #[tokio::test]
    async fn test_authenticate_user_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_account_by_email().returning(|_| {
            Box::pin(async {
                let hash = crate::crypto::password::hash_password("right-password").unwrap();
                Ok(crate::models::user::UserAccount::new(
                    "alex@club.test".to_string(),
                    hash,
                    "Alex".to_string(),
                ))
            })
        });

        let auth_service = AuthService::with_jwt_secret(
            Arc::new(UserService::new(Arc::new(mock_repo))),
            "test-secret-key".to_string(),
        );

        let result = auth_service
            .authenticate_user("alex@club.test", "wrong-password")
            .await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_user_unknown_email_is_invalid_credentials() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_account_by_email().returning(|_| {
            Box::pin(async {
                Err(crate::repositories::errors::user_repository_errors::UserRepositoryError::NotFound)
            })
        });

        let auth_service = AuthService::with_jwt_secret(
            Arc::new(UserService::new(Arc::new(mock_repo))),
            "test-secret-key".to_string(),
        );

        let result = auth_service
            .authenticate_user("nobody@club.test", "whatever")
            .await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_user_correct_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_account_by_email().returning(|_| {
            Box::pin(async {
                let hash = crate::crypto::password::hash_password("right-password").unwrap();
                Ok(crate::models::user::UserAccount::new(
                    "alex@club.test".to_string(),
                    hash,
                    "Alex".to_string(),
                ))
            })
        });

        let auth_service = AuthService::with_jwt_secret(
            Arc::new(UserService::new(Arc::new(mock_repo))),
            "test-secret-key".to_string(),
        );

        let response = auth_service
            .authenticate_user("alex@club.test", "right-password")
            .await
            .unwrap();
        assert_eq!(response.token_type, "Bearer");
    }
}
