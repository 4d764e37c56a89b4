use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lambda_http::tracing::{debug, error};

use crate::{error::ApiError, state::AppState};
use shared::models::auth::requests::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, VerifyEmailRequest,
};
use shared::models::auth::responses::{LoginResponse, PasswordResetResponse, RegisterResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let account = state
        .user_service
        .register(&payload.display_name, &payload.email, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to register {}: {}", payload.email, e);
            ApiError::from(e)
        })?;

    let verification_token = state
        .auth_service
        .generate_email_verification_token(&account.id)
        .map_err(ApiError::from)?;

    debug!("User registered successfully: {}", payload.email);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: account.id,
            verification_token,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    state
        .auth_service
        .authenticate_user(&payload.email, &payload.password)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to authenticate {}: {}", payload.email, e);
            ApiError::from(e)
        })
}

async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .verify_email(&payload.token)
        .await
        .map_err(|e| {
            error!("Failed to verify email: {}", e);
            ApiError::from(e)
        })?;
    Ok(StatusCode::OK)
}

async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<PasswordResetResponse>, ApiError> {
    let reset_token = state
        .auth_service
        .request_password_reset(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to issue password reset for {}: {}", payload.email, e);
            ApiError::from(e)
        })?;
    Ok(Json(PasswordResetResponse { reset_token }))
}

async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .reset_password(&payload.token, &payload.new_password)
        .await
        .map_err(|e| {
            error!("Failed to reset password: {}", e);
            ApiError::from(e)
        })?;
    debug!("Password reset completed");
    Ok(StatusCode::NO_CONTENT)
}
