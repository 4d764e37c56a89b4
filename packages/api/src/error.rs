use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, directory_service_errors::DirectoryServiceError,
    match_request_service_errors::MatchRequestServiceError,
    match_service_errors::MatchServiceError, profile_service_errors::ProfileServiceError,
    user_service_errors::UserServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    AuthService(AuthServiceError),
    ProfileService(ProfileServiceError),
    DirectoryService(DirectoryServiceError),
    MatchRequestService(MatchRequestServiceError),
    MatchService(MatchServiceError),
    Unauthorized,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl From<ProfileServiceError> for ApiError {
    fn from(error: ProfileServiceError) -> Self {
        ApiError::ProfileService(error)
    }
}

impl From<DirectoryServiceError> for ApiError {
    fn from(error: DirectoryServiceError) -> Self {
        ApiError::DirectoryService(error)
    }
}

impl From<MatchRequestServiceError> for ApiError {
    fn from(error: MatchRequestServiceError) -> Self {
        ApiError::MatchRequestService(error)
    }
}

impl From<MatchServiceError> for ApiError {
    fn from(error: MatchServiceError) -> Self {
        ApiError::MatchService(error)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UserService(UserServiceError::UserAlreadyExists) => StatusCode::CONFLICT,
            ApiError::UserService(UserServiceError::UserNotFound) => StatusCode::NOT_FOUND,
            ApiError::UserService(UserServiceError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            ApiError::UserService(
                UserServiceError::RepositoryError(_) | UserServiceError::HashingError(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::AuthService(AuthServiceError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::AuthService(
                AuthServiceError::InvalidToken | AuthServiceError::ExpiredToken,
            ) => StatusCode::UNAUTHORIZED,
            ApiError::AuthService(AuthServiceError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            ApiError::AuthService(AuthServiceError::UserServiceError(
                UserServiceError::UserNotFound,
            )) => StatusCode::NOT_FOUND,
            ApiError::AuthService(
                AuthServiceError::UserServiceError(_) | AuthServiceError::JwtError(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::ProfileService(ProfileServiceError::ProfileNotFound) => StatusCode::NOT_FOUND,
            ApiError::ProfileService(ProfileServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ProfileService(ProfileServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::DirectoryService(DirectoryServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::MatchRequestService(
                MatchRequestServiceError::RequestNotFound
                | MatchRequestServiceError::RequesteeNotFound
                | MatchRequestServiceError::ProfileNotFound,
            ) => StatusCode::NOT_FOUND,
            ApiError::MatchRequestService(MatchRequestServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MatchRequestService(MatchRequestServiceError::AlreadyResolved) => {
                StatusCode::CONFLICT
            }
            ApiError::MatchRequestService(MatchRequestServiceError::NotPermitted) => {
                StatusCode::FORBIDDEN
            }
            ApiError::MatchRequestService(MatchRequestServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::MatchService(MatchServiceError::MatchNotFound) => StatusCode::NOT_FOUND,
            ApiError::MatchService(MatchServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MatchService(MatchServiceError::NotParticipant) => StatusCode::FORBIDDEN,
            ApiError::MatchService(MatchServiceError::RepositoryError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::UserService(err) => err.to_string(),
            ApiError::AuthService(err) => err.to_string(),
            ApiError::ProfileService(err) => err.to_string(),
            ApiError::DirectoryService(err) => err.to_string(),
            ApiError::MatchRequestService(err) => err.to_string(),
            ApiError::MatchService(err) => err.to_string(),
            ApiError::Unauthorized => "Unauthorized".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal detail stays out of the response body.
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.message()
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
