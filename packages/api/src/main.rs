use axum::{routing::get, Router};
use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use shared::repositories::match_repository::DynamoDbMatchRepository;
use shared::repositories::match_request_repository::DynamoDbMatchRequestRepository;
use shared::repositories::profile_repository::DynamoDbProfileRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use shared::services::auth_service::AuthService;
use shared::services::directory_service::DirectoryService;
use shared::services::match_request_service::MatchRequestService;
use shared::services::match_service::MatchService;
use shared::services::profile_service::ProfileService;
use shared::services::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let user_repository = Arc::new(DynamoDbUserRepository::new(client.clone()));
    let user_service = Arc::new(UserService::new(user_repository));
    let auth_service = Arc::new(AuthService::new(user_service.clone()));

    let profile_repository = Arc::new(DynamoDbProfileRepository::new(client.clone()));
    let profile_service = Arc::new(ProfileService::new(profile_repository.clone()));
    let directory_service = Arc::new(DirectoryService::new(profile_repository.clone()));

    let match_request_repository = Arc::new(DynamoDbMatchRequestRepository::new(client.clone()));
    let match_request_service = Arc::new(MatchRequestService::new(
        match_request_repository,
        profile_repository,
    ));

    let match_repository = Arc::new(DynamoDbMatchRepository::new(client.clone()));
    let match_service = Arc::new(MatchService::new(match_repository));

    let app_state = state::AppState {
        auth_service,
        user_service,
        profile_service,
        directory_service,
        match_request_service,
        match_service,
    };

    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::auth::routes())
        .merge(routes::profile::routes())
        .merge(routes::players::routes())
        .merge(routes::requests::routes())
        .merge(routes::matches::routes())
        .merge(routes::ladder::routes())
        .layer(cors)
        .with_state(app_state);

    run(app).await
}
