use std::sync::Arc;

use shared::services::auth_service::AuthService;
use shared::services::directory_service::DirectoryService;
use shared::services::match_request_service::MatchRequestService;
use shared::services::match_service::MatchService;
use shared::services::profile_service::ProfileService;
use shared::services::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub profile_service: Arc<ProfileService>,
    pub directory_service: Arc<DirectoryService>,
    pub match_request_service: Arc<MatchRequestService>,
    pub match_service: Arc<MatchService>,
}
