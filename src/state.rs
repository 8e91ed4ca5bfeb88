use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{JwtError, JwtKeys};
use crate::config::{AppConfig, PaginationConfig};
use crate::database::postgres::{PgTopicRepository, PgUserRepository};
use crate::database::repository::{TopicRepository, UserRepository};
use crate::services::{AuthService, HelpCenterService, UserService};

/// Shared handler state. Services are cheap to build from it per request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub jwt: Arc<JwtKeys>,
    pub pagination: PaginationConfig,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        topics: Arc<dyn TopicRepository>,
        jwt: Arc<JwtKeys>,
        pagination: PaginationConfig,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            topics,
            jwt,
            pagination,
            bcrypt_cost,
        }
    }

    /// Postgres-backed state for the running server
    pub fn from_pool(pool: PgPool, config: &AppConfig) -> Result<Self, JwtError> {
        let jwt = JwtKeys::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)?;

        Ok(Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTopicRepository::new(pool)),
            Arc::new(jwt),
            config.pagination,
            config.security.bcrypt_cost,
        ))
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone(), self.pagination, self.bcrypt_cost)
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.users.clone(), self.user_service(), self.jwt.clone())
    }

    pub fn help_center_service(&self) -> HelpCenterService {
        HelpCenterService::new(self.topics.clone(), self.users.clone())
    }
}
