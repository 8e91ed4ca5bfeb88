use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::password::{self, PasswordError};
use crate::auth::{JwtError, JwtKeys};
use crate::database::manager::DatabaseError;
use crate::database::models::{User, UserType, UserView};
use crate::database::repository::UserRepository;
use crate::services::user_service::{CreateUserOptions, UserError, UserService};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    Deactivated,
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Token(#[from] JwtError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub user: UserView,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    user_service: UserService,
    jwt: Arc<JwtKeys>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, user_service: UserService, jwt: Arc<JwtKeys>) -> Self {
        Self {
            users,
            user_service,
            jwt,
        }
    }

    /// Self-registration always creates a regular user.
    pub async fn register(&self, dto: RegisterDto) -> Result<AuthPayload, AuthError> {
        let user = self
            .user_service
            .create_user(CreateUserOptions {
                email: dto.email,
                first_name: dto.first_name,
                last_name: dto.last_name,
                password: dto.password,
                phone_number: dto.phone_number,
                user_type: UserType::User,
            })
            .await?;

        self.payload_for(&user)
    }

    pub async fn login(&self, dto: LoginDto) -> Result<AuthPayload, AuthError> {
        let user = self
            .users
            .find_by_email(dto.email.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(&dto.password, &user.password).await? {
            tracing::warn!("Failed login attempt for {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthError::Deactivated);
        }

        tracing::info!("User {} logged in", user.id);
        self.payload_for(&user)
    }

    fn payload_for(&self, user: &User) -> Result<AuthPayload, AuthError> {
        Ok(AuthPayload {
            access_token: self.jwt.issue(user)?,
            token_type: "Bearer",
            expires_in: self.jwt.expiry_hours() * 3600,
            user: UserView::from(user),
        })
    }
}
