use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{self, PasswordError};
use crate::config::PaginationConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{Organisation, OrganisationMember, Profile, User, UserRecord, UserType, UserView};
use crate::database::repository::{UserIdentifier, UserRepository};
use crate::middleware::AuthUser;
use crate::services::validation::{FieldErrors, ValidationError};
use crate::types::{PageQuery, PageRequest, Pagination};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User ID is required")]
    MissingId,
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("User already exists: {0}")]
    EmailTaken(String),
    #[error("Confirmation needs to be true for deactivation")]
    ConfirmationRequired,
    #[error("{0}")]
    WriteFailed(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone)]
pub struct CreateUserOptions {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub user_type: UserType,
}

impl CreateUserOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.email("email", self.email.trim());
        errors.require("first_name", Some(&self.first_name));
        errors.require("last_name", Some(&self.last_name));
        errors.password("password", &self.password);
        errors.non_blank("phone_number", self.phone_number.as_deref());
        errors.finish("Invalid user details")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

impl UpdateUserDto {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.non_blank("first_name", self.first_name.as_deref());
        errors.non_blank("last_name", self.last_name.as_deref());
        errors.non_blank("phone_number", self.phone_number.as_deref());
        errors.finish("Invalid user details")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeactivateAccountDto {
    #[serde(default)]
    pub confirmation: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdatedUser {
    pub id: Uuid,
    pub name: String,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeactivatedUser {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: UserView,
    pub profile: Option<Profile>,
    pub organisation_members: Vec<OrganisationMember>,
    pub owned_organisations: Vec<Organisation>,
}

impl From<UserRecord> for UserDetails {
    fn from(record: UserRecord) -> Self {
        Self {
            user: UserView::from(&record.user),
            profile: record.profile,
            organisation_members: record.organisation_members,
            owned_organisations: record.owned_organisations,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.full_name(),
            email: user.email.clone(),
            phone_number: user.phone.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserList {
    pub users: Vec<UserSummary>,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    pagination: PaginationConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, pagination: PaginationConfig, bcrypt_cost: u32) -> Self {
        Self {
            users,
            pagination,
            bcrypt_cost,
        }
    }

    /// Create an account and its empty profile
    pub async fn create_user(&self, options: CreateUserOptions) -> Result<User, UserError> {
        options.validate()?;

        let email = options.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(UserError::EmailTaken(email));
        }

        let password_hash = password::hash_password(&options.password, self.bcrypt_cost).await?;
        let user = User::new(
            email,
            options.first_name.trim().to_string(),
            options.last_name.trim().to_string(),
            password_hash,
            options.phone_number.map(|p| p.trim().to_string()),
            options.user_type,
        );
        let profile = Profile::for_user(user.id, &user.email);

        self.users.insert(&user, &profile).await.map_err(|e| match e {
            DatabaseError::Duplicate(_) => UserError::EmailTaken(user.email.clone()),
            e => {
                tracing::error!("Failed to create user {}: {}", user.email, e);
                UserError::WriteFailed("Failed to create user")
            }
        })?;

        tracing::info!("Created {} account {}", user.user_type, user.id);
        Ok(user)
    }

    pub async fn get_user_record(&self, identifier: &UserIdentifier) -> Result<Option<UserRecord>, UserError> {
        Ok(self.users.find_record(identifier).await?)
    }

    /// Update profile fields. Only the user themself or a super admin may do this.
    pub async fn update_user(
        &self,
        user_id: &str,
        dto: UpdateUserDto,
        actor: &AuthUser,
    ) -> Result<UpdatedUser, UserError> {
        let id = parse_user_id(user_id)?;
        let mut user = self.users.find_by_id(id).await?.ok_or(UserError::NotFound)?;

        let acting = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or(UserError::Forbidden("You are not authorized to update this user"))?;

        if acting.id != user.id && !acting.user_type.is_super_admin() {
            tracing::warn!("User {} attempted to update user {}", acting.id, user.id);
            return Err(UserError::Forbidden("You are not authorized to update this user"));
        }

        dto.validate()?;

        if let Some(first_name) = dto.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = dto.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(phone_number) = dto.phone_number {
            user.phone = Some(phone_number.trim().to_string());
        }

        let saved = self.users.save(&user).await.map_err(|e| {
            tracing::error!("Failed to update user {}: {}", user.id, e);
            UserError::WriteFailed("Failed to update user")
        })?;

        Ok(UpdatedUser {
            id: saved.id,
            name: saved.full_name(),
            phone_number: saved.phone,
        })
    }

    pub async fn deactivate_user(
        &self,
        user_id: &str,
        dto: DeactivateAccountDto,
    ) -> Result<DeactivatedUser, UserError> {
        let id = parse_user_id(user_id)?;
        let mut user = self.users.find_by_id(id).await?.ok_or(UserError::NotFound)?;

        if !dto.confirmation {
            return Err(UserError::ConfirmationRequired);
        }

        user.is_active = false;
        self.users.save(&user).await.map_err(|e| {
            tracing::error!("Failed to deactivate user {}: {}", user.id, e);
            UserError::WriteFailed("Failed to deactivate user")
        })?;

        tracing::info!(
            "Deactivated user {} (reason: {})",
            user.id,
            dto.reason.as_deref().unwrap_or("none given")
        );

        Ok(DeactivatedUser { is_active: false })
    }

    pub async fn get_user_data_without_password_by_id(&self, user_id: &str) -> Result<UserDetails, UserError> {
        let id = parse_user_id(user_id)?;
        let record = self
            .get_user_record(&UserIdentifier::Id(id))
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(UserDetails::from(record))
    }

    /// Paginated listing, super admins only
    pub async fn get_users_by_admin(&self, query: PageQuery, actor: &AuthUser) -> Result<UserList, UserError> {
        let acting = self.users.find_by_id(actor.id).await?;
        if !acting.map(|u| u.user_type.is_super_admin()).unwrap_or(false) {
            tracing::warn!("User {} attempted to list users", actor.id);
            return Err(UserError::Forbidden("You are not authorized to view users"));
        }

        let page = PageRequest::resolve(query, &self.pagination);
        let (users, total) = self.users.find_page(page.offset(), page.limit as i64).await?;

        Ok(UserList {
            users: users.iter().map(UserSummary::from).collect(),
            pagination: Pagination::new(page, total),
        })
    }
}

/// Blank ids are a client error; an id that cannot be a UUID cannot exist.
fn parse_user_id(user_id: &str) -> Result<Uuid, UserError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(UserError::MissingId);
    }
    Uuid::parse_str(trimmed).map_err(|_| UserError::NotFound)
}
