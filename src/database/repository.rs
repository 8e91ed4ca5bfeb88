use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{HelpCenterTopic, Profile, User, UserRecord};

/// How a user is looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdentifier {
    Id(Uuid),
    Email(String),
}

/// Storage operations the user and auth services rely on
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Load a user with profile, organisation memberships and owned organisations.
    async fn find_record(&self, identifier: &UserIdentifier) -> Result<Option<UserRecord>, DatabaseError>;

    /// Insert a new user and its profile.
    async fn insert(&self, user: &User, profile: &Profile) -> Result<(), DatabaseError>;

    /// Persist changes to an existing user, returning the stored row.
    async fn save(&self, user: &User) -> Result<User, DatabaseError>;

    /// Users ordered by `created_at` descending, plus the total count.
    async fn find_page(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Storage operations for help center topics
#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn insert(&self, topic: &HelpCenterTopic) -> Result<HelpCenterTopic, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HelpCenterTopic>, DatabaseError>;

    /// Topics not soft-deleted, newest first.
    async fn find_active(&self) -> Result<Vec<HelpCenterTopic>, DatabaseError>;

    async fn save(&self, topic: &HelpCenterTopic) -> Result<HelpCenterTopic, DatabaseError>;
}
