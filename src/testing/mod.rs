//! In-memory repositories and fixtures for unit and router tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::password;
use crate::auth::JwtKeys;
use crate::config::PaginationConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{HelpCenterTopic, Profile, User, UserRecord, UserType};
use crate::database::repository::{TopicRepository, UserIdentifier, UserRepository};
use crate::middleware::AuthUser;
use crate::services::{AuthService, HelpCenterService, UserService};
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const SEED_PASSWORD: &str = "Password.123";
const TEST_BCRYPT_COST: u32 = 4;

static SEED_SEQUENCE: AtomicI64 = AtomicI64::new(0);

fn write_failure() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::Protocol("simulated write failure".to_string()))
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
    profiles: RwLock<HashMap<Uuid, Profile>>,
    saves: AtomicUsize,
    page_queries: AtomicUsize,
    fail_writes: AtomicBool,
    stale_email_lookups: AtomicBool,
}

impl InMemoryUserRepository {
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Insert or replace a user directly, bypassing write counters.
    pub async fn put(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn page_queries(&self) -> usize {
        self.page_queries.load(Ordering::SeqCst)
    }

    /// Make every subsequent insert and save fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Make `find_by_email` miss, as if another writer committed after the lookup.
    pub fn stale_email_lookups(&self) {
        self.stale_email_lookups.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        if self.stale_email_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn find_record(&self, identifier: &UserIdentifier) -> Result<Option<UserRecord>, DatabaseError> {
        let user = match identifier {
            UserIdentifier::Id(id) => self.find_by_id(*id).await?,
            UserIdentifier::Email(email) => self.find_by_email(email).await?,
        };

        let Some(user) = user else {
            return Ok(None);
        };
        let profile = self.profiles.read().await.get(&user.id).cloned();

        Ok(Some(UserRecord {
            user,
            profile,
            organisation_members: Vec::new(),
            owned_organisations: Vec::new(),
        }))
    }

    async fn insert(&self, user: &User, profile: &Profile) -> Result<(), DatabaseError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(write_failure());
        }

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DatabaseError::Duplicate("users_email_key".to_string()));
        }
        users.insert(user.id, user.clone());
        self.profiles.write().await.insert(user.id, profile.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> Result<User, DatabaseError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(write_failure());
        }

        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DatabaseError::NotFound(format!("user {}", user.id)));
        }

        let mut stored = user.clone();
        stored.updated_at = Utc::now();
        users.insert(stored.id, stored.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(stored)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), DatabaseError> {
        self.page_queries.fetch_add(1, Ordering::SeqCst);

        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = users.len() as i64;
        let page = users
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        Ok((page, total))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTopicRepository {
    topics: RwLock<HashMap<Uuid, HelpCenterTopic>>,
    fail_writes: AtomicBool,
}

impl InMemoryTopicRepository {
    pub async fn get(&self, id: Uuid) -> Option<HelpCenterTopic> {
        self.topics.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.topics.read().await.len()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn insert(&self, topic: &HelpCenterTopic) -> Result<HelpCenterTopic, DatabaseError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(write_failure());
        }
        self.topics.write().await.insert(topic.id, topic.clone());
        Ok(topic.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HelpCenterTopic>, DatabaseError> {
        Ok(self.get(id).await)
    }

    async fn find_active(&self) -> Result<Vec<HelpCenterTopic>, DatabaseError> {
        let mut topics: Vec<HelpCenterTopic> = self
            .topics
            .read()
            .await
            .values()
            .filter(|t| !t.is_deleted)
            .cloned()
            .collect();
        topics.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(topics)
    }

    async fn save(&self, topic: &HelpCenterTopic) -> Result<HelpCenterTopic, DatabaseError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(write_failure());
        }

        let mut topics = self.topics.write().await;
        if !topics.contains_key(&topic.id) {
            return Err(DatabaseError::NotFound(format!("help center topic {}", topic.id)));
        }

        let mut stored = topic.clone();
        stored.updated_at = Utc::now();
        topics.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

/// Repositories, signing keys and pagination shared by one test
pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub topics: Arc<InMemoryTopicRepository>,
    pub jwt: Arc<JwtKeys>,
    pub pagination: PaginationConfig,
}

impl TestContext {
    pub fn new() -> Self {
        let jwt = JwtKeys::new(TEST_JWT_SECRET, 24).expect("test secret is not empty");

        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            topics: Arc::new(InMemoryTopicRepository::default()),
            jwt: Arc::new(jwt),
            pagination: PaginationConfig::default(),
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.users.clone(),
            self.topics.clone(),
            self.jwt.clone(),
            self.pagination,
            TEST_BCRYPT_COST,
        )
    }

    pub fn user_service(&self) -> UserService {
        self.state().user_service()
    }

    pub fn auth_service(&self) -> AuthService {
        self.state().auth_service()
    }

    pub fn help_center_service(&self) -> HelpCenterService {
        self.state().help_center_service()
    }

    /// Bearer token for a stored user
    pub fn token_for(&self, user: &User) -> String {
        self.jwt.issue(user).expect("token signs")
    }
}

/// Store a "John Doe" account with `SEED_PASSWORD`. Each call gets a later `created_at`.
pub async fn seed_user(ctx: &TestContext, email: &str, user_type: UserType) -> User {
    let hash = password::hash_password(SEED_PASSWORD, TEST_BCRYPT_COST)
        .await
        .expect("hash seed password");

    let mut user = User::new(
        email.to_lowercase(),
        "John".to_string(),
        "Doe".to_string(),
        hash,
        None,
        user_type,
    );
    let sequence = SEED_SEQUENCE.fetch_add(1, Ordering::SeqCst);
    user.created_at = Utc::now() + Duration::seconds(sequence);
    user.updated_at = user.created_at;

    let profile = Profile::for_user(user.id, &user.email);
    ctx.users.insert(&user, &profile).await.expect("seed user");
    user
}

pub fn auth_user(user: &User) -> AuthUser {
    AuthUser {
        id: user.id,
        email: user.email.clone(),
        user_type: user.user_type,
    }
}
