use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{HelpCenterTopic, Organisation, OrganisationMember, Profile, User, UserRecord};
use crate::database::repository::{TopicRepository, UserIdentifier, UserRepository};

const USER_COLUMNS: &str = "id, email, first_name, last_name, password, phone, user_type, is_active, \
     secret, is_2fa_enabled, backup_codes, attempts_left, time_left, created_at, updated_at";

// One statement, so the user row and its profile commit or fail together.
const INSERT_USER_WITH_PROFILE: &str = "WITH new_user AS (
         INSERT INTO users (id, email, first_name, last_name, password, phone, user_type, is_active,
             secret, is_2fa_enabled, backup_codes, attempts_left, time_left, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
         RETURNING id
     )
     INSERT INTO profiles (id, user_id, username, job_title, pronouns, department, email, bio,
         social_links, language, region, timezones, profile_pic_url, created_at, updated_at)
     SELECT $16, new_user.id, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29
     FROM new_user";

const TOPIC_COLUMNS: &str = "id, title, content, author, is_deleted, user_id, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_relations(&self, user: User) -> Result<UserRecord, DatabaseError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, user_id, username, job_title, pronouns, department, email, bio, social_links,
             language, region, timezones, profile_pic_url, created_at, updated_at
             FROM profiles
             WHERE user_id = $1",
        )
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await?;

        let organisation_members = sqlx::query_as::<_, OrganisationMember>(
            "SELECT id, organisation_id, user_id, role, created_at, updated_at
             FROM organisation_members
             WHERE user_id = $1
             ORDER BY created_at",
        )
        .bind(user.id)
        .fetch_all(&self.pool)
        .await?;

        let owned_organisations = sqlx::query_as::<_, Organisation>(
            "SELECT id, name, description, owner_id, creator_id, created_at, updated_at
             FROM organisations
             WHERE owner_id = $1
             ORDER BY created_at",
        )
        .bind(user.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserRecord {
            user,
            profile,
            organisation_members,
            owned_organisations,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE lower(email) = lower($1)", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_record(&self, identifier: &UserIdentifier) -> Result<Option<UserRecord>, DatabaseError> {
        let user = match identifier {
            UserIdentifier::Id(id) => self.find_by_id(*id).await?,
            UserIdentifier::Email(email) => self.find_by_email(email).await?,
        };

        match user {
            Some(user) => Ok(Some(self.load_relations(user).await?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, user: &User, profile: &Profile) -> Result<(), DatabaseError> {
        sqlx::query(INSERT_USER_WITH_PROFILE)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.password)
            .bind(&user.phone)
            .bind(user.user_type.as_str())
            .bind(user.is_active)
            .bind(&user.secret)
            .bind(user.is_2fa_enabled)
            .bind(&user.backup_codes)
            .bind(user.attempts_left)
            .bind(user.time_left)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(profile.id)
            .bind(&profile.username)
            .bind(&profile.job_title)
            .bind(&profile.pronouns)
            .bind(&profile.department)
            .bind(&profile.email)
            .bind(&profile.bio)
            .bind(&profile.social_links)
            .bind(&profile.language)
            .bind(&profile.region)
            .bind(&profile.timezones)
            .bind(&profile.profile_pic_url)
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_unique_violation)?;

        Ok(())
    }

    async fn save(&self, user: &User) -> Result<User, DatabaseError> {
        let sql = format!(
            "UPDATE users
             SET first_name = $2, last_name = $3, phone = $4, user_type = $5, is_active = $6,
                 password = $7, secret = $8, is_2fa_enabled = $9, backup_codes = $10,
                 attempts_left = $11, time_left = $12, updated_at = $13
             WHERE id = $1
             RETURNING {}",
            USER_COLUMNS
        );

        let saved = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .bind(user.user_type.as_str())
            .bind(user.is_active)
            .bind(&user.password)
            .bind(&user.secret)
            .bind(user.is_2fa_enabled)
            .bind(&user.backup_codes)
            .bind(user.attempts_left)
            .bind(user.time_left)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        saved.ok_or_else(|| DatabaseError::NotFound(format!("user {}", user.id)))
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<(Vec<User>, i64), DatabaseError> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at DESC OFFSET $1 LIMIT $2",
            USER_COLUMNS
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok((users, total.0))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    async fn insert(&self, topic: &HelpCenterTopic) -> Result<HelpCenterTopic, DatabaseError> {
        let sql = format!(
            "INSERT INTO help_center_topics (id, title, content, author, is_deleted, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            TOPIC_COLUMNS
        );

        let saved = sqlx::query_as::<_, HelpCenterTopic>(&sql)
            .bind(topic.id)
            .bind(&topic.title)
            .bind(&topic.content)
            .bind(&topic.author)
            .bind(topic.is_deleted)
            .bind(topic.user_id)
            .bind(topic.created_at)
            .bind(topic.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<HelpCenterTopic>, DatabaseError> {
        let sql = format!("SELECT {} FROM help_center_topics WHERE id = $1", TOPIC_COLUMNS);
        let topic = sqlx::query_as::<_, HelpCenterTopic>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(topic)
    }

    async fn find_active(&self) -> Result<Vec<HelpCenterTopic>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM help_center_topics WHERE is_deleted = false ORDER BY created_at DESC",
            TOPIC_COLUMNS
        );
        let topics = sqlx::query_as::<_, HelpCenterTopic>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(topics)
    }

    async fn save(&self, topic: &HelpCenterTopic) -> Result<HelpCenterTopic, DatabaseError> {
        let sql = format!(
            "UPDATE help_center_topics
             SET title = $2, content = $3, is_deleted = $4, updated_at = $5
             WHERE id = $1
             RETURNING {}",
            TOPIC_COLUMNS
        );

        let saved = sqlx::query_as::<_, HelpCenterTopic>(&sql)
            .bind(topic.id)
            .bind(&topic.title)
            .bind(&topic.content)
            .bind(topic.is_deleted)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        saved.ok_or_else(|| DatabaseError::NotFound(format!("help center topic {}", topic.id)))
    }
}
