use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: Option<String>,
    pub job_title: Option<String>,
    pub pronouns: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub social_links: Vec<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub timezones: Option<String>,
    pub profile_pic_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Empty profile created alongside a new account.
    pub fn for_user(user_id: Uuid, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            username: None,
            job_title: None,
            pronouns: None,
            department: None,
            email: Some(email.to_string()),
            bio: None,
            social_links: Vec::new(),
            language: None,
            region: None,
            timezones: None,
            profile_pic_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}
