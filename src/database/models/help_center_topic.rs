use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct HelpCenterTopic {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Creator's name captured at creation; never recomputed.
    pub author: String,
    pub is_deleted: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HelpCenterTopic {
    pub fn new(title: String, content: String, author: String, user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            author,
            is_deleted: false,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Wire shape of a topic in responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HelpCenterTopic> for TopicView {
    fn from(topic: HelpCenterTopic) -> Self {
        Self {
            id: topic.id,
            title: topic.title,
            content: topic.content,
            author: topic.author,
            is_deleted: topic.is_deleted,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}
