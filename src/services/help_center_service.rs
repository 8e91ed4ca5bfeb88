use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{HelpCenterTopic, TopicView};
use crate::database::repository::{TopicRepository, UserRepository};
use crate::middleware::AuthUser;
use crate::services::validation::{FieldErrors, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum TopicError {
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Help center topic not found")]
    NotFound,
    #[error("{0}")]
    WriteFailed(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHelpCenterTopicDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHelpCenterTopicDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Which mutation a super-admin check is guarding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicAction {
    Create,
    Update,
    Delete,
}

impl TopicAction {
    fn forbidden_message(self) -> &'static str {
        match self {
            TopicAction::Create => "Only Super Admins can create help center topics",
            TopicAction::Update => "Only Super Admins can update help center topics",
            TopicAction::Delete => "Only Super Admins can delete help center topics",
        }
    }
}

#[derive(Clone)]
pub struct HelpCenterService {
    topics: Arc<dyn TopicRepository>,
    users: Arc<dyn UserRepository>,
}

impl HelpCenterService {
    pub fn new(topics: Arc<dyn TopicRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { topics, users }
    }

    pub fn ensure_super_admin(&self, actor: &AuthUser, action: TopicAction) -> Result<(), TopicError> {
        if actor.user_type.is_super_admin() {
            return Ok(());
        }
        tracing::warn!("User {} ({}) denied topic {:?}", actor.id, actor.user_type, action);
        Err(TopicError::Forbidden(action.forbidden_message()))
    }

    pub async fn create_topic(
        &self,
        dto: CreateHelpCenterTopicDto,
        actor: &AuthUser,
    ) -> Result<TopicView, TopicError> {
        self.ensure_super_admin(actor, TopicAction::Create)?;

        let mut errors = FieldErrors::new();
        errors.require("title", dto.title.as_deref());
        errors.require("content", dto.content.as_deref());
        errors.finish("Invalid help center topic")?;

        let author = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or(TopicError::Forbidden("Author account not found"))?;

        let topic = HelpCenterTopic::new(
            dto.title.unwrap_or_default().trim().to_string(),
            dto.content.unwrap_or_default(),
            author.full_name(),
            author.id,
        );

        let saved = self.topics.insert(&topic).await.map_err(|e| {
            tracing::error!("Failed to create help center topic: {}", e);
            TopicError::WriteFailed("Failed to create help center topic")
        })?;

        tracing::info!("Help center topic {} created by {}", saved.id, author.id);
        Ok(TopicView::from(saved))
    }

    pub async fn list_topics(&self) -> Result<Vec<TopicView>, TopicError> {
        let topics = self.topics.find_active().await?;
        Ok(topics.into_iter().map(TopicView::from).collect())
    }

    pub async fn get_topic(&self, topic_id: &str) -> Result<TopicView, TopicError> {
        Ok(TopicView::from(self.find_active_topic(topic_id).await?))
    }

    /// Edit title or content. The recorded author is left unchanged.
    pub async fn update_topic(
        &self,
        topic_id: &str,
        dto: UpdateHelpCenterTopicDto,
        actor: &AuthUser,
    ) -> Result<TopicView, TopicError> {
        self.ensure_super_admin(actor, TopicAction::Update)?;

        let mut errors = FieldErrors::new();
        errors.non_blank("title", dto.title.as_deref());
        errors.non_blank("content", dto.content.as_deref());
        if dto.title.is_none() && dto.content.is_none() {
            errors.add("title", "Provide a title or content to update");
        }
        errors.finish("Invalid help center topic")?;

        let mut topic = self.find_active_topic(topic_id).await?;
        if let Some(title) = dto.title {
            topic.title = title.trim().to_string();
        }
        if let Some(content) = dto.content {
            topic.content = content;
        }

        let saved = self.topics.save(&topic).await.map_err(|e| {
            tracing::error!("Failed to update help center topic {}: {}", topic.id, e);
            TopicError::WriteFailed("Failed to update help center topic")
        })?;

        Ok(TopicView::from(saved))
    }

    /// Soft delete: the row stays and is flagged `is_deleted`.
    pub async fn delete_topic(&self, topic_id: &str, actor: &AuthUser) -> Result<(), TopicError> {
        self.ensure_super_admin(actor, TopicAction::Delete)?;

        let mut topic = self.find_active_topic(topic_id).await?;
        topic.is_deleted = true;

        self.topics.save(&topic).await.map_err(|e| {
            tracing::error!("Failed to delete help center topic {}: {}", topic.id, e);
            TopicError::WriteFailed("Failed to delete help center topic")
        })?;

        tracing::info!("Help center topic {} soft-deleted by {}", topic.id, actor.id);
        Ok(())
    }

    async fn find_active_topic(&self, topic_id: &str) -> Result<HelpCenterTopic, TopicError> {
        let id = Uuid::parse_str(topic_id.trim()).map_err(|_| TopicError::NotFound)?;
        self.topics
            .find_by_id(id)
            .await?
            .filter(|t| !t.is_deleted)
            .ok_or(TopicError::NotFound)
    }
}
