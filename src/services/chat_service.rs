use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::middleware::auth::Identity;
use crate::models::application::Application;
use crate::models::message::Message;
use crate::services::application_service::ApplicationService;
use crate::utils::time::SharedClock;

const MESSAGE_COLUMNS: &str =
    "id, application_id, sender_id, recipient_id, content, sent_at, is_read";

pub const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Clone)]
pub struct ChatService {
    pool: SqlitePool,
    clock: SharedClock,
    applications: ApplicationService,
}

impl ChatService {
    pub fn new(pool: SqlitePool, clock: SharedClock, applications: ApplicationService) -> Self {
        Self {
            pool,
            clock,
            applications,
        }
    }

    /// Parties first, then the match itself: the channel opens on acceptance.
    async fn channel_for(&self, identity: &Identity, application_id: i64) -> Result<Application> {
        let application = self.applications.get(application_id).await?;
        if !application.is_party(identity.user_id) {
            return Err(Error::Unauthorized(
                "You are not part of this conversation".into(),
            ));
        }
        if !application.is_match() {
            return Err(Error::InvalidState(
                "Chat is only available once the application has been accepted".into(),
            ));
        }
        Ok(application)
    }

    /// Appends a message addressed to the other party of an accepted
    /// application.
    pub async fn post_message(
        &self,
        identity: &Identity,
        application_id: i64,
        content: &str,
    ) -> Result<Message> {
        let application = self.applications.get(application_id).await?;
        if !application.is_match() {
            return Err(Error::InvalidState(
                "Chat is only available once the application has been accepted".into(),
            ));
        }
        let recipient = application.counterpart(identity.user_id).ok_or_else(|| {
            Error::Unauthorized("You are not part of this conversation".into())
        })?;

        let content = content.trim();
        if content.is_empty() {
            return Err(Error::BadRequest("Message content is required".into()));
        }
        if content.chars().count() > MAX_MESSAGE_CHARS {
            return Err(Error::BadRequest(format!(
                "Message is longer than {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (application_id, sender_id, recipient_id, content, sent_at, is_read)
            VALUES (?, ?, ?, ?, ?, 0)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(application_id)
        .bind(identity.user_id)
        .bind(recipient)
        .bind(content)
        .bind(self.clock.now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(application_id, message_id = message.id, "message posted");
        Ok(message)
    }

    /// Whole conversation, oldest first; insertion order breaks timestamp ties.
    pub async fn list_messages(&self, identity: &Identity, application_id: i64) -> Result<Vec<Message>> {
        self.channel_for(identity, application_id).await?;
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {} FROM messages WHERE application_id = ? ORDER BY sent_at ASC, id ASC",
            MESSAGE_COLUMNS
        ))
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    /// Marks every message addressed to the reader in this channel as read.
    pub async fn mark_read(&self, identity: &Identity, application_id: i64) -> Result<u64> {
        self.channel_for(identity, application_id).await?;
        let result = sqlx::query(
            "UPDATE messages SET is_read = 1 WHERE application_id = ? AND recipient_id = ? AND is_read = 0",
        )
        .bind(application_id)
        .bind(identity.user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(&self, identity: &Identity) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM messages WHERE recipient_id = ? AND is_read = 0",
        )
        .bind(identity.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
