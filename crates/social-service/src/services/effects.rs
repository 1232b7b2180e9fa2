//! Secondary effects
//!
//! Notification inserts and gateway pushes run after the primary write has
//! already succeeded. They are detached tasks: a failure is logged and never
//! reaches the caller.

use std::sync::Arc;

use social_core::{
    DomainEvent, EventPublisher, Notification, NotificationKind, NotificationRepository,
    RepoResult, Snowflake, SnowflakeGenerator,
};
use tracing::{debug, warn};

use crate::dto::NotificationResponse;

/// What a notification is about, beyond its kind
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationSubject {
    pub post_id: Option<Snowflake>,
    pub comment_id: Option<Snowflake>,
}

impl NotificationSubject {
    pub fn post(post_id: Snowflake) -> Self {
        Self {
            post_id: Some(post_id),
            comment_id: None,
        }
    }

    pub fn comment(post_id: Snowflake, comment_id: Snowflake) -> Self {
        Self {
            post_id: Some(post_id),
            comment_id: Some(comment_id),
        }
    }
}

/// Fire-and-forget dispatcher for notification and push work
#[derive(Clone)]
pub struct SecondaryEffects {
    notifications: Arc<dyn NotificationRepository>,
    publisher: Arc<dyn EventPublisher>,
    ids: Arc<SnowflakeGenerator>,
}

impl SecondaryEffects {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        publisher: Arc<dyn EventPublisher>,
        ids: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            notifications,
            publisher,
            ids,
        }
    }

    /// Append a notification for `recipient` and push it to their sessions.
    ///
    /// Does nothing when the actor is the recipient.
    pub fn notify(
        &self,
        recipient: Snowflake,
        actor: Snowflake,
        kind: NotificationKind,
        subject: NotificationSubject,
    ) {
        let Some(mut notification) =
            Notification::for_recipient(self.ids.generate(), recipient, actor, kind)
        else {
            return;
        };
        notification.post_id = subject.post_id;
        notification.comment_id = subject.comment_id;

        let this = self.clone();
        tokio::spawn(async move {
            if let Err(e) = this.deliver_notification(&notification).await {
                warn!(
                    error = %e,
                    recipient = %notification.user_id,
                    kind = %notification.kind,
                    "Failed to record notification"
                );
            }
        });
    }

    /// Push an event to every live session of `user_id`
    pub fn push(&self, user_id: Snowflake, event: DomainEvent) {
        let publisher = Arc::clone(&self.publisher);
        tokio::spawn(async move {
            let event_type = event.event_type();
            let delivered = publisher.publish_to_user(user_id, event).await;
            debug!(user_id = %user_id, event_type, delivered, "Event pushed");
        });
    }

    async fn deliver_notification(&self, notification: &Notification) -> RepoResult<()> {
        self.notifications.create(notification).await?;

        let Some(details) = self.notifications.find_details(notification.id).await? else {
            return Ok(());
        };
        let payload = match serde_json::to_value(NotificationResponse::from(details)) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize notification payload");
                return Ok(());
            }
        };

        self.publisher
            .publish_to_user(notification.user_id, DomainEvent::NotificationCreate(payload))
            .await;
        Ok(())
    }
}

impl std::fmt::Debug for SecondaryEffects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecondaryEffects").finish_non_exhaustive()
    }
}
