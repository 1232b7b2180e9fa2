//! Notification service
//!
//! Reads and read-flag updates on a user's notification log. Notifications
//! are appended by the other services through [`super::effects::SecondaryEffects`].

use social_core::{DomainError, Page, Snowflake};
use tracing::{info, instrument};

use crate::dto::{MarkAllReadResponse, NotificationResponse, OkResponse, UnreadCountResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let items = self
            .ctx
            .notification_repo()
            .list_for_user(user_id, page)
            .await?;
        Ok(items.into_iter().map(NotificationResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<UnreadCountResponse> {
        Ok(UnreadCountResponse {
            count: self.ctx.notification_repo().count_unread(user_id).await?,
        })
    }

    /// Mark one of the caller's notifications read
    ///
    /// # Errors
    /// `NotificationNotFound` if it does not exist or belongs to someone else
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        user_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<OkResponse> {
        if !self
            .ctx
            .notification_repo()
            .mark_read(notification_id, user_id)
            .await?
        {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }
        Ok(OkResponse::ok())
    }

    /// Mark all of the caller's notifications read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Snowflake) -> ServiceResult<MarkAllReadResponse> {
        let modified = self.ctx.notification_repo().mark_all_read(user_id).await?;
        info!(user_id = %user_id, modified, "Notifications marked read");

        Ok(MarkAllReadResponse { ok: true, modified })
    }
}
