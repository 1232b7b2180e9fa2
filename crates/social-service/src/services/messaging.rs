//! Messaging service
//!
//! Direct messages between two users. Threads are not stored: every listing
//! is derived from the viewer's messages by [`social_core::aggregate_threads`].
//! Both mark-read operations are idempotent.

use social_core::{aggregate_threads, Attachment, DomainError, DomainEvent, Message, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    ConversationResponse, MessageResponse, MessageWithParticipants, PublicUserResponse,
    ReadReceiptResponse, SendMessageRequest, SendMessageResponse, ThreadResponse, ThreadWithPeer,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lookup::{require_user, users_by_id};

/// Messaging service
pub struct MessagingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessagingService<'a> {
    /// Create a new MessagingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One row per conversation partner, most recent activity first.
    ///
    /// Threads whose partner no longer exists are dropped.
    #[instrument(skip(self))]
    pub async fn list_threads(&self, viewer: Snowflake) -> ServiceResult<Vec<ThreadResponse>> {
        let messages = self.ctx.message_repo().find_for_participant(viewer).await?;
        let threads = aggregate_threads(viewer, messages);

        let peers = users_by_id(self.ctx, threads.iter().map(|t| t.peer_id)).await?;

        Ok(threads
            .into_iter()
            .filter_map(|thread| match peers.get(&thread.peer_id) {
                Some(peer) => Some(ThreadResponse::from(ThreadWithPeer { thread, peer })),
                None => {
                    warn!(peer_id = %thread.peer_id, "Dropping thread with unknown peer");
                    None
                }
            })
            .collect())
    }

    /// The full conversation with `peer_id`, oldest first. Has no side effects.
    #[instrument(skip(self))]
    pub async fn get_thread(
        &self,
        viewer: Snowflake,
        peer_id: Snowflake,
    ) -> ServiceResult<ConversationResponse> {
        let peer = require_user(self.ctx, peer_id).await?;
        let me = require_user(self.ctx, viewer).await?;

        let messages = self
            .ctx
            .message_repo()
            .find_conversation(viewer, peer_id)
            .await?;

        let messages = messages
            .into_iter()
            .map(|message| {
                let (sender, recipient) = if message.sender_id == viewer {
                    (&me, &peer)
                } else {
                    (&peer, &me)
                };
                MessageResponse::from(MessageWithParticipants {
                    message,
                    sender,
                    peer: recipient,
                })
            })
            .collect();

        Ok(ConversationResponse {
            peer: PublicUserResponse::from(&peer),
            messages,
        })
    }

    /// Send a message and push it to both participants' sessions
    #[instrument(skip(self, request), fields(peer_id = %request.peer_id))]
    pub async fn send_message(
        &self,
        sender_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<SendMessageResponse> {
        let peer_id = Snowflake::parse(&request.peer_id)
            .map_err(|_| DomainError::InvalidId(request.peer_id.clone()))?;
        if peer_id == sender_id {
            return Err(DomainError::SelfMessage.into());
        }

        let peer = require_user(self.ctx, peer_id).await?;
        let sender = require_user(self.ctx, sender_id).await?;

        let attachments = request
            .attachments
            .into_iter()
            .map(|a| Attachment {
                url: a.url.trim().to_string(),
                kind: a.kind,
            })
            .collect();
        let message = Message::new(
            self.ctx.generate_id(),
            sender_id,
            peer_id,
            &request.text,
            attachments,
        )?;

        self.ctx.message_repo().create(&message).await?;

        info!(user_id = %sender_id, peer_id = %peer_id, message_id = %message.id, "Message sent");

        let response = MessageResponse::from(MessageWithParticipants {
            message,
            sender: &sender,
            peer: &peer,
        });

        match serde_json::to_value(&response) {
            Ok(payload) => {
                let effects = self.ctx.effects();
                effects.push(peer_id, DomainEvent::MessageCreate(payload.clone()));
                effects.push(sender_id, DomainEvent::MessageCreate(payload));
            }
            Err(e) => warn!(error = %e, "Failed to serialize message payload"),
        }

        Ok(SendMessageResponse { message: response })
    }

    /// Mark everything `peer_id` sent to the viewer as read
    #[instrument(skip(self))]
    pub async fn mark_thread_read(
        &self,
        viewer: Snowflake,
        peer_id: Snowflake,
    ) -> ServiceResult<ReadReceiptResponse> {
        let receipt = self
            .ctx
            .message_repo()
            .mark_thread_read(viewer, peer_id)
            .await?;

        if receipt.modified > 0 {
            info!(user_id = %viewer, peer_id = %peer_id, modified = receipt.modified, "Thread marked read");
        }

        Ok(ReadReceiptResponse::from(receipt))
    }

    /// Mark one message as read by the viewer
    ///
    /// # Errors
    /// `MessageNotFound` when the message does not exist or the viewer is not
    /// one of its participants
    #[instrument(skip(self))]
    pub async fn mark_message_read(
        &self,
        viewer: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<ReadReceiptResponse> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .filter(|m| m.involves(viewer))
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let receipt = self
            .ctx
            .message_repo()
            .mark_read(viewer, message.id)
            .await?;

        Ok(ReadReceiptResponse::from(receipt))
    }
}
