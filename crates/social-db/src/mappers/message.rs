//! Message model -> entity mapper

use social_core::{Message, Snowflake};

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            peer_id: Snowflake::new(model.peer_id),
            text: model.text,
            attachments: model.attachments.0,
            read_by: model.read_by.into_iter().map(Snowflake::new).collect(),
            created_at: model.created_at,
        }
    }
}
