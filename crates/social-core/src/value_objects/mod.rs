//! Value objects - immutable types that represent domain concepts

mod notification_kind;
mod snowflake;

pub use notification_kind::NotificationKind;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
