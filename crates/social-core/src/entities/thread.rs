//! Conversation threads derived from a viewer's messages
//!
//! Threads are never stored. Each call to [`aggregate_threads`] rebuilds them
//! from the full set of messages the viewer took part in:
//!
//! 1. every message is keyed by the participant that is not the viewer;
//! 2. per key, the newest message becomes `last_message`;
//! 3. per key, incoming messages the viewer has not read are counted;
//! 4. threads are ordered newest activity first.
//!
//! Joining the partner's profile is left to the caller.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::entities::Message;
use crate::value_objects::Snowflake;

/// One conversation as seen by a viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub peer_id: Snowflake,
    pub last_message: Message,
    pub unread_count: i64,
}

impl Thread {
    fn ordering_key(&self) -> (chrono::DateTime<chrono::Utc>, Snowflake) {
        (self.last_message.created_at, self.last_message.id)
    }
}

/// Collapse `messages` into one [`Thread`] per conversation partner.
///
/// Messages that do not involve `viewer`, or whose sender and peer are both
/// the viewer, are skipped. Ties on `created_at` are broken by id, which is
/// time ordered.
pub fn aggregate_threads<I>(viewer: Snowflake, messages: I) -> Vec<Thread>
where
    I: IntoIterator<Item = Message>,
{
    let mut threads: HashMap<Snowflake, Thread> = HashMap::new();

    for message in messages {
        let Some(peer_id) = message.other_participant(viewer) else {
            continue;
        };
        let unread = i64::from(message.is_unread_for(viewer));

        match threads.get_mut(&peer_id) {
            Some(thread) => {
                thread.unread_count += unread;
                if (message.created_at, message.id) > thread.ordering_key() {
                    thread.last_message = message;
                }
            }
            None => {
                threads.insert(
                    peer_id,
                    Thread {
                        peer_id,
                        last_message: message,
                        unread_count: unread,
                    },
                );
            }
        }
    }

    let mut threads: Vec<Thread> = threads.into_values().collect();
    threads.sort_by_key(|t| Reverse(t.ordering_key()));
    threads
}
